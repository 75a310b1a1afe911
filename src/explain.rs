//! Explain output for a resolution
//!
//! Shows, rule by rule, which inputs were seen and what each rule decided.

use bootcfg_resolver::{resolve, DefaultConfig, FlashMode, InputFlags, LogLevel};
use serde::{Deserialize, Serialize};

/// State of one flash mode symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeFlagState {
    /// Symbol name, e.g. `FLASH_MODE_QIO`
    pub symbol: String,

    /// Whether the symbol is defined and non-zero
    pub set: bool,
}

/// Per-rule trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleTrace {
    /// Short rule name
    pub rule: String,

    /// Inputs the rule looked at
    pub inputs: Vec<String>,

    /// Value chosen, or None if the rule failed
    pub outcome: Option<String>,
}

/// Explain output for one set of input flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// Whether resolution succeeded
    pub resolved: bool,

    /// One trace per rule, in evaluation order
    pub rules: Vec<RuleTrace>,

    /// Flash mode symbols in the order they are examined
    pub flash_mode_flags: Vec<ModeFlagState>,

    /// Machine-readable error code on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Human-readable explanation
    pub explanation: String,
}

impl ExplainOutput {
    /// Run the resolution and record what each rule saw and decided.
    pub fn explain(flags: &InputFlags, defaults: &DefaultConfig) -> Self {
        let result = resolve(flags, defaults);

        let flash_mode_flags: Vec<ModeFlagState> = FlashMode::PRIORITY
            .iter()
            .map(|m| ModeFlagState {
                symbol: m.symbol().to_string(),
                set: flags.flash_mode.is_set(*m),
            })
            .collect();

        let flash_outcome = flags.flash_mode.select().ok().map(|m| m.name().to_string());

        let rules = vec![
            RuleTrace {
                rule: "log_colors".to_string(),
                inputs: vec![format!(
                    "{}={}",
                    bootcfg_resolver::SYMBOL_LOG_COLORED,
                    u8::from(flags.color_logging_enabled)
                )],
                outcome: Some(flags.color_logging_enabled.to_string()),
            },
            RuleTrace {
                rule: "bootloader_log_level".to_string(),
                inputs: vec![format!(
                    "{}={}",
                    bootcfg_resolver::SYMBOL_LOG_STARTUP,
                    u8::from(flags.startup_logging_enabled)
                )],
                outcome: Some(LogLevel::for_bootloader(flags.startup_logging_enabled).to_string()),
            },
            RuleTrace {
                rule: "flash_mode".to_string(),
                inputs: flash_mode_flags
                    .iter()
                    .map(|f| format!("{}={}", f.symbol, u8::from(f.set)))
                    .collect(),
                outcome: flash_outcome,
            },
        ];

        let mut lines = Vec::new();
        match &result {
            Ok(config) => {
                lines.push("Decision: RESOLVED".to_string());
                lines.push(String::new());
                lines.push(format!("Log colors: {}", config.log_colors_enabled));
                lines.push(format!(
                    "Bootloader log level: {} ({})",
                    config.bootloader_log_level,
                    config.bootloader_log_level.ordinal()
                ));
                lines.push(format!("Flash mode: {}", config.flash_mode));
            }
            Err(e) => {
                lines.push("Decision: FAILED".to_string());
                lines.push(String::new());
                lines.push(format!("  - [{}] {}", e.code(), e));
            }
        }

        Self {
            resolved: result.is_ok(),
            rules,
            flash_mode_flags,
            error_code: result.as_ref().err().map(|e| e.code().to_string()),
            explanation: lines.join("\n"),
        }
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut output = self.explanation.clone();
        output.push_str("\n\n--- Rules ---\n");
        for rule in &self.rules {
            output.push_str(&format!(
                "{}: {} -> {}\n",
                rule.rule,
                rule.inputs.join(", "),
                rule.outcome.as_deref().unwrap_or("(fails)")
            ));
        }

        output.push_str("\n--- Flash Mode Flags (priority order) ---\n");
        for flag in &self.flash_mode_flags {
            output.push_str(&format!(
                "{} {}\n",
                if flag.set { "[x]" } else { "[ ]" },
                flag.symbol
            ));
        }

        output
    }
}
