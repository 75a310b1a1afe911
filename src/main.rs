//! bootcfg CLI
//!
//! Entry point for the `bootcfg` command-line tool, run by the bootloader
//! build before compiling the SDK sources.

use bootcfg::config::{DefaultsLayers, EffectiveDefaults};
use bootcfg::emit::{self, OutputFormat};
use bootcfg::symbols::utf8_env_vars;
use bootcfg::{BootloaderConfig, BuildError, ExplainOutput, IdfVersion, InputFlags, SymbolTable};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "bootcfg")]
#[command(about = "Resolve bootloader build configuration", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Define a build symbol (NAME or NAME=VALUE)
    #[arg(short = 'D', value_name = "NAME[=VALUE]")]
    define: Vec<String>,

    /// Read symbols from CARGO_FEATURE_* and BOOTCFG_* variables first
    #[arg(long)]
    from_env: bool,

    /// Host/board defaults file (TOML)
    #[arg(long, value_name = "PATH")]
    host_defaults: Option<PathBuf>,

    /// Project defaults file (TOML)
    #[arg(long, value_name = "PATH")]
    project_defaults: Option<PathBuf>,

    /// Override a default value (e.g. console.baudrate=74880)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Do not start from the vendor defaults
    #[arg(long)]
    no_vendor_defaults: bool,

    /// SDK version string passed through to the output
    #[arg(long, value_name = "VERSION")]
    idf_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and emit it
    Resolve {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::C)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(long, short = 'o', value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Show how each rule decided
    Explain {
        #[command(flatten)]
        input: InputArgs,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Validate the inputs without emitting anything
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve { input, format, out } => run_resolve(&input, format, out),
        Commands::Explain { input, human } => run_explain(&input, human),
        Commands::Check { input } => run_check(&input),
    };

    if let Err(e) = result {
        eprintln!("error[{}]: {}", e.code(), e);
        process::exit(1);
    }
}

fn load_flags(input: &InputArgs) -> Result<InputFlags, BuildError> {
    let mut symbols = if input.from_env {
        SymbolTable::from_env(utf8_env_vars(env::vars_os(), &[])?)?
    } else {
        SymbolTable::new()
    };
    symbols.define_all(&input.define)?;

    for (name, value) in symbols.iter() {
        log::debug!("symbol {}={}", name, value);
    }

    Ok(symbols.to_input_flags())
}

fn load_defaults(input: &InputArgs) -> Result<EffectiveDefaults, BuildError> {
    EffectiveDefaults::build(&DefaultsLayers {
        include_vendor: !input.no_vendor_defaults,
        host: input.host_defaults.clone(),
        project: input.project_defaults.clone(),
        overrides: input.set.clone(),
    })
}

fn load_record(input: &InputArgs) -> Result<BootloaderConfig, BuildError> {
    let flags = load_flags(input)?;
    let defaults = load_defaults(input)?;
    let idf_version = input.idf_version.clone().map(IdfVersion::new).transpose()?;
    BootloaderConfig::build(&flags, defaults, idf_version)
}

fn run_resolve(
    input: &InputArgs,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<(), BuildError> {
    let record = load_record(input)?;

    match out {
        Some(path) => {
            emit::write_to_file(&record, format, &path)?;
        }
        None => {
            let rendered = emit::render(&record, format)?;
            io::stdout()
                .write_all(rendered.as_bytes())
                .map_err(|e| BuildError::IoError(e.to_string()))?;
        }
    }
    Ok(())
}

fn run_explain(input: &InputArgs, human: bool) -> Result<(), BuildError> {
    let flags = load_flags(input)?;
    let defaults = load_defaults(input)?;
    let explanation = ExplainOutput::explain(&flags, &defaults.config);

    if human {
        println!("{}", explanation.to_human());
    } else {
        let json = explanation
            .to_json()
            .map_err(|e| BuildError::ParseError(format!("JSON serialization failed: {}", e)))?;
        println!("{}", json);
    }

    if !explanation.resolved {
        process::exit(1);
    }
    Ok(())
}

fn run_check(input: &InputArgs) -> Result<(), BuildError> {
    let record = load_record(input)?;
    let resolved = &record.resolved;

    println!(
        "Configuration valid: flash_mode={} bootloader_log_level={} log_colors={}",
        resolved.flash_mode,
        resolved.bootloader_log_level,
        if resolved.log_colors_enabled { "on" } else { "off" }
    );
    Ok(())
}
