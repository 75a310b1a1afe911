//! Test fixtures: board defaults files and golden outputs

use std::path::{Path, PathBuf};

/// Path to a board defaults file under tests/fixtures/boards
pub fn board_defaults(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/boards")
        .join(format!("{}.toml", name))
}

/// Path to a golden output file under tests/fixtures/golden
pub fn golden(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/golden")
        .join(name)
}
