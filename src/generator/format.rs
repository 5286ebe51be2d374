use super::lang::Language;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Env var overriding the `gofmt` binary
pub const GOFMT_BIN_ENV: &str = "RAMLGEN_GOFMT_BIN";
/// Env var overriding the `rustfmt` binary
pub const RUSTFMT_BIN_ENV: &str = "RAMLGEN_RUSTFMT_BIN";

fn generated_rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list output directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run the language formatter over the generated files in `dir`.
///
/// Go: `gofmt -w <dir>`. Rust: `rustfmt --edition 2021 <files>`.
pub fn format_output(dir: &Path, language: Language) -> anyhow::Result<()> {
    // Allow tests to override the formatter binary without mutating PATH
    let mut cmd = match language {
        Language::Go => {
            let bin = std::env::var(GOFMT_BIN_ENV).unwrap_or_else(|_| "gofmt".to_string());
            let mut cmd = Command::new(bin);
            cmd.arg("-w").arg(dir);
            cmd
        }
        Language::Rust => {
            let files = generated_rust_files(dir)?;
            if files.is_empty() {
                return Ok(());
            }
            let bin = std::env::var(RUSTFMT_BIN_ENV).unwrap_or_else(|_| "rustfmt".to_string());
            let mut cmd = Command::new(bin);
            cmd.arg("--edition").arg("2021").args(files);
            cmd
        }
    };
    debug!(?cmd, "formatting generated sources");
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run formatter for {language}"))?;
    if !status.success() {
        anyhow::bail!("{language} formatter failed on {}", dir.display());
    }
    Ok(())
}
