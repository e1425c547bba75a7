// ABOUTME: CI output surface for resolved pipeline values.
// ABOUTME: Appends key=value lines to the GITHUB_OUTPUT file when present.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Writes invocation outputs for the surrounding workflow to consume.
/// Without an output file the values are only logged, which keeps local
/// runs harmless.
pub struct Outputs {
    path: Option<PathBuf>,
}

impl Outputs {
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }

    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Record one output value.
    pub fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        tracing::info!("output {key}={value}");
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{key}={value}")?;
        }
        Ok(())
    }
}
