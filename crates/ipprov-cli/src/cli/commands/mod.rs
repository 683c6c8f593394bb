//! Command implementations.

pub mod classify;
pub mod config;
pub mod hardcoded;

use anyhow::{Context as _, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,

    /// Config file given on the command line, if any
    pub config_path: Option<PathBuf>,

    /// Output format from the command line or config file
    pub output_format: Option<OutputFormat>,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Output format, or `default` when none was chosen.
    pub fn format_or(&self, default: OutputFormat) -> OutputFormat {
        self.output_format.unwrap_or(default)
    }
}

/// Open an input file; a missing input ends the run.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
