//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use ipprov_core::Address;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// DNS provenance analysis for captured traffic
///
/// Find addresses a device reached without resolving them, and attribute
/// addresses to their owners via reverse DNS and WHOIS.
#[derive(Parser, Debug)]
#[command(name = "ipprov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, env = "IPPROV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List connection addresses that never appeared in a DNS answer
    Hardcoded(HardcodedArgs),

    /// Attribute addresses via PTR and WHOIS and rebuild a BPF filter
    Classify(ClassifyArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Hardcoded command
// ============================================================================

#[derive(Args, Debug)]
pub struct HardcodedArgs {
    /// DNS log: comma-delimited, A answers in column 2, AAAA in column 3
    pub dns_log: PathBuf,

    /// Connection log: comma-delimited, source in column 1, destination in column 2
    pub connections_log: PathBuf,

    /// Additional address to ignore (repeatable)
    #[arg(long = "ignore", value_name = "ADDR")]
    pub ignore: Vec<Address>,

    /// Do not start from the configured ignore list
    #[arg(long)]
    pub no_default_ignore: bool,
}

// ============================================================================
// Classify command
// ============================================================================

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Address list: one address per line, `#` comments allowed
    pub ips_file: PathBuf,

    /// BPF filter file to rewrite with matching hosts
    pub bpf_file: PathBuf,

    /// PTR suffix that selects addresses for the filter
    #[arg(short, long, env = "IPPROV_SUFFIX")]
    pub suffix: Option<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hardcoded() {
        let cli = Cli::try_parse_from([
            "ipprov",
            "hardcoded",
            "dns.log",
            "conn.log",
            "--ignore",
            "1.1.1.1",
            "--ignore",
            "9.9.9.9",
            "-o",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Csv));
        let Commands::Hardcoded(args) = cli.command else {
            panic!("expected hardcoded");
        };
        assert_eq!(args.ignore.len(), 2);
        assert!(!args.no_default_ignore);
    }

    #[test]
    fn test_invalid_ignore_address_rejected() {
        let result = Cli::try_parse_from(["ipprov", "hardcoded", "a", "b", "--ignore", "dns.google"]);
        assert!(result.is_err());
    }
}
