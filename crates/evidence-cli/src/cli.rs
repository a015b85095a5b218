//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// gh-evidence - Re-verify GitHub forensic evidence against its sources.
#[derive(Debug, Parser)]
#[command(name = "gh-evidence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GH_EVIDENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (failing IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify evidence against its declared sources
    Verify(VerifyArgs),

    /// Show which checker each item would use, without network access
    Plan(PlanArgs),

    /// Keep evidence in a JSON store file and verify it
    Store(StoreArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Evidence JSON files (an object or an array per file)
    pub files: Vec<PathBuf>,

    /// Read evidence JSON from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Compare identifying fields only (SHAs, numbers, tag names, hashes)
    #[arg(long)]
    pub identity_only: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    /// Evidence JSON files
    pub files: Vec<PathBuf>,

    /// Read evidence JSON from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the store command.
#[derive(Debug, Parser)]
pub struct StoreArgs {
    /// Store file (a JSON array of evidence)
    pub store: PathBuf,

    #[command(subcommand)]
    pub action: StoreAction,
}

/// Filters selecting stored items.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StoreFilter {
    /// Only items declaring this verification source
    #[arg(long)]
    pub source: Option<String>,

    /// Only items of this event or observation type
    #[arg(long)]
    pub kind: Option<String>,

    /// Only items about this repository (owner/name)
    #[arg(long)]
    pub repo: Option<String>,
}

/// Store actions.
#[derive(Debug, Subcommand)]
pub enum StoreAction {
    /// Add evidence to the store; items with a stored id replace it
    Add {
        /// Evidence JSON files
        files: Vec<PathBuf>,

        /// Read evidence JSON from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// List stored items with the checker each would use
    List {
        #[command(flatten)]
        filter: StoreFilter,
    },

    /// Remove an item by id
    Remove {
        /// Evidence id
        id: String,
    },

    /// Verify stored items against their declared sources
    Verify {
        #[command(flatten)]
        filter: StoreFilter,

        /// Compare identifying fields only
        #[arg(long)]
        identity_only: bool,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (tokens redacted)
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "gh-evidence",
            "verify",
            "evidence.json",
            "more.json",
            "--identity-only",
        ]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(args.identity_only);
                assert!(!args.stdin);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["gh-evidence", "plan", "-vv", "--format", "json", "e.json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["gh-evidence", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_store_verify_filters() {
        let cli = Cli::parse_from([
            "gh-evidence",
            "store",
            "case.json",
            "verify",
            "--source",
            "github",
            "--repo",
            "aws/aws-toolkit-vscode",
        ]);
        match cli.command {
            Command::Store(StoreArgs {
                store,
                action: StoreAction::Verify { filter, identity_only, .. },
            }) => {
                assert_eq!(store, PathBuf::from("case.json"));
                assert_eq!(filter.source.as_deref(), Some("github"));
                assert_eq!(filter.repo.as_deref(), Some("aws/aws-toolkit-vscode"));
                assert!(filter.kind.is_none());
                assert!(!identity_only);
            }
            _ => panic!("Expected store verify"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["gh-evidence"]).is_err());
    }
}
