//! CLI definitions for ChickenShield.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ChickenShield CLI.
#[derive(Parser)]
#[command(name = "chickenshield")]
#[command(about = "Phishing and scam risk analysis for pages open in Chrome")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "~/.chickenshield/config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Watch every Chrome tab and scan pages as they load (default)
    Watch,

    /// Scan one page and print the report
    Scan {
        /// Open this URL in a new tab instead of using the first open tab
        #[arg(long)]
        url: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent scan result
    Last {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent scans, newest first
    History {
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the dashboard
    Dashboard {
        /// Dashboard host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Dashboard port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the dashboard to a PDF through Chrome
    Export {
        /// Page to print (defaults to the configured dashboard)
        #[arg(long)]
        url: Option<String>,

        /// Directory the PDF is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["chickenshield"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("~/.chickenshield/config.toml"));
    }

    #[test]
    fn test_scan_args() {
        let cli = Cli::try_parse_from(["chickenshield", "scan", "--url", "https://example.com", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Scan { url, json }) => {
                assert_eq!(url.as_deref(), Some("https://example.com"));
                assert!(json);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["chickenshield", "history", "--config", "/tmp/cs.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/cs.toml"));
        assert!(matches!(cli.command, Some(Commands::History { json: false })));
    }

    #[test]
    fn test_dashboard_overrides() {
        let cli = Cli::try_parse_from(["chickenshield", "dashboard", "--port", "8088"]).unwrap();
        match cli.command {
            Some(Commands::Dashboard { host, port }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(8088));
            }
            _ => panic!("expected dashboard"),
        }
    }
}
