use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hitdash", version, about = "API hit tracking dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "hitdash.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard {
        /// Hits endpoint URL (built from config if not provided)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Fetch once and print both hit summaries
    Summary {
        /// Hits endpoint URL (built from config if not provided)
        #[arg(short, long)]
        url: Option<String>,

        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Dashboard if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Dashboard { url: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_dashboard() {
        let cli = Cli {
            config: PathBuf::from("hitdash.toml"),
            command: None,
        };

        match cli.get_command() {
            Commands::Dashboard { url } => assert!(url.is_none()),
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_cli_parsing_summary_json() {
        let args = vec!["hitdash", "summary", "--json", "--url", "http://10.0.0.5/api/hits"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Summary { url, json } => {
                assert!(json);
                assert_eq!(url.as_deref(), Some("http://10.0.0.5/api/hits"));
            }
            _ => panic!("Expected Summary command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_config() {
        let args = vec!["hitdash", "config", "show", "--config", "other.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Show
            }
        ));
    }
}
