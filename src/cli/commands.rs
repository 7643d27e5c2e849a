use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Archivist` - rolls old files into calendar-window archives.
#[derive(Parser, Debug)]
#[command(name = "archivist")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Archive old files into calendar-window bundles.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.archivist/config.toml, or $ARCHIVIST_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one archive pass over all configured entries
    Run {
        /// Only run the entry with this name
        #[arg(short, long)]
        entry: Option<String>,
    },

    /// Show the windows a pass would archive, without touching any file
    Plan {
        /// Only plan the entry with this name
        #[arg(short, long)]
        entry: Option<String>,

        /// Maximum number of windows listed per entry
        #[arg(short, long, default_value = "12")]
        limit: usize,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every entry and the daemon schedule
    Check,

    /// Run archive passes on the configured cron schedule until Ctrl-C
    Daemon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "archivist",
            "plan",
            "--entry",
            "logs",
            "--limit",
            "3",
            "--json",
            "--config",
            "/tmp/a.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/a.toml")));
        match cli.command {
            Commands::Plan { entry, limit, json } => {
                assert_eq!(entry.as_deref(), Some("logs"));
                assert_eq!(limit, 3);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
