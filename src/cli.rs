//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// planagent - agentic event planning assistant
#[derive(Parser)]
#[command(
    name = "planagent",
    about = "Conversational event planner driven by an LLM tool loop",
    version,
    after_help = "Logs are written to: ~/.local/share/planagent/logs/planagent.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run an interactive planning session
    Plan {
        /// Initial planning request; prompted for when omitted
        request: Option<String>,

        /// Override the session turn budget
        #[arg(long)]
        max_turns: Option<usize>,
    },

    /// Generate feasible slots directly (debugging aid)
    Slots {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,

        /// End date (YYYY-MM-DD); defaults to start date
        #[arg(long)]
        end_date: Option<String>,

        /// Event duration in hours
        #[arg(short, long, default_value = "1")]
        duration: f64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the registered planning tools
    Tools,
}

/// Output format for the slots command
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_plan_with_request() {
        let cli = Cli::parse_from(["planagent", "plan", "dinner for 4 in Malad tomorrow"]);
        if let Command::Plan { request, max_turns } = cli.command {
            assert_eq!(request.as_deref(), Some("dinner for 4 in Malad tomorrow"));
            assert!(max_turns.is_none());
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_plan_without_request() {
        let cli = Cli::parse_from(["planagent", "plan"]);
        assert!(matches!(cli.command, Command::Plan { request: None, .. }));
    }

    #[test]
    fn test_cli_parse_plan_max_turns() {
        let cli = Cli::parse_from(["planagent", "plan", "--max-turns", "5"]);
        if let Command::Plan { max_turns, .. } = cli.command {
            assert_eq!(max_turns, Some(5));
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_slots() {
        let cli = Cli::parse_from([
            "planagent",
            "slots",
            "--start-date",
            "2025-07-10",
            "--duration",
            "2",
        ]);
        if let Command::Slots {
            start_date,
            end_date,
            duration,
            ..
        } = cli.command
        {
            assert_eq!(start_date, "2025-07-10");
            assert!(end_date.is_none());
            assert_eq!(duration, 2.0);
        } else {
            panic!("Expected Slots command");
        }
    }

    #[test]
    fn test_cli_parse_tools() {
        let cli = Cli::parse_from(["planagent", "tools"]);
        assert!(matches!(cli.command, Command::Tools));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["planagent", "-c", "/path/to/config.yml", "tools"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
