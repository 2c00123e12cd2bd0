use crate::core::simulation::SimulationKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "modulo-lab")]
#[command(
    about = "Interactive modulo operator demos: calendars, batching, partitioning and FizzBuzz"
)]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Day of the year to weekday, week and day in week
    Day {
        /// Day number (defaults to today's day of the year)
        #[arg(allow_hyphen_values = true)]
        day: Option<String>,
    },
    /// Days within the horizon on which a recurring event fires
    Schedule {
        #[arg(allow_hyphen_values = true)]
        interval: String,
    },
    /// Hour of the day to one of four shifts
    Shift {
        #[arg(allow_hyphen_values = true)]
        hour: String,
    },
    /// Split records 1..=total into contiguous batches
    Batch {
        #[arg(long, allow_hyphen_values = true)]
        total: String,
        #[arg(long, allow_hyphen_values = true)]
        size: String,
    },
    /// Route a record to a server with record % servers
    Partition {
        #[arg(allow_hyphen_values = true)]
        record: String,
        #[arg(long, allow_hyphen_values = true)]
        servers: String,
    },
    /// Product category from product id % categories
    Categorize {
        #[arg(allow_hyphen_values = true)]
        product: String,
    },
    /// A/B test group from user id % 2
    AbTest {
        #[arg(allow_hyphen_values = true)]
        user: String,
    },
    /// Route a request to a server with request % servers
    LoadBalance {
        #[arg(allow_hyphen_values = true)]
        request: String,
        #[arg(long, allow_hyphen_values = true)]
        servers: String,
    },
    /// Content sharing the same id % 5 group
    Similar {
        #[arg(allow_hyphen_values = true)]
        content: String,
    },
    /// User cluster from user id % clusters
    Cluster {
        #[arg(allow_hyphen_values = true)]
        user: String,
    },
    /// Special offer eligibility for every Nth customer
    Offer {
        #[arg(allow_hyphen_values = true)]
        customer: String,
        #[arg(long, allow_hyphen_values = true)]
        interval: String,
    },
    /// Notification priority from id % priorities
    Notify {
        #[arg(allow_hyphen_values = true)]
        notification: String,
    },
    /// Game events triggered on a day
    GameDay {
        #[arg(allow_hyphen_values = true)]
        day: String,
    },
    /// Whether a backup runs on a day
    Backup {
        #[arg(allow_hyphen_values = true)]
        day: String,
        #[arg(long, allow_hyphen_values = true)]
        interval: String,
    },
    /// FizzBuzz from 1 to n
    Fizzbuzz {
        #[arg(allow_hyphen_values = true)]
        n: String,
    },
    /// Fixed-size simulation tables
    Simulate {
        #[arg(value_enum)]
        kind: SimulationKind,
    },
    /// Write every simulation table to the output directory
    Export {
        /// Override export.output_path from config
        #[arg(short, long)]
        output: Option<String>,

        /// Bundle files into a single zip archive
        #[arg(long)]
        compress: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partition_command() {
        let cli =
            CliConfig::try_parse_from(["modulo-lab", "partition", "17", "--servers", "4"]).unwrap();
        match cli.command {
            Command::Partition { record, servers } => {
                assert_eq!(record, "17");
                assert_eq!(servers, "4");
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = ["modulo-lab", "fizzbuzz", "15", "--format", "json", "-v"];
        let cli = CliConfig::try_parse_from(args).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_simulation_kind() {
        let cli = CliConfig::try_parse_from(["modulo-lab", "simulate", "real-world"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Simulate {
                kind: SimulationKind::RealWorld
            }
        ));
    }

    #[test]
    fn test_day_argument_is_optional() {
        let cli = CliConfig::try_parse_from(["modulo-lab", "day"]).unwrap();
        assert!(matches!(cli.command, Command::Day { day: None }));
    }
}
