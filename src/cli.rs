use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportKind {
    /// Cohort conversion heat-map
    Cohort,
    /// Sales forecast with scenario totals
    Forecast,
    /// Pipeline velocity and stage funnel
    Velocity,
    /// Competitor win/loss comparison
    Competitors,
    /// Loss analytics by reason, competitor, user, and month
    Losses,
    /// Net promoter score dashboard
    Nps,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "salesview")]
#[command(about = "Field-sales analytics aggregation and presentation bucketing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a report payload into a view-model and print it
    Render {
        /// Path to the JSON payload file
        input: PathBuf,

        /// Which report the payload belongs to
        #[arg(short, long, value_enum)]
        report: ReportKind,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Optional TOML view configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable colors (also honors NO_COLOR)
        #[arg(long)]
        plain: bool,
    },

    /// Print the built-in bucket threshold tables
    Tables {
        /// Disable colors
        #[arg(long)]
        plain: bool,
    },
}
