//! Command implementations for the statistics CLI.
//!
//! Provides subcommands for printing a statistics chart as a text table
//! and for checking a contribution before it is uploaded.

use clap::Subcommand;

pub mod chart;
pub mod contribution;
pub mod http;
pub mod table;

/// Where the repository serves its `charts/...` endpoints.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/stats/";

#[derive(Subcommand)]
pub enum Command {
    /// Fetch one statistics chart and print it as a table
    Chart {
        /// Chart kind (see `kinds`)
        kind: String,

        /// Base URL of the statistics endpoints
        #[arg(short = 'b', long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Start of the date range (dd-mm-yyyy), for charts with date filters
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,

        /// End of the date range (dd-mm-yyyy), for charts with date filters
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,
    },

    /// List the available chart kinds
    Kinds,

    /// Check a contribution (zip upload or resource URL) before submitting it
    CheckContribution {
        /// Path of the zip archive to upload
        #[arg(short = 'f', long, conflicts_with = "url", required_unless_present = "url")]
        file: Option<String>,

        /// URL of the resource to contribute
        #[arg(short = 'u', long)]
        url: Option<String>,
    },

    /// Check a processing request (zip archive or repository resource)
    CheckProcessing {
        /// Path of the zip archive to process
        #[arg(short = 'f', long, required_unless_present = "resource_id")]
        file: Option<String>,

        /// Id of a resource already in the repository
        #[arg(short = 'r', long)]
        resource_id: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Chart {
            kind,
            base_url,
            start_date,
            end_date,
        } => {
            let dates = start_date.zip(end_date);
            let table = chart::run_chart(&kind, &base_url, dates).await?;
            print!("{}", table);
            Ok(())
        }
        Command::Kinds => {
            print!("{}", chart::list_kinds());
            Ok(())
        }
        Command::CheckContribution { file, url } => {
            let message = contribution::run_check(file.as_deref(), url.as_deref())?;
            println!("{}", message);
            Ok(())
        }
        Command::CheckProcessing { file, resource_id } => {
            let message =
                contribution::run_processing_check(file.as_deref(), resource_id.as_deref())?;
            println!("{}", message);
            Ok(())
        }
    }
}
