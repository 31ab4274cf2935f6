mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::export::ExportFormat;

#[derive(Parser)]
#[command(name = "sailings")]
#[command(about = "Browse and edit the recurring cruise departure schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sailings of a month
    List {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month name, e.g. "August" (defaults to the first month with upcoming sailings)
        #[arg(short, long)]
        month: Option<String>,

        /// Include sailings that already departed
        #[arg(long)]
        all: bool,

        /// Treat this day as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the month that opens by default for a year
    DefaultMonth {
        #[arg(short, long)]
        year: Option<i32>,

        /// Treat this day as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Edit a sailing; generated sailings are stored on first edit
    Override {
        /// Departure date of the sailing to edit ("01 August 2025")
        #[arg(long)]
        date: String,

        /// Pick the sailing with this many nights when several leave that day
        #[arg(long)]
        nights: Option<u32>,

        #[arg(long)]
        double_price: Option<String>,

        #[arg(long)]
        single_supplement: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        itinerary: Option<String>,

        #[arg(long)]
        sort_order: Option<i32>,

        /// Mark the sailing as not bookable
        #[arg(long)]
        inactive: bool,
    },
    /// Add a one-off sailing outside the weekly rules
    Add {
        /// Departure date ("13 August 2025")
        #[arg(long)]
        start: String,

        #[arg(long)]
        nights: u32,

        /// Port of departure
        #[arg(long)]
        from: String,

        /// Port of arrival
        #[arg(long)]
        to: String,

        #[arg(long)]
        double_price: String,

        #[arg(long)]
        single_supplement: String,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a stored sailing by id
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Export a month's sailings
    Export {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<String>,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Include sailings that already departed
        #[arg(long)]
        all: bool,

        /// Treat this day as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            year,
            month,
            all,
            today,
        } => {
            let today = commands::parse_today(today.as_deref())?;
            commands::list::run(year, month, all, today).await
        }
        Commands::DefaultMonth { year, today } => {
            let today = commands::parse_today(today.as_deref())?;
            commands::default_month::run(year, today).await
        }
        Commands::Override {
            date,
            nights,
            double_price,
            single_supplement,
            notes,
            itinerary,
            sort_order,
            inactive,
        } => {
            let changes = commands::override_sailing::Changes {
                double_price,
                single_supplement,
                notes,
                itinerary,
                sort_order,
                inactive,
            };
            commands::override_sailing::run(&date, nights, changes).await
        }
        Commands::Add {
            start,
            nights,
            from,
            to,
            double_price,
            single_supplement,
            notes,
        } => {
            let sailing = commands::add::NewSailing {
                start,
                nights,
                from,
                to,
                double_price,
                single_supplement,
                notes,
            };
            commands::add::run(sailing).await
        }
        Commands::Delete { id } => commands::delete::run(&id).await,
        Commands::Export {
            year,
            month,
            format,
            all,
            today,
        } => {
            let today = commands::parse_today(today.as_deref())?;
            commands::export::run(year, month, format, all, today).await
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SAILINGS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
