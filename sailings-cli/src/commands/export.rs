use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use sailings_core::export::{export_csv, export_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

pub async fn run(
    year: Option<i32>,
    month: Option<String>,
    format: ExportFormat,
    all: bool,
    today: NaiveDate,
) -> Result<()> {
    let mut board = super::open_board()?;
    let year = super::year_or_today(year, today);
    super::open_month(&mut board, year, month.as_deref(), today).await?;

    let entries = if all {
        board.entries().to_vec()
    } else {
        board.upcoming(today)
    };

    match format {
        ExportFormat::Csv => print!("{}", export_csv(&entries)),
        ExportFormat::Json => println!("{}", export_json(&entries)?),
    }
    Ok(())
}
