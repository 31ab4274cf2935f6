use anyhow::Result;
use chrono::NaiveDate;

use crate::render::render_month;

pub async fn run(year: Option<i32>, month: Option<String>, all: bool, today: NaiveDate) -> Result<()> {
    let mut board = super::open_board()?;
    let year = super::year_or_today(year, today);
    let key = super::open_month(&mut board, year, month.as_deref(), today).await?;

    let entries = if all {
        board.entries().to_vec()
    } else {
        board.upcoming(today)
    };

    println!("{}", render_month(key, &entries));
    Ok(())
}
