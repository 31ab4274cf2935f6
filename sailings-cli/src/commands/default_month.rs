use anyhow::Result;
use chrono::NaiveDate;

pub async fn run(year: Option<i32>, today: NaiveDate) -> Result<()> {
    let mut board = super::open_board()?;
    let year = super::year_or_today(year, today);
    let key = board.open_year(year, today).await;

    println!("{}", key.month_name());
    Ok(())
}
