pub mod add;
pub mod default_month;
pub mod delete;
pub mod export;
pub mod list;
pub mod override_sailing;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate};
use sailings_core::config::SailingsConfig;
use sailings_core::store::FileStore;
use sailings_core::{MonthKey, ScheduleBoard};
use tracing::debug;

/// Parse a `--today` override (YYYY-MM-DD), defaulting to the local date.
pub fn parse_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today '{s}'. Expected YYYY-MM-DD")),
        None => Ok(Local::now().date_naive()),
    }
}

/// Resolve an explicit `--month` against `--year` (defaulting to today's year).
pub fn month_arg(year: i32, month: &str) -> Result<MonthKey> {
    match MonthKey::from_name(year, month) {
        Some(key) => Ok(key),
        None => bail!("Unknown month '{month}'. Use a full or short month name, e.g. August"),
    }
}

pub fn year_or_today(year: Option<i32>, today: NaiveDate) -> i32 {
    year.unwrap_or_else(|| today.year())
}

/// Board over the configured store and weekly rules.
pub fn open_board() -> Result<ScheduleBoard<FileStore>> {
    let config = SailingsConfig::load()?;
    let rules = config.rules()?;
    debug!(store = %config.store_path().display(), "opening schedule");
    Ok(ScheduleBoard::new(config.store(), rules))
}

/// Open `month` of `year`, or the default month of `year` when no month is given.
pub async fn open_month(
    board: &mut ScheduleBoard<FileStore>,
    year: i32,
    month: Option<&str>,
    today: NaiveDate,
) -> Result<MonthKey> {
    match month {
        Some(name) => {
            let key = month_arg(year, name)?;
            board.open(key).await;
            Ok(key)
        }
        None => Ok(board.open_year(year, today).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_today() {
        assert_eq!(
            parse_today(Some("2025-08-10")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()
        );
        assert!(parse_today(Some("10 August 2025")).is_err());
        assert!(parse_today(None).is_ok());
    }

    #[test]
    fn test_month_arg() {
        assert_eq!(month_arg(2025, "August").unwrap().month, 8);
        assert_eq!(month_arg(2025, "aug").unwrap().month, 8);
        assert!(month_arg(2025, "Smarch").is_err());
    }
}
