//! Weekly sailing rules: which weekdays have departures and what each
//! departure looks like.

use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{ScheduleError, ScheduleResult};
use crate::money::Money;

/// Fixed itinerary and pricing for every departure on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SailingTemplate {
    pub nights: u32,
    pub start_point: String,
    pub end_point: String,
    pub double_price: Money,
    pub single_supplement: Money,
}

impl SailingTemplate {
    pub fn new(
        nights: u32,
        start_point: &str,
        end_point: &str,
        double_price: Money,
        single_supplement: Money,
    ) -> Self {
        SailingTemplate {
            nights,
            start_point: start_point.to_string(),
            end_point: end_point.to_string(),
            double_price,
            single_supplement,
        }
    }
}

/// Weekday → template mapping. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    // indexed by days from Monday
    templates: [Option<SailingTemplate>; 7],
}

impl RuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fleet's standard week: two 4-night and two 3-night sailings looping
    /// between Luxor, Esna and Aswan.
    pub fn reference() -> Self {
        Self::empty()
            .with(
                Weekday::Mon,
                SailingTemplate::new(4, "Esna", "Aswan", Money::from_dollars(850), Money::from_dollars(425)),
            )
            .with(
                Weekday::Tue,
                SailingTemplate::new(4, "Luxor", "Aswan", Money::from_dollars(900), Money::from_dollars(450)),
            )
            .with(
                Weekday::Fri,
                SailingTemplate::new(3, "Aswan", "Esna", Money::from_dollars(675), Money::from_dollars(340)),
            )
            .with(
                Weekday::Sat,
                SailingTemplate::new(3, "Aswan", "Luxor", Money::from_dollars(700), Money::from_dollars(350)),
            )
    }

    pub fn with(mut self, weekday: Weekday, template: SailingTemplate) -> Self {
        self.templates[weekday.num_days_from_monday() as usize] = Some(template);
        self
    }

    pub fn get(&self, weekday: Weekday) -> Option<&SailingTemplate> {
        self.templates[weekday.num_days_from_monday() as usize].as_ref()
    }

    /// Weekdays with a departure, Monday first.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|d| self.get(*d).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.templates.iter().all(Option::is_none)
    }

    /// Parse a TOML rule file:
    ///
    /// ```toml
    /// [[sailing]]
    /// weekday = "Friday"
    /// nights = 3
    /// start_point = "Aswan"
    /// end_point = "Esna"
    /// double_price = "$675"
    /// single_supplement = "$340"
    /// ```
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let file: RuleFile =
            toml::from_str(content).map_err(|e| ScheduleError::Config(e.to_string()))?;

        let mut rules = RuleSet::empty();
        for row in file.sailing {
            let weekday = Weekday::from_str(&row.weekday).map_err(|_| {
                ScheduleError::Config(format!("Unknown weekday '{}' in sailing rules", row.weekday))
            })?;

            if rules.get(weekday).is_some() {
                return Err(ScheduleError::Config(format!(
                    "Weekday '{}' has more than one sailing rule",
                    row.weekday
                )));
            }
            if row.nights == 0 {
                return Err(ScheduleError::Config(format!(
                    "Sailing rule for '{}' must last at least one night",
                    row.weekday
                )));
            }

            let template = SailingTemplate {
                nights: row.nights,
                start_point: row.start_point,
                end_point: row.end_point,
                double_price: Money::parse(&row.double_price)?,
                single_supplement: Money::parse(&row.single_supplement)?,
            };
            rules = rules.with(weekday, template);
        }

        Ok(rules)
    }

    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!("Could not read sailing rules {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Deserialize)]
struct RuleFile {
    #[serde(default)]
    sailing: Vec<RuleRow>,
}

#[derive(Deserialize)]
struct RuleRow {
    weekday: String,
    nights: u32,
    start_point: String,
    end_point: String,
    double_price: String,
    single_supplement: String,
}
