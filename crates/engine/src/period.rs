//! Calendar periods and the index of periods that actually hold data.
//!
//! All bucketing happens on the local calendar of the engine time zone, so a
//! transaction stamped `2024-01-31T23:30:00-05:00` lands in February when the
//! engine runs on UTC.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Transaction};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A whole year, or a single month of a year (`month` is 1-12).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation(format!("invalid month: {month}")));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    /// The month containing "now" on the given calendar. This is the default view.
    pub fn current(tz: Tz) -> Self {
        let now = Utc::now().with_timezone(&tz);
        Self {
            year: now.year(),
            month: Some(now.month()),
        }
    }

    pub fn contains(&self, date: &DateTime<FixedOffset>, tz: Tz) -> bool {
        let (year, month) = local_year_month(date, tz);
        year == self.year && self.month.is_none_or(|m| m == month)
    }

    /// Build a selector out of raw `year`/`month` query values.
    ///
    /// `year` absent, empty or `"all"` means no filter at all. A `month` that
    /// is absent, `"null"`, non-numeric or outside 1-12 means the whole year.
    pub fn from_query(year: Option<&str>, month: Option<&str>) -> ResultEngine<Option<Self>> {
        let year = match year.map(str::trim) {
            None | Some("") | Some("all") => return Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| EngineError::Validation(format!("invalid year: {raw}")))?,
        };

        let month = month
            .map(str::trim)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m));

        Ok(Some(Self { year, month }))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{}, {}", MONTH_NAMES[month as usize - 1], self.year),
            None => write!(f, "{}", self.year),
        }
    }
}

impl FromStr for Period {
    type Err = EngineError;

    /// Parses the selector format `YYYY-M`, `YYYY-null` or `YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = match s.split_once('-') {
            Some((year, month)) => (year, Some(month)),
            None => (s, None),
        };
        Self::from_query(Some(year), month)?
            .ok_or_else(|| EngineError::Validation(format!("invalid period: {s}")))
    }
}

/// Row selection read from a query string.
///
/// Unlike [`Period::from_query`] this never fails: a year that is not an
/// integer selects no transaction at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodFilter {
    All,
    Within(Period),
    Nothing,
}

impl PeriodFilter {
    pub fn from_query(year: Option<&str>, month: Option<&str>) -> Self {
        match Period::from_query(year, month) {
            Ok(None) => Self::All,
            Ok(Some(period)) => Self::Within(period),
            Err(err) => {
                tracing::debug!("{err}, selecting nothing");
                Self::Nothing
            }
        }
    }

    /// The period to report alongside results, `None` for all time or nothing.
    pub fn period(self) -> Option<Period> {
        match self {
            Self::Within(period) => Some(period),
            Self::All | Self::Nothing => None,
        }
    }
}

impl From<Option<Period>> for PeriodFilter {
    fn from(value: Option<Period>) -> Self {
        value.map_or(Self::All, Self::Within)
    }
}

/// Year and month (1-12) of `date` on the `tz` calendar.
pub fn local_year_month(date: &DateTime<FixedOffset>, tz: Tz) -> (i32, u32) {
    let local = date.with_timezone(&tz);
    (local.year(), local.month())
}

/// Years that hold at least one transaction, each with its ascending months.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailableDates(BTreeMap<i32, Vec<u32>>);

impl AvailableDates {
    pub fn months(&self, year: i32) -> Option<&[u32]> {
        self.0.get(&year).map(Vec::as_slice)
    }

    /// Years from the most recent to the oldest, the order a period picker lists them.
    pub fn years_desc(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().rev().copied()
    }

    pub fn contains(&self, period: &Period) -> bool {
        match (self.months(period.year), period.month) {
            (Some(_), None) => true,
            (Some(months), Some(month)) => months.contains(&month),
            (None, _) => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Group transactions by local calendar year and month.
pub fn available_dates(transactions: &[Transaction], tz: Tz) -> AvailableDates {
    let mut dates: BTreeMap<i32, Vec<u32>> = BTreeMap::new();
    for tx in transactions {
        let (year, month) = local_year_month(&tx.date, tz);
        let months = dates.entry(year).or_default();
        if let Err(pos) = months.binary_search(&month) {
            months.insert(pos, month);
        }
    }
    AvailableDates(dates)
}
