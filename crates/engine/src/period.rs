//! Calendar month selector used by the monthly summary and rent batches.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month. Ordered chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Builds a period, rejecting months outside `1..=12` and years outside
    /// `1..=9999`.
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidPeriod(format!(
                "year must be in {MIN_YEAR}..={MAX_YEAR}, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing `at`, in `at`'s own time zone.
    #[must_use]
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    #[must_use]
    pub fn current() -> Self {
        Self::of(&Utc::now())
    }

    /// Rent bills are recorded against the month they were consumed in, which
    /// is the month before they get paid.
    #[must_use]
    pub fn rent_default() -> Self {
        Self::current().previous()
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns `true` if `at` falls inside this month (UTC).
    #[must_use]
    pub fn contains(self, at: &DateTime<Utc>) -> bool {
        Self::of(at) == self
    }

    /// A timestamp inside this period, keeping the time of day of `at`.
    ///
    /// Used to backdate a rent batch into the month it bills. The day is
    /// clamped to the last day of the target month.
    #[must_use]
    pub fn shift_into(self, at: DateTime<Utc>) -> DateTime<Utc> {
        let from = Self::of(&at);
        let diff = (i64::from(self.year) - i64::from(from.year)) * 12
            + (i64::from(self.month) - i64::from(from.month));
        let months = Months::new(u32::try_from(diff.unsigned_abs()).unwrap_or(u32::MAX));
        let shifted = if diff >= 0 {
            at.checked_add_months(months)
        } else {
            at.checked_sub_months(months)
        };
        shifted.unwrap_or(at)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    /// Accepts `YYYY-MM` or `MM/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPeriod(format!("expected YYYY-MM or MM/YYYY: {s:?}"));
        let trimmed = s.trim();

        let (year, month) = if let Some((year, month)) = trimmed.split_once('-') {
            (year, month)
        } else if let Some((month, year)) = trimmed.split_once('/') {
            (year, month)
        } else {
            return Err(invalid());
        };

        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}
