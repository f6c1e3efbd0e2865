//! Age computation and age-range filters

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// A birthday counts once its month/day has been reached in the current year.
/// Someone born on 29 February ages on 1 March in non-leap years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}

/// Inclusive age bounds used by discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Build a range, rejecting `min > max`
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Check whether an age falls within the range
    pub fn contains(&self, age: i32) -> bool {
        age >= 0 && (self.min..=self.max).contains(&age.unsigned_abs())
    }

    /// Translate the age bounds into a window of birth dates as of `today`.
    ///
    /// A person is within the range iff
    /// `earliest_exclusive < date_of_birth <= latest`.
    /// Returns `None` when the bounds reach past the representable calendar.
    pub fn birth_date_window(&self, today: NaiveDate) -> Option<BirthDateWindow> {
        let latest = years_before(today, self.min)?;
        let earliest_exclusive = years_before(today, self.max.checked_add(1)?)?;
        Some(BirthDateWindow {
            earliest_exclusive,
            latest,
        })
    }
}

/// Half-open window of birth dates, `(earliest_exclusive, latest]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateWindow {
    pub earliest_exclusive: NaiveDate,
    pub latest: NaiveDate,
}

impl BirthDateWindow {
    pub fn contains(&self, date_of_birth: NaiveDate) -> bool {
        date_of_birth > self.earliest_exclusive && date_of_birth <= self.latest
    }
}

// chrono clamps Feb 29 to Feb 28 when the target year is not a leap year.
fn years_before(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(years.checked_mul(12)?))
}
