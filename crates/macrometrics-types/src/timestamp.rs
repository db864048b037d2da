//! Time index abstraction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::Frequency;

/// A point on a chronological index.
///
/// Implementors report the distance to a later timestamp in their natural
/// unit, and optionally in a [`Frequency`]. Only the distance is used by the
/// spacing check, so any ordered numeric or calendar type can index a series.
pub trait Timestamp: Copy + PartialOrd + std::fmt::Debug {
    /// Distance from `self` to `later` in the type's natural unit.
    ///
    /// Numbers use raw units, dates use days, datetimes use seconds.
    fn elapsed(&self, later: &Self) -> f64;

    /// Distance from `self` to `later` measured in `unit`.
    ///
    /// Returns None when the type has no notion of `unit`.
    fn elapsed_in(&self, _later: &Self, _unit: Frequency) -> Option<f64> {
        None
    }
}

impl Timestamp for f64 {
    fn elapsed(&self, later: &Self) -> f64 {
        later - self
    }
}

impl Timestamp for i64 {
    fn elapsed(&self, later: &Self) -> f64 {
        // i128 holds the difference of any two i64 values
        (i128::from(*later) - i128::from(*self)) as f64
    }
}

impl Timestamp for NaiveDate {
    fn elapsed(&self, later: &Self) -> f64 {
        (*later - *self).num_days() as f64
    }

    fn elapsed_in(&self, later: &Self, unit: Frequency) -> Option<f64> {
        match (unit.seconds(), unit.months()) {
            (Some(secs), _) => Some((*later - *self).num_seconds() as f64 / secs as f64),
            (None, Some(months)) => Some(month_distance(self, later) / f64::from(months)),
            (None, None) => None,
        }
    }
}

impl Timestamp for NaiveDateTime {
    fn elapsed(&self, later: &Self) -> f64 {
        (*later - *self).num_milliseconds() as f64 / 1000.0
    }

    fn elapsed_in(&self, later: &Self, unit: Frequency) -> Option<f64> {
        match (unit.seconds(), unit.months()) {
            (Some(secs), _) => Some(self.elapsed(later) / secs as f64),
            (None, Some(months)) => Some(month_distance(self, later) / f64::from(months)),
            (None, None) => None,
        }
    }
}

impl Timestamp for DateTime<Utc> {
    fn elapsed(&self, later: &Self) -> f64 {
        (*later - *self).num_milliseconds() as f64 / 1000.0
    }

    fn elapsed_in(&self, later: &Self, unit: Frequency) -> Option<f64> {
        self.naive_utc().elapsed_in(&later.naive_utc(), unit)
    }
}

/// Whole calendar months between two dates, ignoring the day of month.
fn month_distance<D: Datelike>(from: &D, to: &D) -> f64 {
    (month_index(to) - month_index(from)) as f64
}

fn month_index<D: Datelike>(date: &D) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}
