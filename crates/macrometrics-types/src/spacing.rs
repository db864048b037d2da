//! Regular-spacing check for observation indices.

use serde::{Deserialize, Serialize};

use crate::{Frequency, MacroError, SpacingError, TimeSeries, Timestamp};

/// Default tolerance on the deviation of an interval from the first one.
pub const DEFAULT_SPACING_TOLERANCE: f64 = 1e-9;

/// How intervals between consecutive timestamps are measured and compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Unit intervals are measured in; None uses the timestamp's natural unit.
    pub unit: Option<Frequency>,
    /// Allowed deviation, relative to the first interval once it exceeds one unit.
    pub tolerance: f64,
}

impl SpacingConfig {
    /// Creates a config measuring intervals in `unit`.
    #[must_use]
    pub const fn in_unit(unit: Frequency) -> Self {
        Self {
            unit: Some(unit),
            tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }

    /// Returns a copy with the given tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks that the tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidArgument`] otherwise.
    pub fn validate(&self) -> Result<(), MacroError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(MacroError::InvalidArgument(format!(
                "spacing tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    fn interval<T: Timestamp>(&self, from: &T, to: &T) -> Result<f64, SpacingError> {
        match self.unit {
            None => Ok(from.elapsed(to)),
            Some(unit) => from
                .elapsed_in(to, unit)
                .ok_or(SpacingError::UnsupportedFrequency { unit }),
        }
    }

    fn within_tolerance(&self, expected: f64, found: f64) -> bool {
        (found - expected).abs() <= self.tolerance * expected.abs().max(1.0)
    }
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            unit: None,
            tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }
}

/// Checks that consecutive timestamps are separated by a constant interval.
///
/// Scans the deltas once and compares each to the first one. The first
/// violating pair is reported with the index of its earlier timestamp.
/// Returns the detected interval, or None when there are fewer than two
/// timestamps.
///
/// # Errors
///
/// - [`SpacingError::NotChronological`] if an interval is not positive.
/// - [`SpacingError::Irregular`] if an interval deviates from the first.
/// - [`SpacingError::UnsupportedFrequency`] if the timestamp type cannot
///   measure the configured unit.
pub fn check_regular_spacing<T, I>(
    timestamps: I,
    config: &SpacingConfig,
) -> Result<Option<f64>, SpacingError>
where
    T: Timestamp,
    I: IntoIterator<Item = T>,
{
    scan(timestamps.into_iter().map(Ok), config)
}

/// Runs [`check_regular_spacing`] over the rows of `series`.
///
/// Every row in `0..len()` must carry a timestamp, so reported indices are
/// always row positions.
///
/// # Errors
///
/// [`SpacingError::MissingTimestamp`] for the first row without a
/// timestamp, otherwise as [`check_regular_spacing`].
pub fn check_series_spacing<S>(series: &S, config: &SpacingConfig) -> Result<Option<f64>, SpacingError>
where
    S: TimeSeries + ?Sized,
{
    let stamps = (0..series.len()).map(|index| {
        series
            .timestamp(index)
            .ok_or(SpacingError::MissingTimestamp { index })
    });
    scan(stamps, config)
}

fn scan<T, I>(mut stamps: I, config: &SpacingConfig) -> Result<Option<f64>, SpacingError>
where
    T: Timestamp,
    I: Iterator<Item = Result<T, SpacingError>>,
{
    let Some(first) = stamps.next() else {
        return Ok(None);
    };
    let mut prev = first?;

    let mut expected = None;
    for (index, current) in stamps.enumerate() {
        let current = current?;
        let found = config.interval(&prev, &current)?;
        if found.is_nan() || found <= 0.0 {
            tracing::debug!(index, found, "timestamps out of order");
            return Err(SpacingError::NotChronological { index });
        }
        match expected {
            None => expected = Some(found),
            Some(expected) if !config.within_tolerance(expected, found) => {
                tracing::debug!(index, expected, found, "irregular observation spacing");
                return Err(SpacingError::Irregular {
                    index,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        prev = current;
    }

    Ok(expected)
}
