//! Core types for macrometrics econometric models.
//!
//! This crate provides the data contracts shared by every model crate:
//!
//! - [`MacroError`] - Error taxonomy for model and quantity contracts
//! - [`Frequency`] - Unit in which observation spacing is measured
//! - [`Timestamp`] - Chronological index abstraction
//! - [`TimeSeries`] - Read-only view of timestamped observation vectors
//! - [`TimeSeriesFrame`] - In-memory time series
//! - [`check_regular_spacing`] - Constant-interval validation
//! - [`check_series_spacing`] - The same check over a [`TimeSeries`], rejecting missing timestamps

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrometrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod frequency;
mod series;
mod spacing;
mod timestamp;

pub use error::{CovarianceError, MacroError, Result, SpacingError};
pub use frequency::{Frequency, FrequencyParseError};
pub use series::{Observation, TimeSeries, TimeSeriesFrame};
pub use spacing::{
    DEFAULT_SPACING_TOLERANCE, SpacingConfig, check_regular_spacing, check_series_spacing,
};
pub use timestamp::Timestamp;
