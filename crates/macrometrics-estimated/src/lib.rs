//! Estimated quantities for macrometrics models.
//!
//! This crate provides a single representation for model parameters and
//! statistics, whatever the estimation method:
//!
//! - [`Estimated`] - Sum type over the three estimation kinds
//! - [`FixedEstimated`] - User-pinned value
//! - [`FrequentistEstimated`] - Point estimate with optional metadata
//! - [`BayesianEstimated`] - Posterior draws, optionally split into chains
//! - [`ChainStacker`] - Join point for chains sampled in parallel
//! - [`PosteriorSummary`] - Elementwise mean, spread and quantiles

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrometrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimated;
mod layout;
mod ops;
mod stacker;
mod summary;
mod variants;

pub use estimated::{Estimated, EstimationKind};
pub use layout::{SampleIndex, SampleLayout};
pub use ops::BinaryOp;
pub use stacker::ChainStacker;
pub use summary::PosteriorSummary;
pub use variants::{BayesianEstimated, FixedEstimated, FrequentistEstimated};
