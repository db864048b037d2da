//! Vector autoregression for macrometrics.
//!
//! This crate provides a VAR model whose parameters may be pinned,
//! point-estimated or sampled:
//!
//! - [`VarModel`] - Validated, immutable model over shared observation data
//! - [`VarParameters`] - Concrete parameters of one draw, with one-step evaluation
//! - [`VarConfig`] - Spacing and covariance settings used at construction
//! - [`check_covariance`] - Symmetric positive semi-definite check

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrometrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod model;
mod params;
mod validate;

pub use config::{DEFAULT_COVARIANCE_TOLERANCE, VarConfig};
pub use model::VarModel;
pub use params::VarParameters;
pub use validate::check_covariance;
