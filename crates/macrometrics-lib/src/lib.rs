//! Econometric models over fixed, frequentist and Bayesian parameter estimates.
//!
//! This is a facade crate that re-exports functionality from the macrometrics
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use macrometrics_lib::prelude::*;
//! use ndarray::{Array2, array};
//!
//! # fn main() -> Result<()> {
//! // Two chains of posterior draws for the intercept of a univariate VAR(1).
//! let b0: Estimated = ChainStacker::new()
//!     .with_chain(array![[0.1, 0.2, 0.3]])?
//!     .with_chain(array![[0.2, 0.3, 0.4]])?
//!     .finish(())?
//!     .into();
//!
//! let data = Arc::new(TimeSeriesFrame::new(vec![0_i64, 1, 2], Array2::zeros((3, 1)))?);
//! let model = VarModel::new(
//!     1,
//!     1,
//!     Estimated::fixed(array![[0.5]]),
//!     b0,
//!     Estimated::fixed(array![[1.0]]),
//!     data,
//! )?;
//!
//! for chain in 0..2 {
//!     for draw in 0..3 {
//!         let y = model.step(SampleIndex::new(draw, chain), array![1.0].view(), array![0.0].view())?;
//!         assert!(y[0] > 0.5);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrometrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use macrometrics_types::*;

// Re-export estimated quantities
pub use macrometrics_estimated::{
    BayesianEstimated, BinaryOp, ChainStacker, Estimated, EstimationKind, FixedEstimated,
    FrequentistEstimated, PosteriorSummary, SampleIndex, SampleLayout,
};

// Re-export the VAR model
#[cfg(feature = "var")]
pub use macrometrics_var::{
    DEFAULT_COVARIANCE_TOLERANCE, VarConfig, VarModel, VarParameters, check_covariance,
};

/// Prelude module for convenient imports.
///
/// ```
/// use macrometrics_lib::prelude::*;
/// ```
pub mod prelude {
    pub use macrometrics_types::{
        Frequency, MacroError, Result, SpacingConfig, SpacingError, TimeSeries, TimeSeriesFrame,
        Timestamp,
    };

    pub use macrometrics_estimated::{
        ChainStacker, Estimated, EstimationKind, PosteriorSummary, SampleIndex, SampleLayout,
    };

    #[cfg(feature = "var")]
    pub use macrometrics_var::{VarConfig, VarModel, VarParameters};
}
