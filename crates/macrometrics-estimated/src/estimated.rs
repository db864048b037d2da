//! The `Estimated` sum type and its shared read interface.

use macrometrics_types::{MacroError, Result};
use ndarray::{Array, ArrayD, ArrayViewD, Dimension, IxDyn};

use crate::variants::sample_view;
use crate::{BayesianEstimated, FixedEstimated, FrequentistEstimated, SampleIndex, SampleLayout};

/// How a quantity's value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimationKind {
    /// Pinned by the user.
    Fixed,
    /// Point estimate.
    Frequentist,
    /// Posterior draws.
    Bayesian,
}

impl EstimationKind {
    /// Returns the kind as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Frequentist => "frequentist",
            Self::Bayesian => "bayesian",
        }
    }
}

impl std::fmt::Display for EstimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A model quantity, independent of how it was estimated.
///
/// Any statistic or parameter of a model is stored as an `Estimated` so the
/// model has the same structure whatever the estimation method. Reads are
/// forwarded to the underlying array; arithmetic follows the composition
/// rules documented on [`Estimated::try_combine`].
///
/// `M` is the metadata type attached by the estimator (sampler warnings,
/// standard errors, ...). It is never interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimated<M = ()> {
    /// A pinned value.
    Fixed(FixedEstimated),
    /// A point estimate.
    Frequentist(FrequentistEstimated<M>),
    /// Posterior draws.
    Bayesian(BayesianEstimated<M>),
}

impl<M> Estimated<M> {
    /// Creates a fixed quantity.
    #[must_use]
    pub fn fixed<D: Dimension>(value: Array<f64, D>) -> Self {
        Self::Fixed(FixedEstimated::new(value))
    }

    /// Creates a point estimate without metadata.
    #[must_use]
    pub fn frequentist<D: Dimension>(value: Array<f64, D>) -> Self {
        Self::Frequentist(FrequentistEstimated::new(value))
    }

    /// Creates a single-chain posterior quantity; the trailing axis indexes draws.
    ///
    /// # Errors
    ///
    /// See [`BayesianEstimated::new`].
    pub fn bayesian<D: Dimension>(draws: Array<f64, D>, metadata: M) -> Result<Self> {
        BayesianEstimated::new(draws, metadata).map(Self::Bayesian)
    }

    /// Returns how the quantity was obtained.
    #[must_use]
    pub const fn kind(&self) -> EstimationKind {
        match self {
            Self::Fixed(_) => EstimationKind::Fixed,
            Self::Frequentist(_) => EstimationKind::Frequentist,
            Self::Bayesian(_) => EstimationKind::Bayesian,
        }
    }

    /// Returns the underlying array.
    ///
    /// For Bayesian quantities this includes the trailing sample axes.
    #[must_use]
    pub const fn value(&self) -> &ArrayD<f64> {
        match self {
            Self::Fixed(f) => f.value(),
            Self::Frequentist(f) => f.value(),
            Self::Bayesian(b) => b.value(),
        }
    }

    /// Returns the attached metadata.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::UnsupportedOperation`] for fixed quantities and
    /// for any quantity without metadata.
    pub fn metadata(&self) -> Result<&M> {
        let metadata = match self {
            Self::Fixed(_) => None,
            Self::Frequentist(f) => f.metadata(),
            Self::Bayesian(b) => b.metadata(),
        };
        metadata.ok_or(MacroError::UnsupportedOperation {
            operation: "metadata",
            kind: self.kind().as_str(),
        })
    }

    /// Returns the sample axes of a Bayesian quantity.
    #[must_use]
    pub const fn layout(&self) -> Option<SampleLayout> {
        match self {
            Self::Bayesian(b) => Some(b.layout()),
            _ => None,
        }
    }

    /// Returns true if the value holds posterior draws.
    #[must_use]
    pub const fn is_sampled(&self) -> bool {
        matches!(self, Self::Bayesian(_))
    }

    /// Shape of the parameter itself, excluding sample axes.
    #[must_use]
    pub fn param_shape(&self) -> &[usize] {
        match self {
            Self::Bayesian(b) => b.param_shape(),
            _ => self.value().shape(),
        }
    }

    /// Number of realizations: 1 for point quantities, draws times chains otherwise.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.layout().map_or(1, |l| l.num_samples())
    }

    /// Returns one realization of the parameter.
    ///
    /// Point quantities return their value for any index.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `index` is outside the
    /// sample layout.
    pub fn sample(&self, index: SampleIndex) -> Result<ArrayViewD<'_, f64>> {
        match self {
            Self::Bayesian(b) => b.sample(index).ok_or_else(|| {
                MacroError::dimension(
                    "sample index",
                    b.layout(),
                    format!("draw {} of chain {}", index.draw, index.chain),
                )
            }),
            _ => Ok(self.value().view()),
        }
    }

    /// Iterates over all realizations, chain-major.
    pub fn samples(&self) -> impl Iterator<Item = ArrayViewD<'_, f64>> + '_ {
        (0..self.num_samples()).map(move |flat| match self {
            Self::Bayesian(b) => {
                let index = b.layout().sample_index(flat);
                sample_view(b.value().view(), b.layout(), index)
            }
            _ => self.value().view(),
        })
    }

    /// Shape of the underlying array.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.value().shape()
    }

    /// Number of axes of the underlying array.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.value().ndim()
    }

    /// Number of elements of the underlying array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value().len()
    }

    /// Returns true if the underlying array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// Element of the underlying array at `index`.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<&f64> {
        self.value().get(index)
    }

    /// Iterates over the underlying array in logical order.
    pub fn iter(&self) -> ndarray::iter::Iter<'_, f64, IxDyn> {
        self.value().iter()
    }
}

impl<M> From<FixedEstimated> for Estimated<M> {
    fn from(value: FixedEstimated) -> Self {
        Self::Fixed(value)
    }
}

impl<M> From<FrequentistEstimated<M>> for Estimated<M> {
    fn from(value: FrequentistEstimated<M>) -> Self {
        Self::Frequentist(value)
    }
}

impl<M> From<BayesianEstimated<M>> for Estimated<M> {
    fn from(value: BayesianEstimated<M>) -> Self {
        Self::Bayesian(value)
    }
}

impl<'a, M> IntoIterator for &'a Estimated<M> {
    type Item = &'a f64;
    type IntoIter = ndarray::iter::Iter<'a, f64, IxDyn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
