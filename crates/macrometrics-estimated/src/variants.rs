//! The three kinds of estimated quantity.

use macrometrics_types::{MacroError, Result};
use ndarray::{Array, ArrayD, ArrayViewD, ArrayViewMutD, Axis, Dimension};

use crate::{SampleIndex, SampleLayout};

/// A quantity pinned to a known value.
///
/// No longer estimated in the statistical sense, but usable anywhere an
/// estimated quantity is expected. Carries no metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEstimated {
    value: ArrayD<f64>,
}

impl FixedEstimated {
    /// Creates a fixed quantity.
    #[must_use]
    pub fn new<D: Dimension>(value: Array<f64, D>) -> Self {
        Self {
            value: value.into_dyn(),
        }
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &ArrayD<f64> {
        &self.value
    }
}

impl<D: Dimension> From<Array<f64, D>> for FixedEstimated {
    fn from(value: Array<f64, D>) -> Self {
        Self::new(value)
    }
}

/// A point estimate with optional estimator-specific metadata.
///
/// What the metadata holds (standard errors, a covariance matrix, fit
/// statistics) is up to the estimator that produced the quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentistEstimated<M = ()> {
    value: ArrayD<f64>,
    metadata: Option<M>,
}

impl<M> FrequentistEstimated<M> {
    /// Creates a point estimate without metadata.
    #[must_use]
    pub fn new<D: Dimension>(value: Array<f64, D>) -> Self {
        Self {
            value: value.into_dyn(),
            metadata: None,
        }
    }

    /// Creates a point estimate with metadata attached.
    #[must_use]
    pub fn with_metadata<D: Dimension>(value: Array<f64, D>, metadata: M) -> Self {
        Self {
            value: value.into_dyn(),
            metadata: Some(metadata),
        }
    }

    /// Returns the point estimate.
    #[must_use]
    pub const fn value(&self) -> &ArrayD<f64> {
        &self.value
    }

    /// Returns the metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }

    pub(crate) const fn from_parts(value: ArrayD<f64>, metadata: Option<M>) -> Self {
        Self { value, metadata }
    }

    pub(crate) fn into_parts(self) -> (ArrayD<f64>, Option<M>) {
        (self.value, self.metadata)
    }
}

/// A quantity represented by posterior draws.
///
/// The value holds the parameter axes first, then a draw axis, then a chain
/// axis when several chains were stacked. Instances are always complete;
/// use [`ChainStacker`](crate::ChainStacker) to assemble chains run in
/// parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianEstimated<M = ()> {
    value: ArrayD<f64>,
    layout: SampleLayout,
    metadata: Option<M>,
}

impl<M> BayesianEstimated<M> {
    /// Creates a single-chain quantity whose trailing axis indexes draws.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `value` has no axes or
    /// no draws.
    pub fn new<D: Dimension>(value: Array<f64, D>, metadata: M) -> Result<Self> {
        let value = value.into_dyn();
        let draws = value.shape().last().copied().unwrap_or(0);
        Self::with_layout(value, SampleLayout::flat(draws), Some(metadata))
    }

    /// Creates a quantity with explicit sample axes.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if the trailing axes of
    /// `value` do not match `layout`, or if the layout is empty.
    pub fn with_layout<D: Dimension>(
        value: Array<f64, D>,
        layout: SampleLayout,
        metadata: Option<M>,
    ) -> Result<Self> {
        let value = value.into_dyn();
        let dims = layout.dims();
        if layout.num_samples() == 0 {
            return Err(MacroError::dimension(
                "posterior draws",
                "at least one draw",
                layout,
            ));
        }
        if value.ndim() < dims.len() || value.shape()[value.ndim() - dims.len()..] != dims[..] {
            return Err(MacroError::shape("sample axes", &dims, value.shape()));
        }
        Ok(Self {
            value,
            layout,
            metadata,
        })
    }

    /// Returns the full draw array.
    #[must_use]
    pub const fn value(&self) -> &ArrayD<f64> {
        &self.value
    }

    /// Returns the metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }

    /// Returns the sample axes.
    #[must_use]
    pub const fn layout(&self) -> SampleLayout {
        self.layout
    }

    /// Shape of a single draw.
    #[must_use]
    pub fn param_shape(&self) -> &[usize] {
        &self.value.shape()[..self.value.ndim() - self.layout.axes()]
    }

    /// Returns one draw, or None if `index` is out of range.
    #[must_use]
    pub fn sample(&self, index: SampleIndex) -> Option<ArrayViewD<'_, f64>> {
        self.layout.flat_index(index)?;
        Some(sample_view(self.value.view(), self.layout, index))
    }

    pub(crate) fn from_parts(value: ArrayD<f64>, layout: SampleLayout, metadata: Option<M>) -> Self {
        Self {
            value,
            layout,
            metadata,
        }
    }

    pub(crate) fn into_parts(self) -> (ArrayD<f64>, SampleLayout, Option<M>) {
        (self.value, self.layout, self.metadata)
    }
}

/// Slices one draw out of a full sample array. `index` must be in range.
pub(crate) fn sample_view(
    value: ArrayViewD<'_, f64>,
    layout: SampleLayout,
    index: SampleIndex,
) -> ArrayViewD<'_, f64> {
    let last = value.ndim() - 1;
    if layout.is_chained() {
        value
            .index_axis_move(Axis(last), index.chain)
            .index_axis_move(Axis(last - 1), index.draw)
    } else {
        value.index_axis_move(Axis(last), index.draw)
    }
}

/// Mutable counterpart of [`sample_view`].
pub(crate) fn sample_view_mut(
    value: ArrayViewMutD<'_, f64>,
    layout: SampleLayout,
    index: SampleIndex,
) -> ArrayViewMutD<'_, f64> {
    let last = value.ndim() - 1;
    if layout.is_chained() {
        value
            .index_axis_move(Axis(last), index.chain)
            .index_axis_move(Axis(last - 1), index.draw)
    } else {
        value.index_axis_move(Axis(last), index.draw)
    }
}
