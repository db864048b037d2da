//! Assembly of posterior draws from several sampling chains.

use macrometrics_types::{MacroError, Result};
use ndarray::{Array, ArrayD, ArrayViewD, Axis, Dimension, concatenate, stack};

use crate::{BayesianEstimated, SampleLayout};

/// Collects per-chain draw arrays into one [`BayesianEstimated`].
///
/// Each chain contributes an array of shape `param ⧺ [draws]`. Chains may be
/// produced in parallel; the stacker is the single join point, and the
/// finished quantity only exists once every chain has been pushed.
#[derive(Debug, Default)]
pub struct ChainStacker {
    chains: Vec<ArrayD<f64>>,
}

impl ChainStacker {
    /// Creates an empty stacker.
    #[must_use]
    pub const fn new() -> Self {
        Self { chains: Vec::new() }
    }

    /// Adds the draws of one chain.
    ///
    /// # Errors
    ///
    /// - [`MacroError::DimensionMismatch`] if the array has no draw axis or
    ///   no draws.
    /// - [`MacroError::ShapeMismatch`] if its shape differs from the chains
    ///   already pushed.
    pub fn push<D: Dimension>(&mut self, chain: Array<f64, D>) -> Result<()> {
        let chain = chain.into_dyn();
        let draws = chain.shape().last().copied().unwrap_or(0);
        if draws == 0 {
            return Err(MacroError::dimension(
                "chain draws",
                "at least one draw",
                format!("{:?}", chain.shape()),
            ));
        }
        if let Some(first) = self.chains.first()
            && first.shape() != chain.shape()
        {
            return Err(MacroError::ShapeMismatch {
                left: first.shape().to_vec(),
                right: chain.shape().to_vec(),
            });
        }
        self.chains.push(chain);
        Ok(())
    }

    /// Adds a chain and returns the stacker, for chaining calls.
    ///
    /// # Errors
    ///
    /// See [`Self::push`].
    pub fn with_chain<D: Dimension>(mut self, chain: Array<f64, D>) -> Result<Self> {
        self.push(chain)?;
        Ok(self)
    }

    /// Number of chains pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no chain has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Stacks the chains along a new trailing chain axis.
    ///
    /// The result has shape `param ⧺ [draws, chains]`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidArgument`] if no chain was pushed.
    pub fn finish<M>(self, metadata: M) -> Result<BayesianEstimated<M>> {
        let (views, draws) = self.views()?;
        let chains = views.len();
        let axis = Axis(views[0].ndim());
        let value = stack(axis, &views).map_err(|_| self.mismatch())?;
        tracing::debug!(chains, draws, "stacked posterior chains");
        Ok(BayesianEstimated::from_parts(
            value,
            SampleLayout::chained(draws, chains),
            Some(metadata),
        ))
    }

    /// Pools the chains by concatenating their draws.
    ///
    /// The result has shape `param ⧺ [draws * chains]`, chain-major.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidArgument`] if no chain was pushed.
    pub fn finish_pooled<M>(self, metadata: M) -> Result<BayesianEstimated<M>> {
        let (views, draws) = self.views()?;
        let chains = views.len();
        let axis = Axis(views[0].ndim() - 1);
        let value = concatenate(axis, &views).map_err(|_| self.mismatch())?;
        tracing::debug!(chains, draws, "pooled posterior chains");
        Ok(BayesianEstimated::from_parts(
            value,
            SampleLayout::flat(draws * chains),
            Some(metadata),
        ))
    }

    fn views(&self) -> Result<(Vec<ArrayViewD<'_, f64>>, usize)> {
        let Some(first) = self.chains.first() else {
            return Err(MacroError::InvalidArgument(
                "cannot build a posterior quantity from zero chains".to_string(),
            ));
        };
        let draws = first.shape().last().copied().unwrap_or(0);
        Ok((self.chains.iter().map(ArrayD::view).collect(), draws))
    }

    fn mismatch(&self) -> MacroError {
        let shape = |i: usize| self.chains.get(i).map(|c| c.shape().to_vec()).unwrap_or_default();
        MacroError::ShapeMismatch {
            left: shape(0),
            right: shape(self.chains.len().saturating_sub(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Estimated, SampleIndex};
    use ndarray::{Array2, array};

    fn chain(offset: f64) -> Array2<f64> {
        // param shape [2], 3 draws
        Array2::from_shape_fn((2, 3), |(p, d)| offset + (10 * p + d) as f64)
    }

    #[test]
    fn test_stack_appends_chain_axis() {
        let mut stacker = ChainStacker::new();
        for k in 0..4 {
            stacker.push(chain(100.0 * k as f64)).unwrap();
        }
        assert_eq!(stacker.len(), 4);

        let est = stacker.finish("4 chains").unwrap();
        assert_eq!(est.value().shape(), &[2, 3, 4]);
        assert_eq!(est.layout(), SampleLayout::chained(3, 4));
        assert_eq!(est.metadata(), Some(&"4 chains"));

        let draw = est.sample(SampleIndex::new(1, 2)).unwrap();
        assert_eq!(draw, array![201.0, 211.0].into_dyn());
    }

    #[test]
    fn test_pooled_concatenates_draws() {
        let est = ChainStacker::new()
            .with_chain(chain(0.0))
            .unwrap()
            .with_chain(chain(100.0))
            .unwrap()
            .finish_pooled(())
            .unwrap();

        assert_eq!(est.value().shape(), &[2, 6]);
        assert_eq!(est.layout(), SampleLayout::flat(6));
        assert_eq!(
            est.sample(SampleIndex::draw(4)).unwrap(),
            array![101.0, 111.0].into_dyn()
        );
    }

    #[test]
    fn test_chain_shape_mismatch() {
        let mut stacker = ChainStacker::new();
        stacker.push(chain(0.0)).unwrap();
        let err = stacker.push(Array2::<f64>::zeros((2, 4))).unwrap_err();
        assert!(matches!(err, MacroError::ShapeMismatch { .. }));
        assert_eq!(stacker.len(), 1);
    }

    #[test]
    fn test_empty_stacker() {
        let stacker = ChainStacker::new();
        assert!(stacker.is_empty());
        assert!(matches!(
            stacker.finish(()),
            Err(MacroError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_chain_without_draws() {
        let mut stacker = ChainStacker::new();
        assert!(stacker.push(ndarray::arr0(1.0)).is_err());
        assert!(stacker.push(Array2::<f64>::zeros((2, 0))).is_err());
    }

    #[test]
    fn test_stacked_quantity_in_arithmetic() {
        let stacked: Estimated = ChainStacker::new()
            .with_chain(chain(0.0))
            .unwrap()
            .with_chain(chain(0.0))
            .unwrap()
            .finish(())
            .unwrap()
            .into();
        let pooled: Estimated = ChainStacker::new()
            .with_chain(chain(0.0))
            .unwrap()
            .with_chain(chain(0.0))
            .unwrap()
            .finish_pooled(())
            .unwrap()
            .into();

        assert_eq!(stacked.num_samples(), pooled.num_samples());
        assert!(matches!(
            stacked.try_add(&pooled),
            Err(MacroError::ShapeMismatch { .. })
        ));
        assert_eq!(stacked.try_add(&stacked).unwrap().shape(), &[2, 3, 2]);
    }
}
