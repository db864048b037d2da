//! Parameters of one realization of a VAR model.

use macrometrics_estimated::{Estimated, SampleIndex};
use macrometrics_types::{MacroError, Result};
use ndarray::{Array1, Array2, ArrayView1, Dimension, Ix1, Ix2};

/// Concrete parameter arrays for a single draw (or the point estimate).
#[derive(Debug, Clone, PartialEq)]
pub struct VarParameters {
    /// Intercept, length `n`.
    pub b0: Array1<f64>,
    /// Lag coefficients, `n × n·p`.
    pub b: Array2<f64>,
    /// Disturbance covariance, `n × n`.
    pub sigma: Array2<f64>,
}

impl VarParameters {
    /// Number of variables.
    #[must_use]
    pub fn n(&self) -> usize {
        self.b0.len()
    }

    /// Evaluates `y_t = b0 + B·ỹ_{t-1} + ε_t`.
    ///
    /// `lags` is the stacked history `[y_{t-1}, …, y_{t-p}]`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `lags` does not have
    /// length `n·p` or `eps` does not have length `n`.
    pub fn step(&self, lags: ArrayView1<'_, f64>, eps: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        if lags.len() != self.b.ncols() {
            return Err(MacroError::dimension("lagged state", self.b.ncols(), lags.len()));
        }
        if eps.len() != self.n() {
            return Err(MacroError::dimension("disturbance", self.n(), eps.len()));
        }
        Ok(&self.b0 + &self.b.dot(&lags) + &eps)
    }

    /// Deterministic part of the step, `b0 + B·ỹ_{t-1}`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `lags` has the wrong length.
    pub fn predict(&self, lags: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        self.step(lags, Array1::zeros(self.n()).view())
    }

    pub(crate) fn realize<M>(
        b: &Estimated<M>,
        b0: &Estimated<M>,
        sigma: &Estimated<M>,
        index: SampleIndex,
    ) -> Result<Self> {
        Ok(Self {
            b0: realized::<M, Ix1>("b0", b0, index)?,
            b: realized::<M, Ix2>("B", b, index)?,
            sigma: realized::<M, Ix2>("Sigma", sigma, index)?,
        })
    }
}

fn realized<M, D: Dimension>(
    context: &'static str,
    quantity: &Estimated<M>,
    index: SampleIndex,
) -> Result<ndarray::Array<f64, D>> {
    quantity
        .sample(index)?
        .into_dimensionality::<D>()
        .map(|view| view.to_owned())
        .map_err(|_| MacroError::dimension(context, D::NDIM.unwrap_or(0), quantity.param_shape().len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn params() -> VarParameters {
        VarParameters {
            b0: array![1.0, -1.0],
            b: array![[0.5, 0.1], [0.2, 0.3]],
            sigma: Array2::eye(2),
        }
    }

    #[test]
    fn test_step() {
        let y = params()
            .step(array![2.0, 4.0].view(), array![0.1, 0.0].view())
            .unwrap();
        assert_relative_eq!(y[0], 1.0 + 1.0 + 0.4 + 0.1);
        assert_relative_eq!(y[1], -1.0 + 0.4 + 1.2);
    }

    #[test]
    fn test_predict_matches_zero_shock() {
        let p = params();
        let lags = array![1.0, 1.0];
        assert_eq!(
            p.predict(lags.view()).unwrap(),
            p.step(lags.view(), array![0.0, 0.0].view()).unwrap()
        );
    }

    #[test]
    fn test_step_rejects_bad_lengths() {
        let p = params();
        assert!(matches!(
            p.step(array![1.0].view(), array![0.0, 0.0].view()),
            Err(MacroError::DimensionMismatch { context: "lagged state", .. })
        ));
        assert!(matches!(
            p.step(array![1.0, 1.0].view(), array![0.0].view()),
            Err(MacroError::DimensionMismatch { context: "disturbance", .. })
        ));
    }

    #[test]
    fn test_zero_lag_order() {
        let p = VarParameters {
            b0: array![3.0],
            b: Array2::zeros((1, 0)),
            sigma: Array2::eye(1),
        };
        let y = p.step(Array1::zeros(0).view(), array![0.5].view()).unwrap();
        assert_eq!(y, array![3.5]);
    }

    #[test]
    fn test_realize_picks_draw() {
        let b: Estimated = Estimated::fixed(Array2::<f64>::eye(1));
        let b0 = Estimated::bayesian(array![[1.0, 2.0, 3.0]], ()).unwrap();
        let sigma = Estimated::fixed(Array2::<f64>::eye(1));

        let p = VarParameters::realize(&b, &b0, &sigma, SampleIndex::draw(2)).unwrap();
        assert_eq!(p.b0, array![3.0]);
        assert_eq!(p.b, Array2::<f64>::eye(1));
        assert!(VarParameters::realize(&b, &b0, &sigma, SampleIndex::draw(3)).is_err());
    }
}
