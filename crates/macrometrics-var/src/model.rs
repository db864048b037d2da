//! The VAR model entity.

use std::sync::Arc;

use macrometrics_estimated::{Estimated, SampleIndex, SampleLayout};
use macrometrics_types::{MacroError, Result, TimeSeries, check_series_spacing};
use ndarray::{Array1, Array2, ArrayView1, Axis, Slice};

use crate::validate;
use crate::{VarConfig, VarParameters};

/// A vector autoregression of order `p` over `n` variables:
///
/// ```text
/// y_t = b0 + B·[y_{t-1}, …, y_{t-p}] + ε_t,    ε_t ~ (0, Sigma)
/// ```
///
/// The parameters are [`Estimated`] quantities, so the same model holds
/// pinned values, point estimates or posterior draws. A model is immutable;
/// re-estimating produces a new one. The observation data is shared through
/// an [`Arc`] and only read.
#[derive(Debug)]
pub struct VarModel<D, M = ()> {
    n: usize,
    p: usize,
    b: Estimated<M>,
    b0: Estimated<M>,
    sigma: Estimated<M>,
    data: Arc<D>,
    interval: Option<f64>,
    layout: Option<SampleLayout>,
    config: VarConfig,
}

impl<D: TimeSeries, M> VarModel<D, M> {
    /// Builds a model with the default [`VarConfig`].
    ///
    /// # Errors
    ///
    /// See [`Self::with_config`].
    pub fn new(
        n: usize,
        p: usize,
        b: Estimated<M>,
        b0: Estimated<M>,
        sigma: Estimated<M>,
        data: Arc<D>,
    ) -> Result<Self> {
        Self::with_config(n, p, b, b0, sigma, data, VarConfig::default())
    }

    /// Builds a model, validating every structural invariant.
    ///
    /// # Errors
    ///
    /// - [`MacroError::DimensionMismatch`] if `n` is zero, `p` is too large
    ///   to index, a parameter has
    ///   the wrong shape, or the data has too few observations or the wrong
    ///   dimension.
    /// - [`MacroError::ShapeMismatch`] if sampled parameters disagree on
    ///   their draw/chain layout.
    /// - [`MacroError::Spacing`] if a row has no timestamp, or the
    ///   observations are not regularly spaced in chronological order.
    /// - [`MacroError::InvalidCovariance`] if a draw of `sigma` is not
    ///   symmetric positive semi-definite.
    /// - [`MacroError::InvalidArgument`] if the config is out of range.
    #[tracing::instrument(level = "debug", skip(b, b0, sigma, data, config), fields(observations = data.len()))]
    pub fn with_config(
        n: usize,
        p: usize,
        b: Estimated<M>,
        b0: Estimated<M>,
        sigma: Estimated<M>,
        data: Arc<D>,
        config: VarConfig,
    ) -> Result<Self> {
        config.validate()?;
        if n == 0 {
            return Err(MacroError::dimension("n", "at least one variable", n));
        }

        let lagged = n
            .checked_mul(p)
            .ok_or_else(|| MacroError::dimension("p", format!("n·p to fit in usize for n = {n}"), p))?;
        let min_len = p
            .checked_add(1)
            .ok_or_else(|| MacroError::dimension("p", "p + 1 to fit in usize", p))?;

        validate::param_shape("B", &b, &[n, lagged])?;
        validate::param_shape("b0", &b0, &[n])?;
        validate::param_shape("Sigma", &sigma, &[n, n])?;
        let layout = validate::common_layout(&[&b, &b0, &sigma])?;

        if data.len() < min_len {
            return Err(MacroError::dimension(
                "observations",
                format!("at least {min_len}"),
                data.len(),
            ));
        }
        if data.dim() != n {
            return Err(MacroError::dimension("observation dimension", n, data.dim()));
        }

        let interval = check_series_spacing(&*data, &config.spacing)?;

        if config.check_covariance {
            validate::covariance_draws(&sigma, config.covariance_tolerance)?;
        }

        tracing::debug!(
            n,
            p,
            observations = data.len(),
            b = %b.kind(),
            b0 = %b0.kind(),
            sigma = %sigma.kind(),
            "constructed VAR model"
        );

        Ok(Self {
            n,
            p,
            b,
            b0,
            sigma,
            data,
            interval,
            layout,
            config,
        })
    }

    /// Number of variables.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Lag order.
    #[must_use]
    pub const fn p(&self) -> usize {
        self.p
    }

    /// Lag coefficients, parameter shape `n × n·p`.
    #[must_use]
    pub const fn b(&self) -> &Estimated<M> {
        &self.b
    }

    /// Intercept, parameter shape `n`.
    #[must_use]
    pub const fn b0(&self) -> &Estimated<M> {
        &self.b0
    }

    /// Disturbance covariance, parameter shape `n × n`.
    #[must_use]
    pub const fn sigma(&self) -> &Estimated<M> {
        &self.sigma
    }

    /// The shared observation data.
    #[must_use]
    pub const fn data(&self) -> &Arc<D> {
        &self.data
    }

    /// Interval between consecutive observations, or None for a single one.
    #[must_use]
    pub const fn interval(&self) -> Option<f64> {
        self.interval
    }

    /// The settings the model was built with.
    #[must_use]
    pub const fn config(&self) -> &VarConfig {
        &self.config
    }

    /// Draw/chain layout shared by the sampled parameters, if any.
    #[must_use]
    pub const fn layout(&self) -> Option<SampleLayout> {
        self.layout
    }

    /// Number of parameter realizations: 1 unless some parameter is sampled.
    #[must_use]
    pub const fn num_samples(&self) -> usize {
        match self.layout {
            Some(layout) => layout.num_samples(),
            None => 1,
        }
    }

    /// Concrete parameters for one draw; point parameters ignore `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `sample` is outside the
    /// model's layout.
    pub fn realize(&self, sample: SampleIndex) -> Result<VarParameters> {
        VarParameters::realize(&self.b, &self.b0, &self.sigma, sample)
    }

    /// Evaluates `y_t = b0 + B·ỹ_{t-1} + ε_t` for one draw.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `sample` is out of range
    /// or `lags`/`eps` have the wrong length.
    pub fn step(
        &self,
        sample: SampleIndex,
        lags: ArrayView1<'_, f64>,
        eps: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>> {
        self.realize(sample)?.step(lags, eps)
    }

    /// Stacked lag history `[y_{t-1}, …, y_{t-p}]` from the model's data.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] unless `p <= t < len`.
    pub fn lag_history(&self, t: usize) -> Result<Array1<f64>> {
        let len = self.data.len();
        if t < self.p || t >= len {
            return Err(MacroError::dimension(
                "lag history",
                format!("{} <= t < {len}", self.p),
                t,
            ));
        }

        let mut lags = Array1::zeros(self.n * self.p);
        for k in 1..=self.p {
            let y = self.observation(t - k)?;
            lags.slice_axis_mut(Axis(0), Slice::from((k - 1) * self.n..k * self.n))
                .assign(&y);
        }
        Ok(lags)
    }

    /// In-sample residuals `y_t - b0 - B·ỹ_{t-1}` for `t = p..len`.
    ///
    /// Row `i` of the result belongs to observation `p + i`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if `sample` is out of range.
    pub fn residuals(&self, sample: SampleIndex) -> Result<Array2<f64>> {
        let params = self.realize(sample)?;
        let len = self.data.len();
        let mut residuals = Array2::zeros((len - self.p, self.n));
        for (row, t) in (self.p..len).enumerate() {
            let fitted = params.predict(self.lag_history(t)?.view())?;
            let y = self.observation(t)?;
            residuals.row_mut(row).assign(&(&y - &fitted));
        }
        Ok(residuals)
    }

    fn observation(&self, t: usize) -> Result<ArrayView1<'_, f64>> {
        self.data
            .observation(t)
            .ok_or_else(|| MacroError::dimension("observation index", self.data.len(), t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrometrics_types::{SpacingError, TimeSeriesFrame};
    use ndarray::{Array3, array};

    fn frame(index: Vec<f64>, values: Array2<f64>) -> Arc<TimeSeriesFrame<f64>> {
        Arc::new(TimeSeriesFrame::new(index, values).unwrap())
    }

    fn identity_model(data: Arc<TimeSeriesFrame<f64>>) -> Result<VarModel<TimeSeriesFrame<f64>>> {
        VarModel::new(
            2,
            1,
            Estimated::fixed(Array2::eye(2)),
            Estimated::fixed(Array1::zeros(2)),
            Estimated::fixed(Array2::eye(2)),
            data,
        )
    }

    #[test]
    fn test_accessors() {
        let data = frame(vec![0.0, 1.0, 2.0], Array2::zeros((3, 2)));
        let model = identity_model(Arc::clone(&data)).unwrap();

        assert_eq!(model.n(), 2);
        assert_eq!(model.p(), 1);
        assert_eq!(model.b().param_shape(), &[2, 2]);
        assert_eq!(model.b0().param_shape(), &[2]);
        assert_eq!(model.sigma().param_shape(), &[2, 2]);
        assert_eq!(model.interval(), Some(1.0));
        assert_eq!(model.num_samples(), 1);
        assert!(model.layout().is_none());
        assert_eq!(model.config(), &VarConfig::default());
        assert!(Arc::ptr_eq(model.data(), &data));
    }

    #[test]
    fn test_rejects_zero_variables() {
        let data = frame(vec![0.0, 1.0], Array2::zeros((2, 0)));
        let result: Result<VarModel<_>> = VarModel::new(
            0,
            1,
            Estimated::fixed(Array2::zeros((0, 0))),
            Estimated::fixed(Array1::zeros(0)),
            Estimated::fixed(Array2::zeros((0, 0))),
            data,
        );
        assert!(matches!(
            result,
            Err(MacroError::DimensionMismatch { context: "n", .. })
        ));
    }

    #[test]
    fn test_rejects_unrepresentable_lag_order() {
        let data = frame(vec![0.0, 1.0, 2.0], Array2::zeros((3, 2)));
        let build = |p| {
            VarModel::<_, ()>::new(
                2,
                p,
                Estimated::fixed(Array2::eye(2)),
                Estimated::fixed(Array1::zeros(2)),
                Estimated::fixed(Array2::eye(2)),
                Arc::clone(&data),
            )
        };

        assert!(matches!(
            build(usize::MAX),
            Err(MacroError::DimensionMismatch { context: "p", .. })
        ));
        assert!(matches!(
            build(usize::MAX / 2 + 1),
            Err(MacroError::DimensionMismatch { context: "p", .. })
        ));
    }

    #[test]
    fn test_rejects_short_data() {
        let data = frame(vec![0.0], Array2::zeros((1, 2)));
        assert!(matches!(
            identity_model(data),
            Err(MacroError::DimensionMismatch { context: "observations", .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_observation_dimension() {
        let data = frame(vec![0.0, 1.0, 2.0], Array2::zeros((3, 3)));
        assert!(matches!(
            identity_model(data),
            Err(MacroError::DimensionMismatch { context: "observation dimension", .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_data() {
        let data = frame(vec![2.0, 1.0, 0.0], Array2::zeros((3, 2)));
        assert!(matches!(
            identity_model(data),
            Err(MacroError::Spacing(SpacingError::NotChronological { index: 0 }))
        ));
    }

    #[test]
    fn test_rejects_mixed_layouts() {
        let data = frame(vec![0.0, 1.0, 2.0], Array2::zeros((3, 1)));
        let result = VarModel::new(
            1,
            1,
            Estimated::bayesian(Array3::<f64>::zeros((1, 1, 4)), ()).unwrap(),
            Estimated::bayesian(Array2::<f64>::zeros((1, 5)), ()).unwrap(),
            Estimated::fixed(Array2::eye(1)),
            data,
        );
        assert!(matches!(result, Err(MacroError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_covariance_check_can_be_disabled() {
        let data = frame(vec![0.0, 1.0, 2.0], Array2::zeros((3, 1)));
        let sigma = || Estimated::fixed(array![[-1.0]]);
        let build = |config| {
            VarModel::<_, ()>::with_config(
                1,
                1,
                Estimated::fixed(array![[0.5]]),
                Estimated::fixed(array![0.0]),
                sigma(),
                Arc::clone(&data),
                config,
            )
        };

        assert!(matches!(
            build(VarConfig::default()),
            Err(MacroError::InvalidCovariance { sample: 0, .. })
        ));
        assert!(build(VarConfig::default().without_covariance_check()).is_ok());
    }

    #[test]
    fn test_lag_history_order() {
        // y_t[j] = 10t + j
        let values = Array2::from_shape_fn((4, 2), |(t, j)| (10 * t + j) as f64);
        let data = frame(vec![0.0, 1.0, 2.0, 3.0], values);
        let model = VarModel::<_, ()>::new(
            2,
            2,
            Estimated::fixed(Array2::zeros((2, 4))),
            Estimated::fixed(Array1::zeros(2)),
            Estimated::fixed(Array2::eye(2)),
            data,
        )
        .unwrap();

        assert_eq!(model.lag_history(3).unwrap(), array![20.0, 21.0, 10.0, 11.0]);
        assert_eq!(model.lag_history(2).unwrap(), array![10.0, 11.0, 0.0, 1.0]);
        assert!(model.lag_history(1).is_err());
        assert!(model.lag_history(4).is_err());
    }

    #[test]
    fn test_residuals_shape() {
        let data = frame(vec![0.0, 1.0, 2.0], array![[1.0, 2.0], [1.0, 2.0], [3.0, 3.0]]);
        let model = identity_model(data).unwrap();
        let residuals = model.residuals(SampleIndex::default()).unwrap();

        assert_eq!(residuals.dim(), (2, 2));
        assert_eq!(residuals.row(0), array![0.0, 0.0]);
        assert_eq!(residuals.row(1), array![2.0, 1.0]);
    }
}
