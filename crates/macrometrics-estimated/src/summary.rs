//! Elementwise summaries over posterior draws.

use macrometrics_types::{MacroError, Result};
use ndarray::{Array2, ArrayD, Axis, IxDyn};

use crate::Estimated;

/// Elementwise summary of a quantity across all of its realizations.
///
/// Every array has the quantity's parameter shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSummary {
    /// Mean over draws (the value itself for point quantities).
    pub mean: ArrayD<f64>,
    /// Sample standard deviation over draws; zero for a single realization.
    pub std_dev: ArrayD<f64>,
    /// Requested quantile levels paired with their elementwise quantiles.
    pub quantiles: Vec<(f64, ArrayD<f64>)>,
}

impl PosteriorSummary {
    /// Returns the quantile array for `level`, if it was requested.
    #[must_use]
    pub fn quantile(&self, level: f64) -> Option<&ArrayD<f64>> {
        self.quantiles
            .iter()
            .find(|(q, _)| (q - level).abs() < f64::EPSILON)
            .map(|(_, values)| values)
    }
}

impl<M> Estimated<M> {
    /// Best single value: the point estimate, or the posterior mean.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if the draws cannot be laid
    /// out by parameter element, or there are none to average.
    pub fn point_estimate(&self) -> Result<ArrayD<f64>> {
        match self {
            Self::Bayesian(_) => {
                let (draws, shape) = self.draw_matrix()?;
                let means = draws
                    .mean_axis(Axis(1))
                    .ok_or_else(|| MacroError::dimension("posterior draws", "at least one draw", 0))?;
                reshape(means.to_vec(), &shape)
            }
            _ => Ok(self.value().clone()),
        }
    }

    /// Summarizes the quantity elementwise over all draws and chains.
    ///
    /// Quantiles use linear interpolation between order statistics.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidArgument`] if a level is outside `[0, 1]`.
    pub fn summarize(&self, levels: &[f64]) -> Result<PosteriorSummary> {
        if let Some(bad) = levels.iter().find(|q| !(0.0..=1.0).contains(*q)) {
            return Err(MacroError::InvalidArgument(format!(
                "quantile level must lie in [0, 1], got {bad}"
            )));
        }

        let (draws, shape) = self.draw_matrix()?;
        let mut means = Vec::with_capacity(draws.nrows());
        let mut std_devs = Vec::with_capacity(draws.nrows());
        let mut quantiles = vec![Vec::with_capacity(draws.nrows()); levels.len()];

        let mut sorted = Vec::with_capacity(draws.ncols());
        for row in draws.rows() {
            sorted.clear();
            sorted.extend(row.iter().copied());
            let m = sorted.iter().sum::<f64>() / sorted.len() as f64;
            means.push(m);
            std_devs.push(std_dev(&sorted, m));

            sorted.sort_by(f64::total_cmp);
            for (values, &level) in quantiles.iter_mut().zip(levels) {
                values.push(quantile_sorted(&sorted, level));
            }
        }

        Ok(PosteriorSummary {
            mean: reshape(means, &shape)?,
            std_dev: reshape(std_devs, &shape)?,
            quantiles: levels
                .iter()
                .zip(quantiles)
                .map(|(&level, values)| Ok((level, reshape(values, &shape)?)))
                .collect::<Result<_>>()?,
        })
    }

    /// Realizations as a `(parameter elements, samples)` matrix plus the
    /// parameter shape.
    fn draw_matrix(&self) -> Result<(Array2<f64>, Vec<usize>)> {
        let shape = self.param_shape().to_vec();
        let elements: usize = shape.iter().product();
        let samples = self.num_samples();
        // Sample axes trail, so logical order yields one element's draws per row.
        let flat: Vec<f64> = self.value().iter().copied().collect();
        let draws = Array2::from_shape_vec((elements, samples), flat)
            .map_err(|_| MacroError::shape("posterior draws", &[elements, samples], self.shape()))?;
        Ok((draws, shape))
    }
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

fn quantile_sorted(sorted: &[f64], level: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * level;
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

fn reshape(values: Vec<f64>, shape: &[usize]) -> Result<ArrayD<f64>> {
    let len = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values)
        .map_err(|_| MacroError::shape("posterior summary", shape, &[len]))
}
