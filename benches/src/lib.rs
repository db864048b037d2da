//! Benchmark fixtures for macrometrics.

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use macrometrics_estimated::{ChainStacker, Estimated};
use macrometrics_types::{MacroError, Result, TimeSeriesFrame};
use macrometrics_var::VarModel;
use ndarray::{Array2, Array3};

/// Size of a synthetic VAR fixture.
#[derive(Debug, Clone, Copy)]
pub struct FixtureConfig {
    /// Number of variables.
    pub n: usize,
    /// Lag order.
    pub p: usize,
    /// Number of observations.
    pub observations: usize,
    /// Draws per chain for the sampled coefficients.
    pub draws: usize,
    /// Number of chains.
    pub chains: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            n: 3,
            p: 2,
            observations: 200,
            draws: 500,
            chains: 4,
        }
    }
}

impl FixtureConfig {
    /// Short label for benchmark ids, e.g. `n3-p2-t200`.
    pub fn label(&self) -> String {
        format!("n{}-p{}-t{}", self.n, self.p, self.observations)
    }
}

/// Evenly spaced numeric index `0, 1, …, len - 1`.
pub fn numeric_index(len: usize) -> Vec<f64> {
    (0..len).map(|t| t as f64).collect()
}

/// Quarter-end dates starting at 1960-03-31.
pub fn quarterly_index(len: usize) -> Result<Vec<NaiveDate>> {
    let start = NaiveDate::from_ymd_opt(1960, 3, 31)
        .ok_or_else(|| MacroError::InvalidArgument("invalid start date".to_string()))?;
    (0..len)
        .map(|q| {
            let months = u32::try_from(3 * q)
                .map_err(|_| MacroError::InvalidArgument(format!("quarter {q} out of range")))?;
            start
                .checked_add_months(Months::new(months))
                .ok_or_else(|| MacroError::InvalidArgument(format!("quarter {q} out of range")))
        })
        .collect()
}

/// Deterministic, stable lag coefficients for one draw.
fn coefficients(n: usize, p: usize, jitter: f64) -> Array2<f64> {
    Array2::from_shape_fn((n, n * p), |(i, j)| {
        let own = j % n == i;
        let decay = 0.5 / (1 + j / n) as f64;
        if own { decay + jitter } else { 0.01 * jitter }
    })
}

/// Chain-stacked posterior draws of the lag coefficients.
pub fn sampled_coefficients(config: &FixtureConfig) -> Result<Estimated> {
    let (n, p, draws) = (config.n, config.p, config.draws);
    let mut stacker = ChainStacker::new();
    for chain in 0..config.chains {
        let mut values = Array3::<f64>::zeros((n, n * p, draws));
        for d in 0..draws {
            let jitter = 0.001 * ((chain * draws + d) % 17) as f64;
            values
                .index_axis_mut(ndarray::Axis(2), d)
                .assign(&coefficients(n, p, jitter));
        }
        stacker.push(values)?;
    }
    Ok(stacker.finish(())?.into())
}

/// Builds a VAR model over a noiseless simulated series.
///
/// # Errors
///
/// Propagates construction errors; the defaults always succeed.
pub fn var_fixture(config: &FixtureConfig) -> Result<VarModel<TimeSeriesFrame<f64>>> {
    let (n, p, len) = (config.n, config.p, config.observations);
    let b = coefficients(n, p, 0.0);
    let mut values = Array2::<f64>::zeros((len, n));
    for t in 0..len {
        let mut row = ndarray::Array1::from_elem(n, 1.0);
        for k in 1..=p.min(t) {
            let block = b.slice(ndarray::s![.., (k - 1) * n..k * n]);
            row += &block.dot(&values.row(t - k));
        }
        values.row_mut(t).assign(&row);
    }

    let data = Arc::new(TimeSeriesFrame::new(numeric_index(len), values)?);
    VarModel::new(
        n,
        p,
        sampled_coefficients(config)?,
        Estimated::fixed(ndarray::Array1::from_elem(n, 1.0)),
        Estimated::fixed(Array2::eye(n)),
        data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fixture_builds() {
        let config = FixtureConfig {
            draws: 10,
            chains: 2,
            ..FixtureConfig::default()
        };
        let model = var_fixture(&config).unwrap();
        assert_eq!(model.num_samples(), 20);
        assert_eq!(config.label(), "n3-p2-t200");
    }

    #[test]
    fn test_quarterly_index() {
        let index = quarterly_index(5).unwrap();
        assert_eq!(index[1], NaiveDate::from_ymd_opt(1960, 6, 30).unwrap());
        assert_eq!(index[4], NaiveDate::from_ymd_opt(1961, 3, 31).unwrap());
    }
}
