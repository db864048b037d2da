//! Construction-time checks on model parameters.

use macrometrics_estimated::{Estimated, SampleLayout};
use macrometrics_types::{CovarianceError, MacroError, Result};
use ndarray::{Array2, ArrayView2, Axis, Ix2, Slice};

/// Checks the parameter shape of `quantity`, excluding sample axes.
pub(crate) fn param_shape<M>(
    context: &'static str,
    quantity: &Estimated<M>,
    expected: &[usize],
) -> Result<()> {
    if quantity.param_shape() == expected {
        Ok(())
    } else {
        Err(MacroError::shape(context, expected, quantity.param_shape()))
    }
}

/// Returns the layout shared by every sampled parameter.
///
/// Point quantities are compatible with any layout.
pub(crate) fn common_layout<M>(params: &[&Estimated<M>]) -> Result<Option<SampleLayout>> {
    let mut common: Option<SampleLayout> = None;
    for layout in params.iter().filter_map(|p| p.layout()) {
        match common {
            None => common = Some(layout),
            Some(first) if first != layout => {
                return Err(MacroError::ShapeMismatch {
                    left: first.dims(),
                    right: layout.dims(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(common)
}

/// Checks every realization of `sigma` for symmetry and definiteness.
pub(crate) fn covariance_draws<M>(sigma: &Estimated<M>, tolerance: f64) -> Result<()> {
    for (sample, draw) in sigma.samples().enumerate() {
        let matrix = draw
            .into_dimensionality::<Ix2>()
            .map_err(|_| MacroError::dimension("Sigma", "a square matrix", format!("{:?}", sigma.param_shape())))?;
        check_covariance(matrix, tolerance)
            .map_err(|reason| MacroError::InvalidCovariance { sample, reason })?;
    }
    Ok(())
}

/// Checks that `matrix` is symmetric and positive semi-definite.
///
/// Runs a semidefinite Cholesky factorization: a pivot within tolerance of
/// zero is accepted as long as the rest of its column vanishes too.
/// `tolerance` is scaled by the largest diagonal entry.
///
/// # Errors
///
/// Returns the first [`CovarianceError`] found.
pub fn check_covariance(
    matrix: ArrayView2<'_, f64>,
    tolerance: f64,
) -> std::result::Result<(), CovarianceError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(CovarianceError::NotSquare { rows, cols });
    }
    if let Some(&value) = matrix.iter().find(|v| !v.is_finite()) {
        return Err(CovarianceError::NonFinite { value });
    }

    let scale = matrix.diag().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let eps = tolerance * if scale > 0.0 { scale } else { 1.0 };

    for row in 0..rows {
        for col in 0..row {
            let gap = (matrix[[row, col]] - matrix[[col, row]]).abs();
            if gap > eps {
                return Err(CovarianceError::Asymmetric { row, col, gap });
            }
        }
    }

    let mut lower = Array2::<f64>::zeros((rows, rows));
    for j in 0..rows {
        let pivot = matrix[[j, j]] - leading_dot(&lower, j, j);
        if pivot < -eps {
            return Err(CovarianceError::NegativePivot { pivot: j, value: pivot });
        }

        if pivot <= eps {
            for row in j + 1..rows {
                let coupling = matrix[[row, j]] - leading_dot(&lower, row, j);
                if coupling.abs() > eps {
                    return Err(CovarianceError::CoupledZeroPivot { pivot: j, row, coupling });
                }
            }
            continue;
        }

        let root = pivot.sqrt();
        lower[[j, j]] = root;
        for row in j + 1..rows {
            lower[[row, j]] = (matrix[[row, j]] - leading_dot(&lower, row, j)) / root;
        }
    }
    Ok(())
}

/// Dot product of rows `i` and `j` of `lower` over their first `j` columns.
fn leading_dot(lower: &Array2<f64>, i: usize, j: usize) -> f64 {
    let head = Slice::from(..j);
    lower
        .row(i)
        .slice_axis(Axis(0), head)
        .dot(&lower.row(j).slice_axis(Axis(0), head))
}
