//! Arithmetic on estimated quantities.
//!
//! Every binary operation goes through one pairwise dispatch table:
//!
//! | left \ right  | Fixed       | Frequentist | Bayesian                |
//! |---------------|-------------|-------------|-------------------------|
//! | Fixed         | Fixed       | Frequentist | Bayesian (right meta)   |
//! | Frequentist   | Frequentist | Frequentist | Bayesian (right meta)   |
//! | Bayesian      | Bayesian (left meta) | Bayesian (left meta) | Bayesian (no meta, equal layouts only) |
//!
//! Point values are broadcast against every draw. Metadata of two sampled
//! operands is never merged implicitly; see
//! [`Estimated::try_combine_with_metadata`].

use macrometrics_types::{MacroError, Result};
use ndarray::{ArrayD, ArrayViewD, Ix1, Ix2, IxDyn, Zip, arr0};

use crate::variants::sample_view_mut;
use crate::{
    BayesianEstimated, Estimated, FixedEstimated, FrequentistEstimated, SampleIndex, SampleLayout,
};

/// Elementwise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
}

impl BinaryOp {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<M: Clone> Estimated<M> {
    /// Combines two quantities elementwise.
    ///
    /// Parameter shapes broadcast from the trailing axis. The result variant
    /// follows the table in the module docs.
    ///
    /// # Errors
    ///
    /// - [`MacroError::ShapeMismatch`] for two Bayesian operands with
    ///   different sample layouts.
    /// - [`MacroError::NonConformable`] if the parameter shapes do not
    ///   broadcast.
    pub fn try_combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.dispatch(other, |a, b| elementwise(op, a, b))
    }

    /// Like [`Self::try_combine`], attaching `merge(left, right)` as the
    /// result's metadata. Ignored when the result is fixed.
    ///
    /// # Errors
    ///
    /// See [`Self::try_combine`].
    pub fn try_combine_with_metadata<F>(&self, other: &Self, op: BinaryOp, merge: F) -> Result<Self>
    where
        F: FnOnce(Option<&M>, Option<&M>) -> Option<M>,
    {
        let combined = self.try_combine(other, op)?;
        let metadata = merge(self.metadata().ok(), other.metadata().ok());
        Ok(combined.replace_metadata(metadata))
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// See [`Self::try_combine`].
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.try_combine(other, BinaryOp::Add)
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// See [`Self::try_combine`].
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.try_combine(other, BinaryOp::Sub)
    }

    /// Elementwise product.
    ///
    /// # Errors
    ///
    /// See [`Self::try_combine`].
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.try_combine(other, BinaryOp::Mul)
    }

    /// Elementwise quotient.
    ///
    /// # Errors
    ///
    /// See [`Self::try_combine`].
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        self.try_combine(other, BinaryOp::Div)
    }

    /// Matrix product of the parameter arrays, draw by draw.
    ///
    /// Operands must be vectors or matrices. Vector-vector products give a
    /// zero-dimensional result.
    ///
    /// # Errors
    ///
    /// - [`MacroError::ShapeMismatch`] for two Bayesian operands with
    ///   different sample layouts.
    /// - [`MacroError::NonConformable`] if the inner dimensions differ or an
    ///   operand has more than two axes.
    pub fn try_matmul(&self, other: &Self) -> Result<Self> {
        self.dispatch(other, matmul)
    }

    /// Applies `f` to every element. Variant, layout and metadata are kept.
    #[must_use]
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        match self {
            Self::Fixed(x) => Self::Fixed(FixedEstimated::new(x.value().mapv(&f))),
            Self::Frequentist(x) => Self::Frequentist(FrequentistEstimated::from_parts(
                x.value().mapv(&f),
                x.metadata().cloned(),
            )),
            Self::Bayesian(x) => Self::Bayesian(BayesianEstimated::from_parts(
                x.value().mapv(&f),
                x.layout(),
                x.metadata().cloned(),
            )),
        }
    }

    /// Multiplies every element by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|x| x * factor)
    }

    /// Pairwise dispatch; `f` combines one realization of each operand.
    fn dispatch<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(ArrayViewD<'_, f64>, ArrayViewD<'_, f64>) -> Result<ArrayD<f64>>,
    {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => {
                f(a.value().view(), b.value().view()).map(|v| Self::Fixed(FixedEstimated::new(v)))
            }
            (
                Self::Fixed(_) | Self::Frequentist(_),
                Self::Fixed(_) | Self::Frequentist(_),
            ) => f(self.value().view(), other.value().view())
                .map(|v| Self::Frequentist(FrequentistEstimated::from_parts(v, None))),
            (Self::Fixed(_) | Self::Frequentist(_), Self::Bayesian(b)) => {
                let point = self.value().view();
                let value = collect_samples(b.layout(), |index| {
                    f(point.view(), sample_of(b, index)?)
                })?;
                Ok(Self::Bayesian(BayesianEstimated::from_parts(
                    value,
                    b.layout(),
                    b.metadata().cloned(),
                )))
            }
            (Self::Bayesian(a), Self::Fixed(_) | Self::Frequentist(_)) => {
                let point = other.value().view();
                let value = collect_samples(a.layout(), |index| {
                    f(sample_of(a, index)?, point.view())
                })?;
                Ok(Self::Bayesian(BayesianEstimated::from_parts(
                    value,
                    a.layout(),
                    a.metadata().cloned(),
                )))
            }
            (Self::Bayesian(a), Self::Bayesian(b)) => {
                if a.layout() != b.layout() {
                    return Err(MacroError::ShapeMismatch {
                        left: a.layout().dims(),
                        right: b.layout().dims(),
                    });
                }
                let value = collect_samples(a.layout(), |index| {
                    f(sample_of(a, index)?, sample_of(b, index)?)
                })?;
                Ok(Self::Bayesian(BayesianEstimated::from_parts(
                    value,
                    a.layout(),
                    None,
                )))
            }
        }
    }

    fn replace_metadata(self, metadata: Option<M>) -> Self {
        match self {
            Self::Fixed(x) => Self::Fixed(x),
            Self::Frequentist(x) => {
                let (value, _) = x.into_parts();
                Self::Frequentist(FrequentistEstimated::from_parts(value, metadata))
            }
            Self::Bayesian(x) => {
                let (value, layout, _) = x.into_parts();
                Self::Bayesian(BayesianEstimated::from_parts(value, layout, metadata))
            }
        }
    }
}

fn sample_of<M>(estimated: &BayesianEstimated<M>, index: SampleIndex) -> Result<ArrayViewD<'_, f64>> {
    estimated.sample(index).ok_or_else(|| {
        MacroError::dimension("sample index", estimated.layout(), index.draw)
    })
}

/// Evaluates `g` once per draw and stacks the results along the sample axes.
fn collect_samples<G>(layout: SampleLayout, mut g: G) -> Result<ArrayD<f64>>
where
    G: FnMut(SampleIndex) -> Result<ArrayD<f64>>,
{
    let mut out: Option<ArrayD<f64>> = None;
    for flat in 0..layout.num_samples() {
        let index = layout.sample_index(flat);
        let result = g(index)?;
        let target = out.get_or_insert_with(|| {
            let mut shape = result.shape().to_vec();
            shape.extend(layout.dims());
            ArrayD::zeros(IxDyn(&shape))
        });
        let mut slot = sample_view_mut(target.view_mut(), layout, index);
        if slot.shape() != result.shape() {
            return Err(MacroError::NonConformable {
                operation: "stack draws",
                left: slot.shape().to_vec(),
                right: result.shape().to_vec(),
            });
        }
        slot.assign(&result);
    }
    out.ok_or_else(|| MacroError::dimension("posterior draws", "at least one draw", layout))
}

/// Shape two arrays broadcast to, aligning trailing axes.
fn broadcast_shape(left: &[usize], right: &[usize]) -> Option<Vec<usize>> {
    let ndim = left.len().max(right.len());
    let axis = |shape: &[usize], i: usize| {
        shape
            .len()
            .checked_sub(i + 1)
            .map_or(1, |pos| shape[pos])
    };
    let mut shape = (0..ndim)
        .map(|i| match (axis(left, i), axis(right, i)) {
            (l, r) if l == r => Some(l),
            (1, r) => Some(r),
            (l, 1) => Some(l),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    shape.reverse();
    Some(shape)
}

fn elementwise(op: BinaryOp, a: ArrayViewD<'_, f64>, b: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
    let non_conformable = || MacroError::NonConformable {
        operation: op.as_str(),
        left: a.shape().to_vec(),
        right: b.shape().to_vec(),
    };
    let shape = broadcast_shape(a.shape(), b.shape()).ok_or_else(non_conformable)?;
    let lhs = a.broadcast(IxDyn(&shape)).ok_or_else(non_conformable)?;
    let rhs = b.broadcast(IxDyn(&shape)).ok_or_else(non_conformable)?;
    Ok(Zip::from(lhs).and(rhs).map_collect(|&x, &y| op.apply(x, y)))
}

fn matmul(a: ArrayViewD<'_, f64>, b: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
    let non_conformable = || MacroError::NonConformable {
        operation: "matmul",
        left: a.shape().to_vec(),
        right: b.shape().to_vec(),
    };
    let inner_left = a.shape().last().copied();
    let inner_right = b.shape().first().copied();
    if a.ndim() == 0 || b.ndim() == 0 || a.ndim() > 2 || b.ndim() > 2 || inner_left != inner_right {
        return Err(non_conformable());
    }

    let result = match (a.ndim(), b.ndim()) {
        (2, 2) => {
            let lhs = a.view().into_dimensionality::<Ix2>().map_err(|_| non_conformable())?;
            let rhs = b.view().into_dimensionality::<Ix2>().map_err(|_| non_conformable())?;
            lhs.dot(&rhs).into_dyn()
        }
        (2, 1) => {
            let lhs = a.view().into_dimensionality::<Ix2>().map_err(|_| non_conformable())?;
            let rhs = b.view().into_dimensionality::<Ix1>().map_err(|_| non_conformable())?;
            lhs.dot(&rhs).into_dyn()
        }
        (1, 2) => {
            let lhs = a.view().into_dimensionality::<Ix1>().map_err(|_| non_conformable())?;
            let rhs = b.view().into_dimensionality::<Ix2>().map_err(|_| non_conformable())?;
            lhs.dot(&rhs).into_dyn()
        }
        _ => {
            let lhs = a.view().into_dimensionality::<Ix1>().map_err(|_| non_conformable())?;
            let rhs = b.view().into_dimensionality::<Ix1>().map_err(|_| non_conformable())?;
            arr0(lhs.dot(&rhs)).into_dyn()
        }
    };
    Ok(result)
}
