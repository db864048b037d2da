//! Time-indexed observation data.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{MacroError, Result, Timestamp};

/// Read-only view of a chronologically indexed sequence of observation vectors.
///
/// This is the contract a data collaborator must satisfy for a model to be
/// built on top of it. Every observation has the same dimension.
pub trait TimeSeries {
    /// Index type of the series.
    type Time: Timestamp;

    /// Number of observations.
    fn len(&self) -> usize;

    /// Number of variables per observation.
    fn dim(&self) -> usize;

    /// Timestamp of observation `index`.
    fn timestamp(&self, index: usize) -> Option<Self::Time>;

    /// Observation vector at `index`.
    fn observation(&self, index: usize) -> Option<ArrayView1<'_, f64>>;

    /// Returns true if the series holds no observations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the timestamps of rows `0..len()` in order, None for a
    /// row without one.
    fn timestamps(&self) -> impl Iterator<Item = Option<Self::Time>> + '_ {
        (0..self.len()).map(move |i| self.timestamp(i))
    }
}

/// A single timestamped observation borrowed from a [`TimeSeriesFrame`].
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a, T> {
    /// Timestamp of the observation.
    pub timestamp: T,
    /// One value per variable.
    pub values: ArrayView1<'a, f64>,
}

/// In-memory time series: a timestamp index and a `(len, dim)` value matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFrame<T> {
    index: Vec<T>,
    values: Array2<f64>,
}

impl<T: Timestamp> TimeSeriesFrame<T> {
    /// Creates a frame from an index and a matrix with one row per timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if the row count differs
    /// from the index length, or [`MacroError::InvalidData`] if any value is
    /// not finite.
    pub fn new(index: Vec<T>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != index.len() {
            return Err(MacroError::dimension(
                "observation rows",
                index.len(),
                values.nrows(),
            ));
        }
        if let Some(((row, column), &value)) = values.indexed_iter().find(|(_, v)| !v.is_finite())
        {
            return Err(MacroError::InvalidData { row, column, value });
        }
        Ok(Self { index, values })
    }

    /// Creates a frame from `(timestamp, observation)` pairs of dimension `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DimensionMismatch`] if any observation does not
    /// have `dim` values, or [`MacroError::InvalidData`] for non-finite values.
    pub fn from_observations<I, V>(dim: usize, observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, V)>,
        V: AsRef<[f64]>,
    {
        let mut index = Vec::new();
        let mut flat = Vec::new();
        for (timestamp, values) in observations {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(MacroError::dimension("observation", dim, values.len()));
            }
            index.push(timestamp);
            flat.extend_from_slice(values);
        }
        let values = Array2::from_shape_vec((index.len(), dim), flat)
            .map_err(|_| MacroError::dimension("observation", dim, "ragged rows"))?;
        Self::new(index, values)
    }

    /// Returns the timestamp index.
    #[must_use]
    pub fn index(&self) -> &[T] {
        &self.index
    }

    /// Returns the `(len, dim)` value matrix.
    #[must_use]
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Iterates over the observations in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = Observation<'_, T>> + '_ {
        self.index
            .iter()
            .zip(self.values.rows())
            .map(|(&timestamp, values)| Observation { timestamp, values })
    }
}

impl<T: Timestamp> TimeSeries for TimeSeriesFrame<T> {
    type Time = T;

    fn len(&self) -> usize {
        self.index.len()
    }

    fn dim(&self) -> usize {
        self.values.ncols()
    }

    fn timestamp(&self, index: usize) -> Option<T> {
        self.index.get(index).copied()
    }

    fn observation(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.values.nrows()).then(|| self.values.row(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_frame_new() {
        let frame = TimeSeriesFrame::new(vec![0.0, 1.0, 2.0], array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])
            .unwrap();

        assert_eq!(frame.len(), 3);
        assert_eq!(frame.dim(), 2);
        assert_eq!(frame.timestamp(1), Some(1.0));
        assert_eq!(frame.observation(2).unwrap(), array![5.0, 6.0]);
        assert!(frame.observation(3).is_none());
    }

    #[test]
    fn test_frame_row_count_mismatch() {
        let result = TimeSeriesFrame::new(vec![0_i64, 1], array![[1.0], [2.0], [3.0]]);
        assert!(matches!(result, Err(MacroError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_frame_rejects_nan() {
        let result = TimeSeriesFrame::new(vec![0_i64, 1], array![[1.0, 2.0], [f64::NAN, 3.0]]);
        match result {
            Err(MacroError::InvalidData { row, column, .. }) => {
                assert_eq!((row, column), (1, 0));
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_from_observations() {
        let frame = TimeSeriesFrame::from_observations(
            2,
            vec![(0_i64, vec![1.0, 2.0]), (1, vec![3.0, 4.0])],
        )
        .unwrap();
        assert_eq!(frame.values(), array![[1.0, 2.0], [3.0, 4.0]]);

        let ragged = TimeSeriesFrame::from_observations(2, vec![(0_i64, vec![1.0])]);
        assert!(ragged.is_err());
    }

    #[test]
    fn test_iter_and_timestamps() {
        let frame = TimeSeriesFrame::new(vec![10_i64, 20], array![[1.0], [2.0]]).unwrap();
        let stamps: Option<Vec<_>> = frame.timestamps().collect();
        assert_eq!(stamps, Some(vec![10, 20]));

        let last = frame.iter().last().unwrap();
        assert_eq!(last.timestamp, 20);
        assert_eq!(last.values[0], 2.0);
    }
}
