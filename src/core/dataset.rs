use std::sync::Arc;

use ndarray::Array2;
use polars::prelude::DataFrame;

/// Metadata column identifying the recording subject.
pub const SUBJECT_COLUMN: &str = "subject_id";

/// Metadata column identifying the trial within a subject's session.
pub const TRIAL_COLUMN: &str = "trial_id";

/// A collection of EEG samples described by a per-sample metadata table.
///
/// The metadata table has one row per sample and must carry at least the
/// [`SUBJECT_COLUMN`] and [`TRIAL_COLUMN`] columns; any further columns are
/// carried along untouched. Model selection never inspects or mutates
/// sample payloads, it only derives new datasets with a subset of the
/// metadata rows.
pub trait Dataset {
    /// The metadata table describing this dataset's samples.
    fn info(&self) -> &DataFrame;

    /// A shallow copy of this dataset with the metadata table replaced.
    ///
    /// Implementations must share the sample-access layer with `self`
    /// rather than copying it; only the metadata table is owned by the
    /// derived dataset.
    fn with_info(&self, info: DataFrame) -> Self
    where
        Self: Sized;
}

/// An in-memory EEG dataset.
///
/// The sample block is behind an `Arc`, so datasets derived through
/// [`Dataset::with_info`] share it with the original instead of cloning
/// what is typically the large side of the data.
#[derive(Debug, Clone)]
pub struct EegDataset {
    samples: Arc<Vec<Array2<f32>>>,
    info: DataFrame,
}

impl EegDataset {
    /// Constructs a dataset from a sample block and its metadata table.
    ///
    /// `samples[i]` is the (channels x timesteps) recording described by
    /// row `i` of `info`.
    pub fn new(samples: Vec<Array2<f32>>, info: DataFrame) -> Self {
        Self {
            samples: Arc::new(samples),
            info,
        }
    }

    /// Returns the sample at a row's original position, if it exists.
    pub fn get(&self, idx: usize) -> Option<&Array2<f32>> {
        self.samples.get(idx)
    }

    /// The number of samples described by the metadata table.
    pub fn cardinality(&self) -> usize {
        self.info.height()
    }
}

impl Dataset for EegDataset {
    fn info(&self) -> &DataFrame {
        &self.info
    }

    fn with_info(&self, info: DataFrame) -> Self {
        Self {
            samples: Arc::clone(&self.samples),
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn tiny_dataset() -> EegDataset {
        let samples = (0..4).map(|_| Array2::<f32>::zeros((2, 8))).collect();
        let info = df!(
            SUBJECT_COLUMN => &["s01", "s01", "s01", "s01"],
            TRIAL_COLUMN => &[0i64, 0, 1, 1],
        )
        .unwrap();
        EegDataset::new(samples, info)
    }

    #[test]
    fn with_info_shares_samples() {
        let dataset = tiny_dataset();
        let derived = dataset.with_info(dataset.info().head(Some(2)));

        assert_eq!(derived.cardinality(), 2);
        assert_eq!(dataset.cardinality(), 4);
        assert!(Arc::ptr_eq(&dataset.samples, &derived.samples));
    }

    #[test]
    fn get_is_positional() {
        let dataset = tiny_dataset();
        assert!(dataset.get(3).is_some());
        assert!(dataset.get(4).is_none());
    }
}
