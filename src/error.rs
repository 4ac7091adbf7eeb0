use polars::error::PolarsError;
use thiserror::Error;

/// Errors produced while computing or loading a train/test split.
///
/// Filesystem and metadata-table failures are surfaced unmodified; the
/// split itself only rejects sizes that cannot partition a group.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata table error: {0}")]
    Table(#[from] PolarsError),

    #[error("invalid test_size {got} for a group of {n_samples} samples: expected a fraction in (0.0, 1.0) or a count no larger than the group size")]
    InvalidTestSize { got: String, n_samples: usize },

    #[error("cannot split a group of {n_samples} samples into n_train={n_train}, n_test={n_test}: both sides must be non-empty")]
    DegenerateSplit {
        n_samples: usize,
        n_train: usize,
        n_test: usize,
    },
}
