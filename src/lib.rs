//! Trial-grouped model selection for EEG datasets.
//!
//! EEG samples from the same trial are strongly correlated, so a global
//! random train/test split leaks information between the two sides. The
//! splitter in this crate partitions every (subject, trial) group
//! independently: with `test_size = 0.2` and no shuffling, the first 80%
//! of each trial's samples train the model and the last 20% test it.
//!
//! Computed splits are persisted as `train.csv`/`test.csv` manifests in a
//! split directory and reused on later runs that point at the same path.

mod core;
mod error;

pub mod model_selection;
pub mod utils;

pub use crate::core::{Dataset, EegDataset, SUBJECT_COLUMN, TRIAL_COLUMN};
pub use crate::error::SplitError;
pub use crate::model_selection::{train_test_split, GroupbyTrialSplit, TestSize};
