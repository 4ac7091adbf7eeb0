//! Train/test partitioning strategies.

mod groupby_trial;
mod split;

pub use groupby_trial::GroupbyTrialSplit;
pub use split::{train_test_split, TestSize};
