mod dataset;

pub use dataset::{Dataset, EegDataset, SUBJECT_COLUMN, TRIAL_COLUMN};
