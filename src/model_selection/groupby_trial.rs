use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::core::{Dataset, SUBJECT_COLUMN, TRIAL_COLUMN};
use crate::error::SplitError;
use crate::model_selection::split::{train_test_split, TestSize};
use crate::utils::random_dir_path;

const TRAIN_FILENAME: &str = "train.csv";
const TEST_FILENAME: &str = "test.csv";

// Original row positions are carried in the manifests under this column.
const INDEX_COLUMN: &str = "index";

/// Trial-grouped train/test splitter.
///
/// Partitions a dataset's metadata per (subject, trial) group instead of
/// globally, so samples never cross trial boundaries between the two
/// sides. With the defaults (`test_size = 0.2`, no shuffling) the first
/// 80% of each trial's samples go to train and the last 20% to test.
///
/// The computed split is written to `train.csv` and `test.csv` under the
/// split directory. The directory's existence is the only cache signal:
/// when it is already present the manifests are re-read as-is and every
/// other parameter of this builder is ignored. Delete the directory to
/// force a recompute after the source dataset changes.
///
/// ```no_run
/// use trialsplit::{EegDataset, GroupbyTrialSplit};
///
/// # fn demo(dataset: EegDataset) -> Result<(), trialsplit::SplitError> {
/// let (_train, _test) = GroupbyTrialSplit::new()
///     .with_test_size(0.2)
///     .with_shuffle(true)
///     .with_random_state(42)
///     .with_split_path("splits/run1")
///     .split(&dataset)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GroupbyTrialSplit {
    test_size: TestSize,
    shuffle: bool,
    random_state: Option<u64>,
    split_path: Option<PathBuf>,
}

impl Default for GroupbyTrialSplit {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupbyTrialSplit {
    pub fn new() -> Self {
        Self {
            test_size: TestSize::default(),
            shuffle: false,
            random_state: None,
            split_path: None,
        }
    }

    /// Sets the per-group test share, either a fraction or a count.
    pub fn with_test_size(mut self, test_size: impl Into<TestSize>) -> Self {
        self.test_size = test_size.into();
        self
    }

    /// Permutes each group's rows before the cut instead of splitting
    /// positionally. Samples still stay within their own group.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Seeds the shuffle permutation. Has no effect without
    /// [`with_shuffle`](Self::with_shuffle).
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Sets the split directory. When unset, a fresh path under the OS
    /// temp directory is generated and logged for reuse.
    pub fn with_split_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.split_path = Some(path.into());
        self
    }

    /// Partitions `dataset` into a (train, test) pair.
    ///
    /// Computes and persists the split when the split directory does not
    /// exist yet, then reads the manifests back in either case.
    ///
    /// # Args
    /// - `dataset`: The dataset to divide. Its metadata table must carry
    ///   the `subject_id` and `trial_id` columns.
    ///
    /// # Returns
    /// Two shallow copies of `dataset` whose metadata tables hold the
    /// train rows and the test rows respectively.
    pub fn split<D: Dataset>(&self, dataset: &D) -> Result<(D, D), SplitError> {
        let split_path = self
            .split_path
            .clone()
            .unwrap_or_else(|| random_dir_path("model_selection"));

        if !split_path.exists() {
            log::info!(
                "Creating a new train/test split at {}.",
                split_path.display()
            );
            log::info!(
                "Set split_path to {} on the next run to reuse this split.",
                split_path.display()
            );
            fs::create_dir_all(&split_path)?;

            let (train_info, test_info) = self.compute(dataset.info())?;
            write_manifest(&train_info, &split_path.join(TRAIN_FILENAME))?;
            write_manifest(&test_info, &split_path.join(TEST_FILENAME))?;
        } else {
            log::info!(
                "Found an existing train/test split at {}, reusing it.",
                split_path.display()
            );
            log::info!(
                "If the dataset was re-generated, delete the split directory and split again instead of reusing it."
            );
        }

        let train_info = read_manifest(&split_path.join(TRAIN_FILENAME))?;
        let test_info = read_manifest(&split_path.join(TEST_FILENAME))?;

        Ok((dataset.with_info(train_info), dataset.with_info(test_info)))
    }

    fn compute(&self, info: &DataFrame) -> Result<(DataFrame, DataFrame), SplitError> {
        // Row positions ride along as a column so row identity survives
        // the per-group reindexing.
        let info = info.with_row_index(INDEX_COLUMN, None)?;

        let subjects = info.column(SUBJECT_COLUMN)?.unique_stable()?;
        let trials = info.column(TRIAL_COLUMN)?.unique_stable()?;

        let mut train_parts = Vec::new();
        let mut test_parts = Vec::new();

        // Distinct subjects and trials are enumerated as independent
        // axes. A pair that never co-occurs in the table filters down to
        // an empty group, which the index split rejects.
        for s in 0..subjects.len() {
            let subject_mask = info
                .column(SUBJECT_COLUMN)?
                .equal(&subjects.slice(s as i64, 1))?;
            for t in 0..trials.len() {
                let trial_mask = info
                    .column(TRIAL_COLUMN)?
                    .equal(&trials.slice(t as i64, 1))?;
                let group = info.filter(&(&subject_mask & &trial_mask))?;

                let (train_idx, test_idx) = train_test_split(
                    group.height(),
                    self.test_size,
                    self.shuffle,
                    self.random_state,
                )?;

                train_parts.push(take_rows(&group, &train_idx)?);
                test_parts.push(take_rows(&group, &test_idx)?);
            }
        }

        Ok((vstack_all(train_parts)?, vstack_all(test_parts)?))
    }
}

fn take_rows(group: &DataFrame, indices: &[usize]) -> Result<DataFrame, SplitError> {
    let indices: Vec<IdxSize> = indices.iter().map(|&i| i as IdxSize).collect();
    Ok(group.take(&IdxCa::from_vec("", indices))?)
}

fn vstack_all(parts: Vec<DataFrame>) -> Result<DataFrame, SplitError> {
    let mut parts = parts.into_iter();
    let mut table = parts.next().ok_or_else(|| {
        SplitError::Table(PolarsError::NoData(
            "no (subject, trial) groups to split".into(),
        ))
    })?;
    for part in parts {
        table.vstack_mut(&part)?;
    }
    table.as_single_chunk_par();
    Ok(table)
}

fn write_manifest(info: &DataFrame, path: &Path) -> Result<(), SplitError> {
    let file = fs::File::create(path)?;
    let mut table = info.clone();
    CsvWriter::new(file).include_header(true).finish(&mut table)?;
    Ok(())
}

fn read_manifest(path: &Path) -> Result<DataFrame, SplitError> {
    let table = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(table)
}
