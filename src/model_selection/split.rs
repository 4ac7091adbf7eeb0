use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::SplitError;

/// How much of a group of samples goes to the test side of a split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestSize {
    /// Fraction of the group, strictly between 0.0 and 1.0.
    Fraction(f64),
    /// Absolute number of test samples, at most the group size.
    Count(usize),
}

impl Default for TestSize {
    fn default() -> Self {
        Self::Fraction(0.2)
    }
}

impl From<f64> for TestSize {
    fn from(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }
}

impl From<usize> for TestSize {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl TestSize {
    /// Resolves this size against a group of `n_samples` into
    /// `(n_train, n_test)`.
    ///
    /// Fractions round the test side up, so a group of 10 with
    /// `Fraction(0.2)` resolves to `(8, 2)`. A resolution that leaves
    /// either side empty is rejected, which covers the `n_samples == 0`
    /// case as well.
    fn resolve(&self, n_samples: usize) -> Result<(usize, usize), SplitError> {
        let n_test = match *self {
            Self::Fraction(f) => {
                if !(0.0..1.0).contains(&f) || f == 0.0 {
                    return Err(SplitError::InvalidTestSize {
                        got: format!("{f}"),
                        n_samples,
                    });
                }
                (f * n_samples as f64).ceil() as usize
            }
            Self::Count(c) => {
                if c > n_samples {
                    return Err(SplitError::InvalidTestSize {
                        got: format!("{c}"),
                        n_samples,
                    });
                }
                c
            }
        };
        let n_train = n_samples - n_test;

        if n_train == 0 || n_test == 0 {
            return Err(SplitError::DegenerateSplit {
                n_samples,
                n_train,
                n_test,
            });
        }

        Ok((n_train, n_test))
    }
}

/// Splits the index range `0..n_samples` into disjoint (train, test)
/// index sets honoring `test_size`.
///
/// Without shuffling the cut is positional: train takes the leading
/// indices and test the trailing ones, both in order. With shuffling, a
/// permutation of the range decides which indices land on which side; the
/// permutation is drawn from a ChaCha stream seeded with `random_state`,
/// so a given seed always produces the same split.
pub fn train_test_split(
    n_samples: usize,
    test_size: TestSize,
    shuffle: bool,
    random_state: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>), SplitError> {
    let (n_train, n_test) = test_size.resolve(n_samples)?;

    if !shuffle {
        return Ok(((0..n_train).collect(), (n_train..n_samples).collect()));
    }

    let mut rng = match random_state {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);

    // Test takes the head of the permutation, train the remainder.
    let train = indices.split_off(n_test);
    Ok((train, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_rounds_test_side_up() {
        let (train, test) = train_test_split(10, TestSize::Fraction(0.2), false, None).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train, test) = train_test_split(9, TestSize::Fraction(0.25), false, None).unwrap();
        assert_eq!(train.len(), 6);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn no_shuffle_is_a_positional_cut() {
        let (train, test) = train_test_split(10, TestSize::Fraction(0.2), false, None).unwrap();
        assert_eq!(train, (0..8).collect::<Vec<_>>());
        assert_eq!(test, vec![8, 9]);
    }

    #[test]
    fn count_is_taken_literally() {
        let (train, test) = train_test_split(10, TestSize::Count(3), false, None).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn shuffle_partitions_the_full_range() {
        let (mut train, mut test) =
            train_test_split(20, TestSize::Fraction(0.3), true, Some(7)).unwrap();
        assert_eq!(train.len() + test.len(), 20);

        let mut all: Vec<usize> = train.drain(..).chain(test.drain(..)).collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let first = train_test_split(50, TestSize::Fraction(0.2), true, Some(42)).unwrap();
        let second = train_test_split(50, TestSize::Fraction(0.2), true, Some(42)).unwrap();
        assert_eq!(first, second);

        let other_seed = train_test_split(50, TestSize::Fraction(0.2), true, Some(43)).unwrap();
        assert_ne!(first, other_seed);
    }

    #[test]
    fn empty_groups_are_rejected() {
        let err = train_test_split(0, TestSize::Fraction(0.2), false, None).unwrap_err();
        assert!(matches!(
            err,
            SplitError::DegenerateSplit { n_samples: 0, .. }
        ));
    }

    #[test]
    fn single_sample_cannot_be_split() {
        let err = train_test_split(1, TestSize::Fraction(0.2), false, None).unwrap_err();
        assert!(matches!(err, SplitError::DegenerateSplit { n_train: 0, .. }));
    }

    #[test]
    fn out_of_range_sizes_are_rejected() {
        assert!(matches!(
            train_test_split(10, TestSize::Fraction(0.0), false, None),
            Err(SplitError::InvalidTestSize { .. })
        ));
        assert!(matches!(
            train_test_split(10, TestSize::Fraction(1.0), false, None),
            Err(SplitError::InvalidTestSize { .. })
        ));
        assert!(matches!(
            train_test_split(10, TestSize::Count(11), false, None),
            Err(SplitError::InvalidTestSize { .. })
        ));
    }
}
