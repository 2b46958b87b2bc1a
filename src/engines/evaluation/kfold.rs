use crate::error::{Result, TopologyError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Single train/test partition of sample indices
#[derive(Debug, Clone, PartialEq)]
pub struct FoldSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
    pub fold_num: usize,
}

pub trait DataSplitter: Send + Sync {
    /// Split `n_samples` indices into folds
    fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>>;
}

/// K-fold cross-validation with optional seeded shuffling.
///
/// Fold sizes are `n / k`, with the first `n % k` folds one sample larger.
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize, shuffle: bool, seed: u64) -> Self {
        Self {
            n_splits,
            shuffle,
            seed,
        }
    }
}

impl DataSplitter for KFold {
    fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>> {
        if self.n_splits < 2 {
            return Err(TopologyError::Configuration(format!(
                "k-fold needs at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if self.n_splits > n_samples {
            return Err(TopologyError::Configuration(format!(
                "Cannot split {} samples into {} folds",
                n_samples, self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < extra);
            let end = start + size;

            let test = indices[start..end].to_vec();
            let train = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();

            splits.push(FoldSplit {
                train,
                test,
                fold_num: fold,
            });
            start = end;
        }

        Ok(splits)
    }
}
