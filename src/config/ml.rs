use super::traits::{invalid, ConfigSection};
use crate::error::TopologyError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MLConfig {
    pub num_folds: usize,
    pub shuffle_folds: bool,
    /// Seeds both the fold shuffle and every classifier
    pub seed: u64,
    pub classifier: ClassifierConfig,
}

/// Training settings of the multilayer perceptron
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub learning_rate_init: f64,
    /// L2 penalty
    pub alpha: f64,
    /// `None` means `min(200, n_samples)`
    pub batch_size: Option<usize>,
    pub max_iter: usize,
    pub tol: f64,
    pub n_iter_no_change: usize,
    pub shuffle: bool,
    pub beta_1: f64,
    pub beta_2: f64,
    pub epsilon: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate_init: 0.001,
            alpha: 0.0001,
            batch_size: None,
            max_iter: 200,
            tol: 1e-4,
            n_iter_no_change: 10,
            shuffle: true,
            beta_1: 0.9,
            beta_2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl Default for MLConfig {
    fn default() -> Self {
        Self {
            num_folds: 5,
            shuffle_folds: true,
            seed: 42,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ConfigSection for MLConfig {
    fn section_name() -> &'static str {
        "ml"
    }

    fn validate(&self) -> Result<(), TopologyError> {
        if self.num_folds < 2 {
            return Err(invalid::<Self>("num_folds must be at least 2"));
        }

        let c = &self.classifier;
        if !(c.learning_rate_init > 0.0) {
            return Err(invalid::<Self>("learning_rate_init must be positive"));
        }
        if !(c.alpha >= 0.0) {
            return Err(invalid::<Self>("alpha must be non-negative"));
        }
        if c.max_iter == 0 {
            return Err(invalid::<Self>("max_iter must be at least 1"));
        }
        if c.batch_size == Some(0) {
            return Err(invalid::<Self>("batch_size must be at least 1"));
        }
        if !(0.0..1.0).contains(&c.beta_1) || !(0.0..1.0).contains(&c.beta_2) {
            return Err(invalid::<Self>("beta_1 and beta_2 must be in [0, 1)"));
        }
        if !(c.epsilon > 0.0) {
            return Err(invalid::<Self>("epsilon must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MLConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_single_fold() {
        let config = MLConfig {
            num_folds: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_batch() {
        let mut config = MLConfig::default();
        config.classifier.batch_size = Some(0);
        assert!(config.validate().is_err());
    }
}
