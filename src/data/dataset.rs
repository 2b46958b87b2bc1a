use crate::error::{Result, TopologyError};
use rulinalg::matrix::{BaseMatrix, Matrix};

/// Labeled tabular data: one row per sample, labels as class indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Matrix<f64>,
    labels: Vec<usize>,
    class_names: Vec<String>,
    feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        features: Matrix<f64>,
        labels: Vec<usize>,
        class_names: Vec<String>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if features.rows() != labels.len() {
            return Err(TopologyError::DataLoading(format!(
                "{} feature rows but {} labels",
                features.rows(),
                labels.len()
            )));
        }
        if features.cols() != feature_names.len() {
            return Err(TopologyError::DataLoading(format!(
                "{} feature columns but {} feature names",
                features.cols(),
                feature_names.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= class_names.len()) {
            return Err(TopologyError::DataLoading(format!(
                "label {} out of range for {} classes",
                bad,
                class_names.len()
            )));
        }

        Ok(Self {
            features,
            labels,
            class_names,
            feature_names,
        })
    }

    pub fn features(&self) -> &Matrix<f64> {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.cols()
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Samples per class, indexed like `class_names`
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }

    /// Rows and labels at `indices`, in that order
    pub fn subset(&self, indices: &[usize]) -> (Matrix<f64>, Vec<usize>) {
        let features = self.features.select_rows(indices);
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        (features, labels)
    }
}
