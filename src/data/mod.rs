pub mod connectors;
pub mod dataset;

pub use connectors::{CsvConnector, DataValidator};
pub use dataset::Dataset;

use crate::config::DataConfig;
use crate::error::Result;

/// Dataset selected by config: a user CSV when `path` is set, else the bundled iris set.
pub fn load_configured(config: &DataConfig) -> Result<Dataset> {
    let dataset = match &config.path {
        Some(path) => CsvConnector::load_dataset(path, &config.target_column)?,
        None => CsvConnector::load_iris()?,
    };

    log::info!(
        "Loaded dataset: {} samples, {} features, {} classes {:?}",
        dataset.n_samples(),
        dataset.n_features(),
        dataset.n_classes(),
        dataset.class_names()
    );

    Ok(dataset)
}
