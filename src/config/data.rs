use super::traits::{invalid, ConfigSection};
use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV to classify instead of the bundled iris set
    pub path: Option<PathBuf>,
    pub target_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            target_column: "species".to_string(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), TopologyError> {
        if self.target_column.trim().is_empty() {
            return Err(invalid::<Self>("target_column must not be empty"));
        }
        Ok(())
    }
}
