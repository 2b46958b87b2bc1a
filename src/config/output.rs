use super::traits::ConfigSection;
use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON run report; nothing is written when unset
    pub report_path: Option<PathBuf>,
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), TopologyError> {
        Ok(())
    }
}
