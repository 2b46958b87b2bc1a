use crate::error::TopologyError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), TopologyError>;
}

/// Error for a field of a named section
pub(crate) fn invalid<S: ConfigSection>(message: impl Into<String>) -> TopologyError {
    TopologyError::Configuration(format!("[{}] {}", S::section_name(), message.into()))
}

/// Checks a probability lies in [0, 1]
pub(crate) fn check_probability<S: ConfigSection>(name: &str, value: f64) -> Result<(), TopologyError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid::<S>(format!("{} must be between 0 and 1, got {}", name, value)));
    }
    Ok(())
}
