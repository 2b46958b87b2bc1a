pub mod traits;
pub mod evolution;
pub mod ml;
pub mod data;
pub mod output;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use ml::{MLConfig, ClassifierConfig};
pub use data::DataConfig;
pub use output::OutputConfig;
pub use traits::ConfigSection;
