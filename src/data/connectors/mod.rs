mod csv;
mod validator;

pub use csv::{CsvConnector, IRIS_TARGET_COLUMN};
pub use validator::DataValidator;
