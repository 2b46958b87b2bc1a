pub mod evaluator;
pub mod kfold;
pub mod mlp;

pub use evaluator::{CrossValidationResult, FitnessFunction, MlpLayersEvaluator};
pub use kfold::{DataSplitter, FoldSplit, KFold};
pub use mlp::{FitReport, MlpClassifier};
