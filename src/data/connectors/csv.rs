use crate::data::Dataset;
use crate::error::{Result, TopologyError};
use polars::prelude::*;
use rulinalg::matrix::Matrix;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::Path;

use super::validator::DataValidator;

/// Iris flower measurements: 4 numeric features, 3 classes, 150 samples.
const IRIS_CSV: &str = include_str!("../bundled/iris.csv");
pub const IRIS_TARGET_COLUMN: &str = "species";

/// A classifier needs at least one sample per fold; anything smaller is a typo.
const MIN_ROWS: usize = 10;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| TopologyError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Parse in-memory CSV text into DataFrame
    pub fn parse(contents: &'static str) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(contents.as_bytes()))
            .finish()
            .map_err(|e| TopologyError::DataLoading(format!("Failed to parse CSV: {}", e)))?;

        Ok(df)
    }

    /// The bundled iris dataset
    pub fn load_iris() -> Result<Dataset> {
        let df = Self::parse(IRIS_CSV)?;
        Self::to_dataset(&df, IRIS_TARGET_COLUMN)
    }

    /// Load and convert a user CSV; every column except `target_column` is a feature
    pub fn load_dataset<P: AsRef<Path>>(path: P, target_column: &str) -> Result<Dataset> {
        let df = Self::load(&path)?;

        DataValidator::validate_minimum_rows(&df, MIN_ROWS)?;

        // Warn about nulls; the conversion below rejects them
        let null_report = DataValidator::check_nulls(&df)?;
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        Self::to_dataset(&df, target_column)
    }

    /// Convert a DataFrame into a feature matrix plus class indices.
    ///
    /// Classes are numbered in sorted order of their label text.
    pub fn to_dataset(df: &DataFrame, target_column: &str) -> Result<Dataset> {
        let feature_names = DataValidator::validate_columns(df, target_column)?;
        let n_rows = df.height();
        let n_cols = feature_names.len();

        let mut columns = Vec::with_capacity(n_cols);
        for name in &feature_names {
            let cast = df.column(name)?.cast(&DataType::Float64)?;
            let values = cast.f64()?;
            let mut column = Vec::with_capacity(n_rows);
            for i in 0..n_rows {
                let value = values.get(i).ok_or_else(|| {
                    TopologyError::DataLoading(format!("Missing value in column '{}' at row {}", name, i))
                })?;
                column.push(value);
            }
            columns.push(column);
        }

        // Row-major layout for the matrix
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            for column in &columns {
                data.push(column[i]);
            }
        }

        let target = df.column(target_column)?.cast(&DataType::String)?;
        let target = target.str()?;
        let mut raw_labels = Vec::with_capacity(n_rows);
        for i in 0..n_rows {
            let label = target.get(i).ok_or_else(|| {
                TopologyError::DataLoading(format!("Missing label at row {}", i))
            })?;
            raw_labels.push(label.to_string());
        }

        let class_names: Vec<String> = raw_labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let labels = raw_labels
            .iter()
            .map(|label| class_names.binary_search(label).unwrap_or_default())
            .collect();

        Dataset::new(Matrix::new(n_rows, n_cols, data), labels, class_names, feature_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_bundled_iris_shape() {
        let iris = CsvConnector::load_iris().unwrap();
        assert_eq!(iris.n_samples(), 150);
        assert_eq!(iris.n_features(), 4);
        assert_eq!(iris.n_classes(), 3);
        assert_eq!(iris.class_counts(), vec![50, 50, 50]);
        assert_eq!(iris.class_names()[0], "setosa");
        assert_eq!(iris.feature_names()[3], "petal_width");
    }

    #[test]
    fn test_to_dataset_maps_labels_in_sorted_order() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0],
            "y" => &[4i64, 5, 6],
            "kind" => &["b", "a", "b"],
        }
        .unwrap();

        let dataset = CsvConnector::to_dataset(&df, "kind").unwrap();
        assert_eq!(dataset.class_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.labels(), &[1, 0, 1]);
        assert_eq!(dataset.features().data(), &vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_to_dataset_rejects_null_feature() {
        let df = df! {
            "x" => &[Some(1.0), None],
            "kind" => &["a", "b"],
        }
        .unwrap();

        assert!(CsvConnector::to_dataset(&df, "kind").is_err());
    }

    #[test]
    fn test_load_dataset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.csv");
        let mut contents = String::from("a,b,label\n");
        for i in 0..12 {
            contents.push_str(&format!("{}.0,{}.5,{}\n", i, i, i % 2));
        }
        std::fs::write(&path, contents).unwrap();

        let dataset = CsvConnector::load_dataset(&path, "label").unwrap();
        assert_eq!(dataset.n_samples(), 12);
        assert_eq!(dataset.n_classes(), 2);
        assert_eq!(dataset.labels()[3], 1);
    }
}
