use crate::error::{Result, TopologyError};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Validate that the target column exists and every other column is numeric.
    ///
    /// Returns the feature column names in file order.
    pub fn validate_columns(df: &DataFrame, target_column: &str) -> Result<Vec<String>> {
        let columns = df.get_column_names();
        if !columns.iter().any(|col| col.as_str() == target_column) {
            return Err(TopologyError::DataLoading(format!(
                "Missing target column: {} (found: {:?})",
                target_column, columns
            )));
        }

        let mut feature_columns = Vec::new();
        for col_name in columns {
            if col_name.as_str() == target_column {
                continue;
            }
            let series = df.column(col_name)?;
            if !matches!(series.dtype(), DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32) {
                return Err(TopologyError::DataLoading(format!(
                    "Feature column '{}' must be numeric, found {:?}",
                    col_name,
                    series.dtype()
                )));
            }
            feature_columns.push(col_name.to_string());
        }

        if feature_columns.is_empty() {
            return Err(TopologyError::DataLoading(
                "Dataset has no feature columns".to_string(),
            ));
        }

        Ok(feature_columns)
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(TopologyError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Null counts per column, only for columns that have any
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_validate_good_data() {
        let df = df! {
            "a" => &[1.0, 2.0, 3.0],
            "b" => &[1i64, 2, 3],
            "label" => &["x", "y", "x"],
        }
        .unwrap();

        let features = DataValidator::validate_columns(&df, "label").unwrap();
        assert_eq!(features, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_validate_missing_target() {
        let df = df! {
            "a" => &[1.0, 2.0],
            "b" => &[3.0, 4.0],
        }
        .unwrap();

        assert!(DataValidator::validate_columns(&df, "label").is_err());
    }

    #[test]
    fn test_validate_non_numeric_feature() {
        let df = df! {
            "a" => &["1.0", "2.0"],
            "label" => &["x", "y"],
        }
        .unwrap();

        assert!(DataValidator::validate_columns(&df, "label").is_err());
    }

    #[test]
    fn test_minimum_rows() {
        let df = df! { "a" => &[1.0, 2.0] }.unwrap();
        assert!(DataValidator::validate_minimum_rows(&df, 2).is_ok());
        assert!(DataValidator::validate_minimum_rows(&df, 3).is_err());
    }
}
