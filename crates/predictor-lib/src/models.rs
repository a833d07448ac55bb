//! Feature record for the babyweight model

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// Column order of a babyweight CSV record, matching the training pipeline
const CSV_COLUMN_COUNT: usize = 10;

/// Key substituted when the key column is empty
const DEFAULT_KEY: &str = "nokey";

/// One observation's input fields.
///
/// Numeric columns parse to `None` when empty; the target column
/// (`weight_pounds`) is present on labelled records and absent on
/// records submitted purely for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    pub weight_pounds: Option<f64>,
    pub is_male: Option<String>,
    pub mother_age: Option<f64>,
    pub mother_race: Option<String>,
    pub plurality: Option<f64>,
    pub gestation_weeks: Option<f64>,
    pub mother_married: Option<String>,
    pub cigarette_use: Option<String>,
    pub alcohol_use: Option<String>,
    pub key: String,
}

impl Baby {
    /// Parse a fixed-order comma-separated record:
    /// `weight_pounds,is_male,mother_age,mother_race,plurality,
    /// gestation_weeks,mother_married,cigarette_use,alcohol_use,key`
    pub fn from_csv(line: &str) -> Result<Self, PredictError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != CSV_COLUMN_COUNT {
            return Err(PredictError::Csv(format!(
                "expected {} columns, found {}",
                CSV_COLUMN_COUNT,
                fields.len()
            )));
        }

        Ok(Baby {
            weight_pounds: parse_float(fields[0], "weight_pounds")?,
            is_male: parse_string(fields[1]),
            mother_age: parse_float(fields[2], "mother_age")?,
            mother_race: parse_string(fields[3]),
            plurality: parse_float(fields[4], "plurality")?,
            gestation_weeks: parse_float(fields[5], "gestation_weeks")?,
            mother_married: parse_string(fields[6]),
            cigarette_use: parse_string(fields[7]),
            alcohol_use: parse_string(fields[8]),
            key: if fields[9].is_empty() {
                DEFAULT_KEY.to_string()
            } else {
                fields[9].to_string()
            },
        })
    }
}

fn parse_float(field: &str, column: &str) -> Result<Option<f64>, PredictError> {
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|_| PredictError::Csv(format!("column {} is not numeric: {:?}", column, field)))
}

fn parse_string(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "7.27084540076,True,28,White,1,40.0,True,,,somekey";

    #[test]
    fn test_from_csv_sample_record() {
        let baby = Baby::from_csv(SAMPLE).unwrap();
        assert_eq!(baby.weight_pounds, Some(7.27084540076));
        assert_eq!(baby.is_male.as_deref(), Some("True"));
        assert_eq!(baby.mother_age, Some(28.0));
        assert_eq!(baby.mother_race.as_deref(), Some("White"));
        assert_eq!(baby.plurality, Some(1.0));
        assert_eq!(baby.gestation_weeks, Some(40.0));
        assert_eq!(baby.mother_married.as_deref(), Some("True"));
        assert_eq!(baby.cigarette_use, None);
        assert_eq!(baby.alcohol_use, None);
        assert_eq!(baby.key, "somekey");
    }

    #[test]
    fn test_from_csv_empty_key_gets_default() {
        let baby = Baby::from_csv("7.5,True,30,White,1,39.0,True,,,").unwrap();
        assert_eq!(baby.key, "nokey");
    }

    #[test]
    fn test_from_csv_missing_target() {
        let baby = Baby::from_csv(",True,30,White,1,39.0,True,,,k1").unwrap();
        assert_eq!(baby.weight_pounds, None);
    }

    #[test]
    fn test_from_csv_wrong_column_count() {
        let result = Baby::from_csv("1.0,True,28");
        assert!(matches!(result, Err(PredictError::Csv(_))));
    }

    #[test]
    fn test_from_csv_non_numeric_column() {
        let result = Baby::from_csv("heavy,True,28,White,1,40.0,True,,,k1");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("weight_pounds"));
    }
}
