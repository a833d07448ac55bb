//! Prediction commands

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use predictor_lib::{Baby, EnvToken, MockPredictionClient, PredictionClient, StaticToken};
use serde::Serialize;
use tabled::Tabled;

use crate::config::Settings;
use crate::output::{format_weight, print_items, print_success, OutputFormat};
use crate::Cli;

/// Row for the batch prediction table
#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

/// JSON-facing prediction record
#[derive(Serialize)]
struct PredictionRecord {
    key: String,
    predicted: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<f64>,
}

/// Predict the weight for a single CSV record
pub async fn predict_one(
    cli: &Cli,
    settings: &Settings,
    record: &str,
    default_value: f64,
) -> Result<()> {
    let baby = Baby::from_csv(record).context("Failed to parse CSV record")?;

    let predicted = if cli.mock {
        let mut mock = MockPredictionClient::new();
        mock.mock_batch_predict(std::slice::from_ref(&baby))[0]
    } else {
        let client = build_client(settings)?;
        client
            .predict(&baby, default_value)
            .await
            .context("Prediction request failed")?
    };

    let result = PredictionRecord {
        key: baby.key.clone(),
        predicted,
        actual: baby.weight_pounds,
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            let actual = baby
                .weight_pounds
                .map(format_weight)
                .unwrap_or_else(|| "-".to_string());
            print_success(&format!(
                "key={} predicted={} actual={}",
                result.key,
                format_weight(predicted),
                actual
            ));
        }
    }

    Ok(())
}

/// Predict weights for every record in a CSV file
pub async fn predict_file(cli: &Cli, settings: &Settings, input: &str) -> Result<()> {
    let records = read_records(Path::new(input))?;
    tracing::debug!(records = records.len(), input, "loaded input records");

    let weights = if cli.mock {
        MockPredictionClient::new().mock_batch_predict(&records)
    } else {
        let client = build_client(settings)?;
        client
            .batch_predict(&records)
            .await
            .context("Batch prediction request failed")?
    };

    let results: Vec<PredictionRecord> = records
        .iter()
        .zip(&weights)
        .map(|(baby, &predicted)| PredictionRecord {
            key: baby.key.clone(),
            predicted,
            actual: baby.weight_pounds,
        })
        .collect();

    let rows: Vec<PredictionRow> = results
        .iter()
        .map(|r| PredictionRow {
            key: r.key.clone(),
            predicted: format_weight(r.predicted),
            actual: r
                .actual
                .map(format_weight)
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    print_items(&rows, &results, cli.format)?;
    if matches!(cli.format, OutputFormat::Table) && !results.is_empty() {
        println!("\nTotal: {} records", results.len());
    }

    Ok(())
}

fn build_client(settings: &Settings) -> Result<PredictionClient> {
    let client = match &settings.token {
        Some(token) => PredictionClient::new(
            settings.client.clone(),
            Arc::new(StaticToken::new(token.clone())),
        ),
        None => PredictionClient::new(settings.client.clone(), Arc::new(EnvToken::new())),
    };
    client.context("Failed to create prediction client")
}

/// Read CSV records from a file, one per line; '#' comments and blank
/// lines are skipped.
fn read_records(path: &Path) -> Result<Vec<Baby>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let baby = Baby::from_csv(line)
            .with_context(|| format!("Invalid record on line {}", index + 1))?;
        records.push(baby);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_records_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header comment").unwrap();
        writeln!(file, "7.27084540076,True,28,White,1,40.0,True,,,somekey").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "6.5,False,31,Asian,1,38.0,True,,,other").unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "somekey");
        assert_eq!(records[1].key, "other");
    }

    #[test]
    fn test_read_records_reports_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "7.27,True,28,White,1,40.0,True,,,k1").unwrap();
        writeln!(file, "not,a,record").unwrap();

        let err = read_records(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/records.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
