use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::prediction::model::{RiskFeatures, RiskLabel};

/// One audited prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub recorded_at: DateTime<Utc>,
    pub age: f64,
    pub bmi: f64,
    pub glucose: f64,
    pub insulin: f64,
    pub result: String,
}

impl PredictionRecord {
    pub fn new(features: &RiskFeatures, label: &RiskLabel) -> Self {
        Self {
            recorded_at: Utc::now(),
            age: features.age,
            bmi: features.bmi,
            glucose: features.glucose,
            insulin: features.insulin,
            result: label.0.clone(),
        }
    }
}

/// Audit trail of predictions.
pub trait PredictionLog {
    fn record(&mut self, features: &RiskFeatures, label: &RiskLabel) -> Result<PredictionRecord>;

    /// All records, oldest first.
    fn history(&self) -> Result<Vec<PredictionRecord>>;
}

/// Append-only CSV log.
pub struct CsvPredictionLog {
    path: PathBuf,
}

impl CsvPredictionLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PredictionLog for CsvPredictionLog {
    fn record(&mut self, features: &RiskFeatures, label: &RiskLabel) -> Result<PredictionRecord> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Header only for a fresh file
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        let record = PredictionRecord::new(features, label);
        wtr.serialize(&record)?;
        wtr.flush()?;

        debug!(result = %record.result, path = %self.path.display(), "prediction recorded");
        Ok(record)
    }

    fn history(&self) -> Result<Vec<PredictionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in rdr.deserialize() {
            let record: PredictionRecord = row?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Copy records to a standalone CSV file.
pub fn write_history_csv<P: AsRef<Path>>(records: &[PredictionRecord], path: P) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
