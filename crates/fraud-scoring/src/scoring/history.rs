use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::domain::{Transaction, TransactionSubmission};
use super::guard::InvalidInput;

/// Failure while loading transaction history from a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum HistoryImportError {
    #[error("failed to read transaction history: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transaction history CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unrecognized timestamp {value:?}")]
    Timestamp { line: u64, value: String },
    #[error("transaction history exceeds {limit} rows")]
    TooManyRows { limit: usize },
    #[error("line {line}: {source}")]
    Invalid {
        line: u64,
        #[source]
        source: InvalidInput,
    },
}

/// Loads previous transactions from `amount,timestamp,location` CSV data.
pub struct HistoryImporter;

impl HistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, HistoryImportError> {
        Self::from_path_limited(path, usize::MAX)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, HistoryImportError> {
        Self::from_reader_limited(reader, usize::MAX)
    }

    /// Like [`HistoryImporter::from_path`], failing once more than `limit` rows are read.
    pub fn from_path_limited<P: AsRef<Path>>(
        path: P,
        limit: usize,
    ) -> Result<Vec<Transaction>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader_limited(file, limit)
    }

    pub fn from_reader_limited<R: Read>(
        mut reader: R,
        limit: usize,
    ) -> Result<Vec<Transaction>, HistoryImportError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(raw.as_slice());
        let headers = csv_reader.headers()?.clone();
        let mut transactions = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            if transactions.len() == limit {
                return Err(HistoryImportError::TooManyRows { limit });
            }

            let line = record
                .position()
                .map_or(0, |position| record_line(&raw, position));
            let row: HistoryRow = record.deserialize(Some(&headers))?;
            let timestamp =
                parse_timestamp(&row.timestamp).ok_or_else(|| HistoryImportError::Timestamp {
                    line,
                    value: row.timestamp.clone(),
                })?;

            let transaction = Transaction::try_from(TransactionSubmission {
                amount: row.amount,
                timestamp: Some(timestamp),
                location: row.location,
            })
            .map_err(|source| HistoryImportError::Invalid { line, source })?;

            transactions.push(transaction);
        }

        Ok(transactions)
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    amount: f64,
    timestamp: String,
    location: String,
}

// The reader stamps a record's position before skipping blank lines, so
// step over any line terminators between that offset and the first field.
fn record_line(raw: &[u8], position: &csv::Position) -> u64 {
    let offset = usize::try_from(position.byte())
        .unwrap_or(raw.len())
        .min(raw.len());
    let skipped = raw[offset..]
        .iter()
        .take_while(|byte| matches!(**byte, b'\r' | b'\n'))
        .filter(|byte| **byte == b'\n')
        .count();
    position.line() + skipped as u64
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
