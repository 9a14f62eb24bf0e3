//! Parsers for the four reference tables and the training-table header.
//!
//! Every parser treats the first row as a header and skips it. Structural
//! problems in a single row skip that row only; a read or CSV-level error fails
//! the whole table so the caller can substitute its fallback in full.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{DiseaseName, Severity, SymptomId};

/// Label column of the training table
pub const PROGNOSIS_COLUMN: &str = "prognosis";

#[derive(Error, Debug)]
pub enum TableError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table has no header row")]
    MissingHeader,
}

/// Parsed disease/symptom dataset
#[derive(Debug, Clone, Default)]
pub struct DiseaseDataset {
    /// Disease to deduplicated symptom list, in first-seen order
    pub diseases: IndexMap<DiseaseName, Vec<SymptomId>>,

    /// Every accepted symptom token, sorted and deduplicated
    pub symptoms: Vec<SymptomId>,
}

/// A field is kept unless it is blank or the literal `null` (any case)
fn clean_field(field: &str) -> Option<&str> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed)
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

/// Read all data rows, failing on the first CSV-level error
fn data_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    match records.next() {
        None => return Err(TableError::MissingHeader),
        Some(header) => {
            header?;
        }
    }

    Ok(records.collect::<Result<Vec<_>, _>>()?)
}

fn open(path: &Path) -> Result<File, TableError> {
    if !path.exists() {
        return Err(TableError::NotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Parse disease/symptom rows: `disease, symptom_1, ..., symptom_n`.
///
/// Rows repeating a disease are unioned into its existing symptom list.
///
/// # Errors
///
/// Returns `TableError` if the text cannot be read as CSV or has no header.
pub fn parse_dataset<R: Read>(reader: R) -> Result<DiseaseDataset, TableError> {
    let mut diseases: IndexMap<DiseaseName, Vec<SymptomId>> = IndexMap::new();
    let mut all_symptoms = BTreeSet::new();

    for record in data_rows(reader)? {
        let Some(disease) = record.get(0).map(str::trim).filter(|d| !d.is_empty()) else {
            debug!(line = line_of(&record), "skipping dataset row without a disease");
            continue;
        };

        let symptoms = diseases.entry(disease.to_string()).or_default();
        for symptom in record.iter().skip(1).filter_map(clean_field) {
            all_symptoms.insert(symptom.to_string());
            if !symptoms.iter().any(|s| s == symptom) {
                symptoms.push(symptom.to_string());
            }
        }
    }

    Ok(DiseaseDataset {
        diseases,
        symptoms: all_symptoms.into_iter().collect(),
    })
}

/// Parse description rows: `disease, description`
///
/// # Errors
///
/// Returns `TableError` if the text cannot be read as CSV or has no header.
pub fn parse_descriptions<R: Read>(reader: R) -> Result<HashMap<DiseaseName, String>, TableError> {
    let mut descriptions = HashMap::new();

    for record in data_rows(reader)? {
        if record.len() < 2 {
            debug!(line = line_of(&record), "skipping description row with fewer than 2 fields");
            continue;
        }
        descriptions.insert(record[0].trim().to_string(), record[1].trim().to_string());
    }

    Ok(descriptions)
}

/// Parse precaution rows: `disease, precaution_1, ..., precaution_n`
///
/// # Errors
///
/// Returns `TableError` if the text cannot be read as CSV or has no header.
pub fn parse_precautions<R: Read>(
    reader: R,
) -> Result<HashMap<DiseaseName, Vec<String>>, TableError> {
    let mut precautions = HashMap::new();

    for record in data_rows(reader)? {
        if record.len() < 2 {
            debug!(line = line_of(&record), "skipping precaution row with fewer than 2 fields");
            continue;
        }
        let items = record
            .iter()
            .skip(1)
            .filter_map(clean_field)
            .map(str::to_string)
            .collect();
        precautions.insert(record[0].trim().to_string(), items);
    }

    Ok(precautions)
}

/// Parse severity rows: `symptom, weight`.
///
/// Rows whose weight is not an integer are dropped, not defaulted.
///
/// # Errors
///
/// Returns `TableError` if the text cannot be read as CSV or has no header.
pub fn parse_severity<R: Read>(reader: R) -> Result<HashMap<SymptomId, Severity>, TableError> {
    let mut severity = HashMap::new();

    for record in data_rows(reader)? {
        if record.len() < 2 {
            debug!(line = line_of(&record), "skipping severity row with fewer than 2 fields");
            continue;
        }
        match record[1].trim().parse::<Severity>() {
            Ok(weight) => {
                severity.insert(record[0].trim().to_string(), weight);
            }
            Err(_) => {
                debug!(
                    line = line_of(&record),
                    value = &record[1],
                    "dropping severity row with non-integer weight"
                );
            }
        }
    }

    Ok(severity)
}

/// Symptom columns of the training table: every header except `prognosis`
///
/// # Errors
///
/// Returns `TableError` if the text cannot be read as CSV or has no header.
pub fn parse_training_columns<R: Read>(reader: R) -> Result<Vec<SymptomId>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if headers.is_empty() {
        return Err(TableError::MissingHeader);
    }

    Ok(headers
        .iter()
        .map(str::trim)
        .filter(|h| !h.is_empty() && *h != PROGNOSIS_COLUMN)
        .map(str::to_string)
        .collect())
}

/// Parse the disease/symptom dataset from a file
///
/// # Errors
///
/// Returns `TableError::NotFound` if the file is missing, or any parse error.
pub fn parse_dataset_file(path: &Path) -> Result<DiseaseDataset, TableError> {
    parse_dataset(open(path)?)
}

/// # Errors
///
/// Returns `TableError::NotFound` if the file is missing, or any parse error.
pub fn parse_descriptions_file(path: &Path) -> Result<HashMap<DiseaseName, String>, TableError> {
    parse_descriptions(open(path)?)
}

/// # Errors
///
/// Returns `TableError::NotFound` if the file is missing, or any parse error.
pub fn parse_precautions_file(
    path: &Path,
) -> Result<HashMap<DiseaseName, Vec<String>>, TableError> {
    parse_precautions(open(path)?)
}

/// # Errors
///
/// Returns `TableError::NotFound` if the file is missing, or any parse error.
pub fn parse_severity_file(path: &Path) -> Result<HashMap<SymptomId, Severity>, TableError> {
    parse_severity(open(path)?)
}

/// # Errors
///
/// Returns `TableError::NotFound` if the file is missing, or any parse error.
pub fn parse_training_columns_file(path: &Path) -> Result<Vec<SymptomId>, TableError> {
    parse_training_columns(open(path)?)
}
