use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::catalog::fallback;
use crate::catalog::index::CriticalIndex;
use crate::catalog::sources::DataSources;
use crate::core::types::{DiseaseName, Severity, SymptomId, TableSource};
use crate::parsing::tables::{
    self, parse_dataset_file, parse_descriptions_file, parse_precautions_file,
    parse_severity_file, parse_training_columns_file, TableError,
};

/// Provenance of each loaded table
#[derive(Debug, Clone)]
pub struct TableProvenance {
    pub diseases: TableSource,
    pub descriptions: TableSource,
    pub precautions: TableSource,
    pub severity: TableSource,
}

impl Default for TableProvenance {
    fn default() -> Self {
        Self {
            diseases: TableSource::Fallback,
            descriptions: TableSource::Fallback,
            precautions: TableSource::Fallback,
            severity: TableSource::Fallback,
        }
    }
}

/// Immutable reference data shared by every prediction.
///
/// Built once before any request is served and never mutated afterwards, so it
/// can be shared across callers without locking.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    /// Disease to symptom list, in first-seen order
    diseases: IndexMap<DiseaseName, Vec<SymptomId>>,

    descriptions: HashMap<DiseaseName, String>,

    precautions: HashMap<DiseaseName, Vec<String>>,

    severity: HashMap<SymptomId, Severity>,

    /// Sorted vocabulary derived from the disease table source
    symptoms: Vec<SymptomId>,

    /// Symptom columns of the classifier training table, when present
    training_columns: Vec<SymptomId>,

    critical: CriticalIndex,

    provenance: TableProvenance,
}

/// Take the parsed table, or log why it failed and use its fallback in full
fn or_fallback<T>(
    resource: &str,
    path: &Path,
    parsed: Result<T, TableError>,
    fallback: impl FnOnce() -> T,
) -> (T, TableSource) {
    match parsed {
        Ok(table) => (table, TableSource::File(path.to_path_buf())),
        Err(e) => {
            warn!(resource, path = %path.display(), error = %e, "using built-in fallback");
            (fallback(), TableSource::Fallback)
        }
    }
}

impl ReferenceTables {
    /// Tables built entirely from the hardcoded fallbacks
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            diseases: fallback::fallback_disease_map(),
            descriptions: fallback::fallback_descriptions(),
            precautions: fallback::fallback_precautions(),
            severity: fallback::fallback_severity(),
            symptoms: fallback::fallback_symptoms(),
            training_columns: Vec::new(),
            critical: CriticalIndex::builtin(),
            provenance: TableProvenance::default(),
        }
    }

    /// Load all four tables, each falling back independently of the others
    #[must_use]
    pub fn load(sources: &DataSources) -> Self {
        let dataset_path = sources.dataset();
        let (dataset, diseases_source) = or_fallback(
            "diseases",
            &dataset_path,
            parse_dataset_file(&dataset_path),
            || tables::DiseaseDataset {
                diseases: fallback::fallback_disease_map(),
                symptoms: fallback::fallback_symptoms(),
            },
        );
        if !diseases_source.is_fallback() {
            info!(
                diseases = dataset.diseases.len(),
                symptoms = dataset.symptoms.len(),
                "loaded disease/symptom dataset"
            );
        }

        let description_path = sources.descriptions();
        let (descriptions, descriptions_source) = or_fallback(
            "descriptions",
            &description_path,
            parse_descriptions_file(&description_path),
            fallback::fallback_descriptions,
        );
        if !descriptions_source.is_fallback() {
            info!(count = descriptions.len(), "loaded disease descriptions");
        }

        let precaution_path = sources.precautions();
        let (precautions, precautions_source) = or_fallback(
            "precautions",
            &precaution_path,
            parse_precautions_file(&precaution_path),
            fallback::fallback_precautions,
        );
        if !precautions_source.is_fallback() {
            info!(count = precautions.len(), "loaded disease precautions");
        }

        let severity_path = sources.severity();
        let (severity, severity_source) = or_fallback(
            "severity",
            &severity_path,
            parse_severity_file(&severity_path),
            fallback::fallback_severity,
        );
        if !severity_source.is_fallback() {
            info!(count = severity.len(), "loaded symptom severities");
        }

        let training_path = sources.training();
        let training_columns = match parse_training_columns_file(&training_path) {
            Ok(columns) => {
                info!(columns = columns.len(), "loaded training table header");
                columns
            }
            Err(TableError::NotFound(_)) => {
                debug!(path = %training_path.display(), "no training table");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %training_path.display(), error = %e, "ignoring training table");
                Vec::new()
            }
        };

        Self {
            diseases: dataset.diseases,
            descriptions,
            precautions,
            severity,
            symptoms: dataset.symptoms,
            training_columns,
            critical: CriticalIndex::builtin(),
            provenance: TableProvenance {
                diseases: diseases_source,
                descriptions: descriptions_source,
                precautions: precautions_source,
                severity: severity_source,
            },
        }
    }

    /// Assemble tables from explicit data (synthetic fixtures, embedding)
    #[must_use]
    pub fn from_parts(
        diseases: IndexMap<DiseaseName, Vec<SymptomId>>,
        descriptions: HashMap<DiseaseName, String>,
        precautions: HashMap<DiseaseName, Vec<String>>,
        severity: HashMap<SymptomId, Severity>,
    ) -> Self {
        let mut symptoms: Vec<SymptomId> = diseases.values().flatten().cloned().collect();
        symptoms.sort_unstable();
        symptoms.dedup();

        Self {
            diseases,
            descriptions,
            precautions,
            severity,
            symptoms,
            training_columns: Vec::new(),
            critical: CriticalIndex::builtin(),
            provenance: TableProvenance::default(),
        }
    }

    /// Replace the critical-symptom index
    #[must_use]
    pub fn with_critical_index(mut self, critical: CriticalIndex) -> Self {
        self.critical = critical;
        self
    }

    /// Diseases and their symptom lists, in table order
    pub fn diseases(&self) -> impl Iterator<Item = (&DiseaseName, &Vec<SymptomId>)> {
        self.diseases.iter()
    }

    #[must_use]
    pub fn symptoms_of(&self, disease: &str) -> Option<&[SymptomId]> {
        self.diseases.get(disease).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_disease(&self, disease: &str) -> bool {
        self.diseases.contains_key(disease)
    }

    #[must_use]
    pub fn description(&self, disease: &str) -> Option<&str> {
        self.descriptions.get(disease).map(String::as_str)
    }

    #[must_use]
    pub fn precautions(&self, disease: &str) -> Option<&[String]> {
        self.precautions.get(disease).map(Vec::as_slice)
    }

    /// Severity weight, or `default` when the symptom has none
    #[must_use]
    pub fn severity_or(&self, symptom: &str, default: Severity) -> Severity {
        self.severity.get(symptom).copied().unwrap_or(default)
    }

    /// Sorted symptom vocabulary of the disease table source
    #[must_use]
    pub fn symptoms(&self) -> &[SymptomId] {
        &self.symptoms
    }

    /// Symptom columns of the training table (empty when it is absent)
    #[must_use]
    pub fn training_columns(&self) -> &[SymptomId] {
        &self.training_columns
    }

    #[must_use]
    pub fn critical_index(&self) -> &CriticalIndex {
        &self.critical
    }

    #[must_use]
    pub fn provenance(&self) -> &TableProvenance {
        &self.provenance
    }

    #[must_use]
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::fallback()
    }
}
