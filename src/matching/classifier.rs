//! Optional trained-classifier capability.
//!
//! A classifier is selected once at startup and consulted ahead of the scoring
//! chain. Any error it reports, including [`ClassifierError::Unavailable`],
//! hands control to the clinical relevance scorer; classifier errors never
//! reach the caller.

use thiserror::Error;

use crate::core::types::{DiseaseName, SymptomId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("No trained classifier is available")]
    Unavailable,

    #[error("Training table is missing column '{0}'")]
    MissingColumn(String),

    #[error("Classifier failed: {0}")]
    Failed(String),
}

/// Top class of a classifier and its probability
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub disease: DiseaseName,
    /// Class probability in `[0, 1]`
    pub probability: f64,
}

/// A disease classifier working on a binary symptom presence vector
pub trait DiseaseClassifier: Send + Sync {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Predict the most likely disease for a symptom set.
    ///
    /// # Errors
    ///
    /// Returns a `ClassifierError` when the classifier cannot produce an answer.
    fn classify(&self, symptoms: &[SymptomId]) -> Result<Classification, ClassifierError>;

    /// Symptom columns the classifier was trained on
    fn symptom_columns(&self) -> Vec<SymptomId> {
        Vec::new()
    }
}

/// The absent variant: always signals unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClassifier;

impl DiseaseClassifier for UnavailableClassifier {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn classify(&self, _symptoms: &[SymptomId]) -> Result<Classification, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }
}
