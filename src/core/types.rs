use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Normalized symptom token, e.g. `high_fever`
pub type SymptomId = String;

/// Free-text disease name, the unit of prediction
pub type DiseaseName = String;

/// Integer clinical weight of a symptom
pub type Severity = i32;

/// Disease name reported when no strategy finds a candidate
pub const UNKNOWN_DISEASE: &str = "Unknown";

/// Which strategy produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    /// Trained classifier (first resort, when present)
    Classifier,
    /// Multi-factor clinical relevance scorer
    ClinicalRelevance,
    /// Severity-weighted coverage scorer (degraded mode)
    SeverityCoverage,
    /// Raw overlap count against the fallback table (degraded mode)
    BasicOverlap,
    /// Every strategy came up empty
    NoMatch,
    /// Input was rejected before scoring
    InvalidInput,
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classifier => write!(f, "classifier"),
            Self::ClinicalRelevance => write!(f, "clinical relevance"),
            Self::SeverityCoverage => write!(f, "severity coverage"),
            Self::BasicOverlap => write!(f, "basic overlap"),
            Self::NoMatch => write!(f, "no match"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}

/// Where a reference table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Parsed from a file on disk
    File(PathBuf),
    /// Hardcoded fallback table
    Fallback,
}

impl TableSource {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Fallback => write!(f, "built-in fallback"),
        }
    }
}

/// A single ranked answer for a symptom set.
///
/// Optional fields are omitted from JSON when absent rather than emitted as
/// `null` or empty placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: DiseaseName,

    /// Percentage in `[0, 100]`
    pub confidence: f64,

    #[serde(default)]
    pub matching_symptoms: Vec<SymptomId>,

    #[serde(default)]
    pub matching_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Strategy that produced this result (not part of the JSON contract)
    #[serde(skip, default = "default_method")]
    pub method: PredictionMethod,
}

fn default_method() -> PredictionMethod {
    PredictionMethod::NoMatch
}

impl PredictionResult {
    /// Build a result for a matched disease with no annotations attached yet
    pub fn matched(
        disease: impl Into<DiseaseName>,
        confidence: f64,
        matching_symptoms: Vec<SymptomId>,
        method: PredictionMethod,
    ) -> Self {
        let matching_count = matching_symptoms.len();
        Self {
            disease: disease.into(),
            confidence,
            matching_symptoms,
            matching_count,
            description: None,
            precautions: None,
            error: None,
            method,
        }
    }

    /// The "Unknown" answer with zero confidence
    #[must_use]
    pub fn unknown() -> Self {
        Self::matched(UNKNOWN_DISEASE, 0.0, Vec::new(), PredictionMethod::NoMatch)
    }

    /// An error-carrying result; never a raised failure
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            method: PredictionMethod::InvalidInput,
            ..Self::unknown()
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.disease == UNKNOWN_DISEASE
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_precautions(mut self, precautions: Option<Vec<String>>) -> Self {
        self.precautions = precautions;
        self
    }
}
