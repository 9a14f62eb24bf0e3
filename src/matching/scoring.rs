use std::collections::HashSet;

use crate::catalog::index::CriticalHits;
use crate::catalog::store::ReferenceTables;
use crate::core::types::{Severity, SymptomId};

/// Severity assumed by the clinical relevance scorer for unlisted symptoms
pub const CLINICAL_DEFAULT_SEVERITY: Severity = 3;

/// Multiplier for diseases flagged by a critical symptom in the query
pub const CRITICAL_BONUS: f64 = 2.0;

/// Matched-symptom count at which the count factor saturates
pub const SYMPTOM_COUNT_SATURATION: usize = 5;

/// Score to percentage scale
pub const CONFIDENCE_SCALE: f64 = 60.0;

/// Upper bound on clinical relevance confidence
pub const CONFIDENCE_CAP: f64 = 98.0;

/// Queries with fewer input symptoms than this are penalized
pub const LOW_EVIDENCE_THRESHOLD: usize = 3;

/// Confidence multiplier for low-evidence queries
pub const LOW_EVIDENCE_PENALTY: f64 = 0.7;

/// Safely convert usize to f64 for ratio calculations
///
/// Symptom and disease counts are far below the f64 mantissa limit.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Weights of the four clinical sub-scores
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClinicalWeights {
    /// Weight for matched severity relative to the disease's total severity
    pub severity: f64,
    /// Weight for the fraction of the disease's symptoms present
    pub coverage: f64,
    /// Weight for the critical-symptom specificity bonus
    pub specificity: f64,
    /// Weight for the saturating matched-symptom count
    pub symptom_count: f64,
}

impl Default for ClinicalWeights {
    fn default() -> Self {
        Self {
            severity: 0.35,      // 35%
            coverage: 0.25,      // 25%
            specificity: 0.15,   // 15%
            symptom_count: 0.25, // 25%
        }
    }
}

/// Sub-scores and final score of one disease against a query
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalScore {
    /// Input symptoms listed for the disease, in input order
    pub matching_symptoms: Vec<SymptomId>,

    /// Sum of severities of the matched symptoms
    pub severity_score: i64,

    /// Sum of severities over all of the disease's symptoms
    pub total_severity: i64,

    /// |matched| / |disease symptoms|
    pub coverage_ratio: f64,

    /// Sum of `1 / (n + 1)` over matched critical symptoms
    pub specificity_bonus: f64,

    /// `min(1, |matched| / 5)`
    pub symptom_count_factor: f64,

    /// Disease is flagged by a critical symptom in the query
    pub is_critical: bool,

    /// Weighted combination, multiplied by the critical bonus
    pub final_score: f64,
}

/// Input symptoms that appear in `disease_symptoms`, deduplicated, in input order
pub(crate) fn matching_symptoms<S: AsRef<str>>(
    input: &[S],
    disease_symptoms: &[SymptomId],
) -> Vec<SymptomId> {
    let listed: HashSet<&str> = disease_symptoms.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    input
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| listed.contains(s) && seen.insert(*s))
        .map(str::to_string)
        .collect()
}

impl ClinicalScore {
    /// Score one disease, or `None` when it shares no symptom with the query
    /// (such diseases are excluded from ranking entirely).
    #[must_use]
    pub fn calculate<S: AsRef<str>>(
        input: &[S],
        disease: &str,
        disease_symptoms: &[SymptomId],
        tables: &ReferenceTables,
        critical: &CriticalHits,
        weights: &ClinicalWeights,
    ) -> Option<Self> {
        if disease_symptoms.is_empty() {
            return None;
        }

        let matched = matching_symptoms(input, disease_symptoms);
        if matched.is_empty() {
            return None;
        }

        let severity_of = |s: &SymptomId| i64::from(tables.severity_or(s, CLINICAL_DEFAULT_SEVERITY));
        let severity_score: i64 = matched.iter().map(severity_of).sum();
        let total_severity: i64 = disease_symptoms.iter().map(severity_of).sum();

        let coverage_ratio = count_to_f64(matched.len()) / count_to_f64(disease_symptoms.len());

        let index = tables.critical_index();
        let specificity_bonus: f64 = matched.iter().filter_map(|s| index.specificity(s)).sum();

        let symptom_count_factor =
            (count_to_f64(matched.len()) / count_to_f64(SYMPTOM_COUNT_SATURATION)).min(1.0);

        #[allow(clippy::cast_precision_loss)]
        let severity_ratio = severity_score as f64 / total_severity.max(1) as f64;

        let is_critical = critical.contains(disease);
        let bonus = if is_critical { CRITICAL_BONUS } else { 1.0 };

        let final_score = (weights.severity * severity_ratio
            + weights.coverage * coverage_ratio
            + weights.specificity * specificity_bonus
            + weights.symptom_count * symptom_count_factor)
            * bonus;

        Some(Self {
            matching_symptoms: matched,
            severity_score,
            total_severity,
            coverage_ratio,
            specificity_bonus,
            symptom_count_factor,
            is_critical,
            final_score,
        })
    }
}

/// Percentage confidence for a clinical relevance score.
///
/// Scaled and capped at 98, then penalized when fewer than three symptoms were
/// supplied. Never negative.
#[must_use]
pub fn clinical_confidence(final_score: f64, input_count: usize) -> f64 {
    let mut confidence = (final_score * CONFIDENCE_SCALE).min(CONFIDENCE_CAP);
    if input_count < LOW_EVIDENCE_THRESHOLD {
        confidence *= LOW_EVIDENCE_PENALTY;
    }
    confidence.max(0.0)
}
