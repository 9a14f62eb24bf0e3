//! Degraded-mode scorers, tried only after the clinical relevance scorer finds
//! no candidate.
//!
//! 1. **Severity coverage**: re-scores the loaded disease table with a default
//!    severity of 1 and a three-term coverage blend.
//! 2. **Basic overlap**: counts raw overlaps against the built-in fallback
//!    disease table only, ignoring loaded data.

use crate::catalog::fallback::{
    fallback_description_for, fallback_precautions_for, FALLBACK_DISEASES,
};
use crate::catalog::store::ReferenceTables;
use crate::core::types::{PredictionMethod, PredictionResult, Severity, SymptomId};
use crate::matching::scoring::{count_to_f64, matching_symptoms};

/// Severity assumed by the severity coverage scorer for unlisted symptoms
pub const DEGRADED_DEFAULT_SEVERITY: Severity = 1;

/// Weight for |matched| / |disease symptoms|
const DISEASE_COVERAGE_WEIGHT: f64 = 0.4;
/// Weight for |matched| / |input symptoms|
const INPUT_COVERAGE_WEIGHT: f64 = 0.3;
/// Weight for matched severity / disease severity
const SEVERITY_COVERAGE_WEIGHT: f64 = 0.3;

/// Best candidate of the severity coverage scorer
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityCoverageMatch {
    pub disease: String,
    pub matching_symptoms: Vec<SymptomId>,
    pub final_score: f64,
}

/// Rank the loaded diseases by blended coverage.
///
/// Keeps the strict maximum, so the earlier disease in table order wins ties.
/// Returns `None` if no disease shares a symptom with the query.
#[must_use]
pub fn best_severity_coverage<S: AsRef<str>>(
    input: &[S],
    tables: &ReferenceTables,
) -> Option<SeverityCoverageMatch> {
    if input.is_empty() {
        return None;
    }

    let severity_of = |s: &SymptomId| i64::from(tables.severity_or(s, DEGRADED_DEFAULT_SEVERITY));
    let mut best: Option<SeverityCoverageMatch> = None;

    for (disease, symptoms) in tables.diseases() {
        let matched = matching_symptoms(input, symptoms);
        if matched.is_empty() {
            continue;
        }

        let coverage = count_to_f64(matched.len()) / count_to_f64(symptoms.len());
        let input_coverage = count_to_f64(matched.len()) / count_to_f64(input.len());

        let matched_severity: i64 = matched.iter().map(severity_of).sum();
        let disease_severity: i64 = symptoms.iter().map(severity_of).sum();
        #[allow(clippy::cast_precision_loss)]
        let severity_coverage = if disease_severity > 0 {
            matched_severity as f64 / disease_severity as f64
        } else {
            0.0
        };

        let final_score = DISEASE_COVERAGE_WEIGHT * coverage
            + INPUT_COVERAGE_WEIGHT * input_coverage
            + SEVERITY_COVERAGE_WEIGHT * severity_coverage;

        let best_score = best.as_ref().map_or(0.0, |b| b.final_score);
        if final_score > best_score {
            best = Some(SeverityCoverageMatch {
                disease: disease.clone(),
                matching_symptoms: matched,
                final_score,
            });
        }
    }

    best
}

/// Severity coverage prediction with confidence `min(score * 100, 100)`
#[must_use]
pub fn predict_with_severity<S: AsRef<str>>(
    input: &[S],
    tables: &ReferenceTables,
) -> Option<PredictionResult> {
    let best = best_severity_coverage(input, tables)?;
    let confidence = (best.final_score * 100.0).clamp(0.0, 100.0);

    let description = tables.description(&best.disease).map(str::to_string);
    let precautions = tables.precautions(&best.disease).map(<[String]>::to_vec);

    Some(
        PredictionResult::matched(
            best.disease,
            confidence,
            best.matching_symptoms,
            PredictionMethod::SeverityCoverage,
        )
        .with_description(description)
        .with_precautions(precautions),
    )
}

/// Largest raw overlap against the built-in fallback disease table.
///
/// Confidence is |matched| / |disease symptoms| * 100. Annotations come from
/// the loaded tables, else from the built-in fallbacks. Returns `None` when no
/// fallback disease shares a symptom with the query.
#[must_use]
pub fn predict_with_pattern_matching<S: AsRef<str>>(
    input: &[S],
    tables: &ReferenceTables,
) -> Option<PredictionResult> {
    let mut best: Option<(&str, usize, Vec<SymptomId>)> = None;

    for &(disease, symptoms) in FALLBACK_DISEASES {
        let symptoms: Vec<SymptomId> = symptoms.iter().map(|s| (*s).to_string()).collect();
        let matched = matching_symptoms(input, &symptoms);
        let best_count = best.as_ref().map_or(0, |(_, _, m)| m.len());
        if matched.len() > best_count {
            best = Some((disease, symptoms.len(), matched));
        }
    }

    let (disease, total, matched) = best?;
    let confidence = if total > 0 {
        count_to_f64(matched.len()) / count_to_f64(total) * 100.0
    } else {
        0.0
    };

    let description = tables
        .description(disease)
        .or_else(|| fallback_description_for(disease))
        .map(str::to_string);
    let precautions = tables
        .precautions(disease)
        .map(<[String]>::to_vec)
        .or_else(|| fallback_precautions_for(disease));

    Some(
        PredictionResult::matched(disease, confidence, matched, PredictionMethod::BasicOverlap)
            .with_description(description)
            .with_precautions(precautions),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashMap;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    fn tables(diseases: &[(&str, &[&str])], severity: &[(&str, i32)]) -> ReferenceTables {
        let diseases: IndexMap<_, _> = diseases
            .iter()
            .map(|(d, s)| ((*d).to_string(), strings(s)))
            .collect();
        let severity = severity
            .iter()
            .map(|(s, w)| ((*s).to_string(), *w))
            .collect();
        ReferenceTables::from_parts(diseases, HashMap::new(), HashMap::new(), severity)
    }

    #[test]
    fn test_severity_coverage_formula() {
        let tables = tables(&[("Flu", &["fever", "cough", "ache"])], &[("fever", 4)]);
        let best = best_severity_coverage(&["fever", "sneeze"], &tables).unwrap();

        // coverage 1/3, input coverage 1/2, severity coverage 4/6
        let expected = 0.4 / 3.0 + 0.3 * 0.5 + 0.3 * (4.0 / 6.0);
        assert_eq!(best.disease, "Flu");
        assert!((best.final_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_severity_coverage_uses_default_of_one() {
        let tables = tables(&[("Flu", &["fever", "cough"])], &[]);
        let best = best_severity_coverage(&["fever"], &tables).unwrap();
        // 0.4 * 0.5 + 0.3 * 1.0 + 0.3 * 0.5
        assert!((best.final_score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_severity_coverage_tie_keeps_first_disease() {
        let tables = tables(&[("First", &["a", "b"]), ("Second", &["a", "c"])], &[]);
        let best = best_severity_coverage(&["a"], &tables).unwrap();
        assert_eq!(best.disease, "First");
    }

    #[test]
    fn test_severity_coverage_no_match() {
        let tables = tables(&[("Flu", &["fever"])], &[]);
        assert!(best_severity_coverage(&["itching"], &tables).is_none());
        assert!(predict_with_severity(&["itching"], &tables).is_none());
    }

    #[test]
    fn test_predict_with_severity_confidence() {
        let tables = tables(&[("Flu", &["fever"])], &[]);
        let result = predict_with_severity(&["fever"], &tables).unwrap();
        assert_eq!(result.disease, "Flu");
        assert!((result.confidence - 100.0).abs() < 1e-9);
        assert_eq!(result.method, PredictionMethod::SeverityCoverage);
    }

    #[test]
    fn test_pattern_matching_ignores_loaded_tables() {
        // Loaded table knows nothing about these symptoms
        let tables = tables(&[("Dengue", &["pain_behind_the_eyes"])], &[]);
        let result =
            predict_with_pattern_matching(&["itching", "skin_rash", "cough"], &tables).unwrap();

        assert_eq!(result.disease, "Fungal infection");
        assert_eq!(result.matching_count, 2);
        assert!((result.confidence - 200.0 / 3.0).abs() < 1e-9);
        // Annotations come from the fallback tables when loaded ones lack them
        assert!(result.description.is_some());
        assert_eq!(result.precautions.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn test_pattern_matching_first_seen_wins_ties() {
        let tables = ReferenceTables::fallback();
        // chills appears in Common Cold first, then Influenza, Malaria, Pneumonia
        let result = predict_with_pattern_matching(&["chills"], &tables).unwrap();
        assert_eq!(result.disease, "Common Cold");
        assert!((result.confidence - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_pattern_matching_no_overlap() {
        let tables = ReferenceTables::fallback();
        assert!(predict_with_pattern_matching(&["glowing_skin"], &tables).is_none());
    }
}
