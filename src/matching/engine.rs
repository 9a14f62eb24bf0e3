use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::catalog::store::ReferenceTables;
use crate::core::types::{DiseaseName, PredictionMethod, PredictionResult, SymptomId};
use crate::matching::classifier::{ClassifierError, DiseaseClassifier, UnavailableClassifier};
use crate::matching::fallback::{predict_with_pattern_matching, predict_with_severity};
use crate::matching::scoring::{
    clinical_confidence, matching_symptoms, ClinicalScore, ClinicalWeights,
};

/// Error reported for an empty symptom list
pub const NO_SYMPTOMS_ERROR: &str = "No symptoms provided";

/// One tier of the scoring chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    /// Multi-factor clinical relevance scorer over the loaded tables
    ClinicalRelevance,
    /// Severity-weighted coverage scorer over the loaded tables
    SeverityCoverage,
    /// Raw overlap count over the built-in fallback table
    BasicOverlap,
}

impl ScoringStrategy {
    /// Tiers in the order they are tried
    pub const CHAIN: [Self; 3] = [
        Self::ClinicalRelevance,
        Self::SeverityCoverage,
        Self::BasicOverlap,
    ];

    #[must_use]
    pub fn method(self) -> PredictionMethod {
        match self {
            Self::ClinicalRelevance => PredictionMethod::ClinicalRelevance,
            Self::SeverityCoverage => PredictionMethod::SeverityCoverage,
            Self::BasicOverlap => PredictionMethod::BasicOverlap,
        }
    }
}

/// Configuration for the prediction engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Weights of the clinical relevance sub-scores
    pub weights: ClinicalWeights,
    /// Tiers tried in order until one finds a candidate
    pub strategies: Vec<ScoringStrategy>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: ClinicalWeights::default(),
            strategies: ScoringStrategy::CHAIN.to_vec(),
        }
    }
}

/// A disease scored by the clinical relevance scorer
#[derive(Debug, Clone)]
pub struct RankedDisease {
    pub disease: DiseaseName,
    pub score: ClinicalScore,
}

/// The prediction engine.
///
/// A pure function of its input and the borrowed immutable tables; safe to
/// call repeatedly and from several threads at once.
pub struct PredictionEngine<'a> {
    tables: &'a ReferenceTables,
    classifier: &'a dyn DiseaseClassifier,
    config: MatchingConfig,
}

impl<'a> PredictionEngine<'a> {
    /// Create an engine with no trained classifier and the default chain
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            tables,
            classifier: &UnavailableClassifier,
            config: MatchingConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    pub fn with_config(tables: &'a ReferenceTables, config: MatchingConfig) -> Self {
        Self {
            config,
            ..Self::new(tables)
        }
    }

    /// Consult `classifier` ahead of the scoring chain
    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a dyn DiseaseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn tables(&self) -> &ReferenceTables {
        self.tables
    }

    /// Predict a disease: the classifier first, then the scoring chain.
    ///
    /// Never fails on input: an empty list yields an error-carrying result and
    /// an unmatched list yields "Unknown" with zero confidence.
    #[must_use]
    pub fn predict(&self, symptoms: &[SymptomId]) -> PredictionResult {
        if symptoms.is_empty() {
            return PredictionResult::error(NO_SYMPTOMS_ERROR);
        }

        match self.classifier.classify(symptoms) {
            Ok(classification) => {
                debug!(
                    classifier = self.classifier.name(),
                    disease = %classification.disease,
                    "classifier produced a prediction"
                );
                let matched = self
                    .tables
                    .symptoms_of(&classification.disease)
                    .map(|listed| matching_symptoms(symptoms, listed))
                    .unwrap_or_default();
                let confidence = (classification.probability * 100.0).clamp(0.0, 100.0);
                return self.annotate(PredictionResult::matched(
                    classification.disease,
                    confidence,
                    matched,
                    PredictionMethod::Classifier,
                ));
            }
            Err(ClassifierError::Unavailable) => {}
            Err(e) => {
                warn!(classifier = self.classifier.name(), error = %e, "classifier failed, using scorers");
            }
        }

        self.predict_with_clinical_relevance(symptoms)
    }

    /// Run the scoring chain without consulting the classifier
    #[must_use]
    pub fn predict_with_clinical_relevance(&self, symptoms: &[SymptomId]) -> PredictionResult {
        if symptoms.is_empty() {
            return PredictionResult::error(NO_SYMPTOMS_ERROR);
        }

        for strategy in &self.config.strategies {
            let Some(result) = self.run_strategy(*strategy, symptoms) else {
                debug!(strategy = %strategy.method(), "no candidate");
                continue;
            };
            if !result.is_unknown() {
                debug!(strategy = %strategy.method(), disease = %result.disease, "prediction");
                return result;
            }
        }

        PredictionResult::unknown()
    }

    fn run_strategy(
        &self,
        strategy: ScoringStrategy,
        symptoms: &[SymptomId],
    ) -> Option<PredictionResult> {
        match strategy {
            ScoringStrategy::ClinicalRelevance => self.clinical_relevance(symptoms),
            ScoringStrategy::SeverityCoverage => predict_with_severity(symptoms, self.tables),
            ScoringStrategy::BasicOverlap => predict_with_pattern_matching(symptoms, self.tables),
        }
    }

    /// Score every disease sharing a symptom with the query, in table order
    #[must_use]
    pub fn rank(&self, symptoms: &[SymptomId]) -> Vec<RankedDisease> {
        let critical = self.tables.critical_index().hits(symptoms);

        self.tables
            .diseases()
            .filter_map(|(disease, listed)| {
                ClinicalScore::calculate(
                    symptoms,
                    disease,
                    listed,
                    self.tables,
                    &critical,
                    &self.config.weights,
                )
                .map(|score| RankedDisease {
                    disease: disease.clone(),
                    score,
                })
            })
            .collect()
    }

    /// Clinical relevance tier alone; `None` when no disease shares a symptom.
    ///
    /// The strictly highest score wins, so on an exact tie the disease that
    /// comes first in table order is kept.
    #[must_use]
    pub fn clinical_relevance(&self, symptoms: &[SymptomId]) -> Option<PredictionResult> {
        let mut best: Option<RankedDisease> = None;
        for candidate in self.rank(symptoms) {
            let better = best
                .as_ref()
                .map_or(true, |b| candidate.score.final_score > b.score.final_score);
            if better {
                best = Some(candidate);
            }
        }

        let best = best?;
        let confidence = clinical_confidence(best.score.final_score, symptoms.len());

        Some(self.annotate(PredictionResult::matched(
            best.disease,
            confidence,
            best.score.matching_symptoms,
            PredictionMethod::ClinicalRelevance,
        )))
    }

    /// Attach description and precautions from the loaded tables, if present
    fn annotate(&self, result: PredictionResult) -> PredictionResult {
        let description = self.tables.description(&result.disease).map(str::to_string);
        let precautions = self
            .tables
            .precautions(&result.disease)
            .map(<[String]>::to_vec);
        result
            .with_description(description)
            .with_precautions(precautions)
    }

    /// Sorted union of the dataset vocabulary, the training table columns, and
    /// the classifier's own columns
    #[must_use]
    pub fn known_symptoms(&self) -> Vec<SymptomId> {
        let mut all: BTreeSet<SymptomId> = self.tables.symptoms().iter().cloned().collect();
        all.extend(self.tables.training_columns().iter().cloned());
        all.extend(self.classifier.symptom_columns());
        all.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::CriticalIndex;
    use crate::core::types::UNKNOWN_DISEASE;
    use crate::matching::classifier::Classification;
    use indexmap::IndexMap;
    use std::collections::HashMap;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    fn make_tables(diseases: &[(&str, &[&str])]) -> ReferenceTables {
        let diseases: IndexMap<_, _> = diseases
            .iter()
            .map(|(d, s)| ((*d).to_string(), strings(s)))
            .collect();
        ReferenceTables::from_parts(diseases, HashMap::new(), HashMap::new(), HashMap::new())
    }

    struct FixedClassifier(Result<Classification, ClassifierError>);

    impl DiseaseClassifier for FixedClassifier {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn classify(&self, _symptoms: &[SymptomId]) -> Result<Classification, ClassifierError> {
            self.0.clone()
        }

        fn symptom_columns(&self) -> Vec<SymptomId> {
            strings(&["zz_training_only"])
        }
    }

    #[test]
    fn test_empty_input_is_error_result() {
        let tables = ReferenceTables::fallback();
        let engine = PredictionEngine::new(&tables);

        let result = engine.predict(&[]);
        assert_eq!(result.error.as_deref(), Some(NO_SYMPTOMS_ERROR));
        assert_eq!(result.method, PredictionMethod::InvalidInput);
    }

    #[test]
    fn test_coverage_ratio_decides_between_similar_diseases() {
        let tables = make_tables(&[
            ("Malaria", &["high_fever", "chills", "sweating", "headache"]),
            ("Influenza", &["high_fever", "chills", "sweating"]),
        ]);
        let engine = PredictionEngine::new(&tables);
        let input = strings(&["high_fever", "chills", "sweating"]);

        let ranked = engine.rank(&input);
        assert_eq!(ranked.len(), 2);
        assert!((ranked[0].score.coverage_ratio - 0.75).abs() < 1e-9);
        assert!((ranked[1].score.coverage_ratio - 1.0).abs() < 1e-9);

        // Influenza 0.75, Malaria 0.6 under default severity 3
        let result = engine.predict(&input);
        assert_eq!(result.disease, "Influenza");
        assert!((result.confidence - 45.0).abs() < 1e-9);
        assert_eq!(result.matching_count, 3);
        assert_eq!(result.method, PredictionMethod::ClinicalRelevance);
    }

    #[test]
    fn test_low_evidence_penalty_recomputes_score() {
        let tables = make_tables(&[("Influenza", &["high_fever", "chills", "sweating"])]);
        let engine = PredictionEngine::new(&tables);

        let full = engine.predict(&strings(&["high_fever", "chills", "sweating"]));
        let truncated = engine.predict(&strings(&["high_fever", "chills"]));

        // Two matches: 0.35 * 6/9 + 0.25 * 2/3 + 0.25 * 0.4
        let score = 0.35 * (6.0 / 9.0) + 0.25 * (2.0 / 3.0) + 0.25 * 0.4;
        assert!((truncated.confidence - score * 60.0 * 0.7).abs() < 1e-9);
        assert!((full.confidence - 45.0).abs() < 1e-9);
        assert!((truncated.confidence - 0.7 * full.confidence).abs() > 1e-6);
    }

    #[test]
    fn test_exact_tie_keeps_table_order() {
        let tables = make_tables(&[("Alpha", &["a", "b"]), ("Beta", &["a", "c"])]);
        let engine = PredictionEngine::new(&tables);

        let first = engine.predict(&strings(&["a"]));
        let second = engine.predict(&strings(&["a"]));
        assert_eq!(first.disease, "Alpha");
        assert_eq!(first, second);
    }

    #[test]
    fn test_critical_symptom_raises_score_of_its_disease() {
        let tables = make_tables(&[
            ("Influenza", &["high_fever", "chills", "cough"]),
            ("Pneumonia", &["high_fever", "cough", "rusty_sputum", "chest_pain"]),
        ]);
        let engine = PredictionEngine::new(&tables);

        let before = strings(&["high_fever", "cough", "chills"]);
        let after = strings(&["high_fever", "cough", "chills", "rusty_sputum"]);

        let score_of = |input: &[String]| {
            engine
                .rank(input)
                .into_iter()
                .find(|r| r.disease == "Pneumonia")
                .map(|r| r.score.final_score)
                .unwrap()
        };

        assert_eq!(engine.predict(&before).disease, "Influenza");
        assert!(score_of(&after) > score_of(&before));
        assert_eq!(engine.predict(&after).disease, "Pneumonia");
    }

    #[test]
    fn test_critical_bonus_applies_without_matching_the_trigger() {
        let tables = make_tables(&[("Diabetes", &["fatigue", "weight_loss"])])
            .with_critical_index(CriticalIndex::from_pairs(&[("polyuria", &["Diabetes"])]));
        let engine = PredictionEngine::new(&tables);

        let ranked = engine.rank(&strings(&["fatigue", "polyuria"]));
        assert!(ranked[0].score.is_critical);
        assert!(ranked[0].score.specificity_bonus.abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_input_falls_through_to_basic_overlap() {
        let tables = make_tables(&[("Dengue", &["pain_behind_the_eyes"])]);
        let engine = PredictionEngine::new(&tables);

        let result = engine.predict(&strings(&["itching", "skin_rash"]));
        assert_eq!(result.disease, "Fungal infection");
        assert_eq!(result.method, PredictionMethod::BasicOverlap);
    }

    #[test]
    fn test_nothing_matches_anywhere() {
        let tables = ReferenceTables::fallback();
        let engine = PredictionEngine::new(&tables);

        let result = engine.predict(&strings(&["glowing_skin"]));
        assert_eq!(result.disease, UNKNOWN_DISEASE);
        assert!(result.confidence.abs() < 1e-9);
        assert!(result.description.is_none());
        assert!(result.precautions.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_chain_order_is_configurable() {
        let tables = make_tables(&[("Flu", &["fever", "cough"])]);
        let config = MatchingConfig {
            strategies: vec![ScoringStrategy::SeverityCoverage],
            ..MatchingConfig::default()
        };
        let engine = PredictionEngine::with_config(&tables, config);

        let result = engine.predict(&strings(&["fever"]));
        assert_eq!(result.method, PredictionMethod::SeverityCoverage);
        assert!((result.confidence - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_classifier_result_takes_precedence() {
        let tables = ReferenceTables::fallback();
        let classifier = FixedClassifier(Ok(Classification {
            disease: "Malaria".to_string(),
            probability: 0.82,
        }));
        let engine = PredictionEngine::new(&tables).with_classifier(&classifier);

        let result = engine.predict(&strings(&["chills", "itching"]));
        assert_eq!(result.disease, "Malaria");
        assert!((result.confidence - 82.0).abs() < 1e-9);
        assert_eq!(result.matching_symptoms, vec!["chills"]);
        assert!(result.description.is_some());
        assert_eq!(result.method, PredictionMethod::Classifier);
    }

    #[test]
    fn test_classifier_failure_falls_back_to_scorer() {
        let tables = ReferenceTables::fallback();
        let classifier =
            FixedClassifier(Err(ClassifierError::MissingColumn("prognosis".to_string())));
        let engine = PredictionEngine::new(&tables).with_classifier(&classifier);

        let input = strings(&["itching", "skin_rash", "nodal_skin_eruptions"]);
        let result = engine.predict(&input);
        assert_eq!(result.disease, "Fungal infection");
        assert_eq!(result.method, PredictionMethod::ClinicalRelevance);
        assert_eq!(result, engine.predict_with_clinical_relevance(&input));
    }

    #[test]
    fn test_known_symptoms_union_sorted() {
        let tables = make_tables(&[("Flu", &["fever", "cough"])]);
        let classifier = FixedClassifier(Err(ClassifierError::Unavailable));
        let engine = PredictionEngine::new(&tables).with_classifier(&classifier);

        assert_eq!(
            engine.known_symptoms(),
            vec!["cough", "fever", "zz_training_only"]
        );
    }

    #[test]
    fn test_confidence_bounds_on_fallback_tables() {
        let tables = ReferenceTables::fallback();
        let engine = PredictionEngine::new(&tables);

        for symptom in tables.symptoms() {
            let result = engine.predict(std::slice::from_ref(symptom));
            assert!((0.0..=100.0).contains(&result.confidence));
            assert!(result.is_unknown() || tables.contains_disease(&result.disease));
        }
    }
}
