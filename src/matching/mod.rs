//! Disease prediction engine and scoring algorithms.
//!
//! This module provides the core prediction functionality:
//!
//! - [`PredictionEngine`](engine::PredictionEngine): Main entry point for predictions
//! - [`ClinicalScore`](scoring::ClinicalScore): Sub-scores of one disease against a query
//! - [`DiseaseClassifier`](classifier::DiseaseClassifier): Optional trained classifier seam
//!
//! ## Prediction Algorithm
//!
//! A prediction tries, in order:
//!
//! 1. **Trained classifier**: when one is configured and succeeds
//! 2. **Clinical relevance**: weighted severity, coverage, specificity and count
//! 3. **Severity coverage**: blended disease, input, and severity coverage
//! 4. **Basic overlap**: raw overlap count against the built-in fallback table
//!
//! The first tier that finds a candidate answers; if none does the result is
//! "Unknown" with zero confidence.
//!
//! ## Scoring
//!
//! The clinical relevance score combines:
//!
//! - **Severity ratio** (35%): matched severity over the disease's total severity
//! - **Coverage ratio** (25%): fraction of the disease's symptoms present
//! - **Specificity bonus** (15%): `1 / (n + 1)` per matched critical symptom
//! - **Symptom count** (25%): matched count, saturating at five
//!
//! and doubles the total for diseases flagged by a critical symptom.
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::{PredictionEngine, ReferenceTables};
//!
//! let tables = ReferenceTables::fallback();
//! let engine = PredictionEngine::new(&tables);
//!
//! let symptoms = vec!["itching".to_string(), "skin_rash".to_string()];
//! let result = engine.predict(&symptoms);
//! assert_eq!(result.disease, "Fungal infection");
//! ```

pub mod classifier;
pub mod engine;
pub mod fallback;
pub mod scoring;
