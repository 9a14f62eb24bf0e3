//! # symptom-solver
//!
//! A library for predicting a disease from a set of reported symptoms.
//!
//! Symptom checkers built on the common disease/symptom CSV datasets tend to
//! rely on a single overlap count, which over-rewards diseases with long
//! symptom lists and ignores how telling a symptom is.
//!
//! `symptom-solver` instead scores every candidate disease on several clinical
//! factors and degrades gracefully when data is missing.
//!
//! ## Features
//!
//! - **Clinical relevance scoring**: severity, coverage, specificity and count factors
//! - **Critical symptoms**: a curated index of highly specific symptoms boosts their diseases
//! - **Fallback chain**: simpler scorers answer when the primary scorer finds nothing
//! - **Resilient loading**: each missing or malformed table is replaced by a built-in one
//! - **Pluggable classifier**: an optional trained model can answer first
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::catalog::sources::DataSources;
//! use symptom_solver::{PredictionEngine, ReferenceTables};
//!
//! // Load the reference tables once
//! let tables = ReferenceTables::load(&DataSources::default());
//!
//! // Predict from a symptom list
//! let engine = PredictionEngine::new(&tables);
//! let symptoms = vec!["chills".to_string(), "high_fever".to_string(), "sweating".to_string()];
//! let result = engine.predict(&symptoms);
//!
//! println!("{}: {:.1}%", result.disease, result.confidence);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference tables, fallbacks, and the critical-symptom index
//! - [`core`]: Core data types for predictions and table provenance
//! - [`matching`]: Prediction engine and scoring algorithms
//! - [`parsing`]: Parsers for the CSV tables and JSON symptom input
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP prediction service

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::index::CriticalIndex;
pub use catalog::store::ReferenceTables;
pub use core::types::*;
pub use matching::classifier::{DiseaseClassifier, UnavailableClassifier};
pub use matching::engine::{MatchingConfig, PredictionEngine, ScoringStrategy};
