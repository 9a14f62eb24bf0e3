//! Core data types shared by the loader, the scorers, and the front ends.
//!
//! - [`PredictionResult`](types::PredictionResult): the JSON-shaped answer
//! - [`PredictionMethod`](types::PredictionMethod): which tier produced it
//! - [`TableSource`](types::TableSource): file or fallback provenance of a table

pub mod types;
