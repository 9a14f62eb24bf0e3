//! Parsers for the reference tables and for caller-supplied symptom lists.
//!
//! This module provides parsers for:
//!
//! - **Disease/symptom dataset**: `disease, symptom_1, ..., symptom_n` rows,
//!   repeated diseases are unioned
//! - **Descriptions**: `disease, description` rows
//! - **Precautions**: `disease, precaution_1, ..., precaution_n` rows
//! - **Severity**: `symptom, weight` rows with integer weights
//! - **Training table header**: symptom column names of the classifier data
//! - **Symptom input**: a JSON array of symptom tokens
//!
//! All tables are CSV with a header row that is skipped. Blank fields and the
//! literal `null` are discarded wherever a row carries a variable-length list.
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::parsing::tables::parse_severity;
//!
//! let csv = "Symptom,weight\nitching,1\nchills,high\n";
//! let severity = parse_severity(csv.as_bytes()).unwrap();
//! assert_eq!(severity.len(), 1);
//! ```

pub mod input;
pub mod tables;
