//! Reference tables and the critical-symptom index.
//!
//! The tables are loaded once at startup from four CSV resources:
//!
//! - **dataset.csv**: disease to symptom rows
//! - **disease_description.csv**: disease to description rows
//! - **disease_precaution.csv**: disease to precaution rows
//! - **symptom_severity.csv**: symptom to integer severity rows
//!
//! Each resource is looked up in a primary directory, then a secondary one.
//! When a resource is missing or malformed it is replaced in full by a
//! built-in fallback table; the other resources are unaffected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::catalog::sources::DataSources;
//! use symptom_solver::ReferenceTables;
//!
//! let tables = ReferenceTables::load(&DataSources::new("backend/dataset", "public/data"));
//! println!("{} diseases", tables.disease_count());
//! ```

pub mod fallback;
pub mod index;
pub mod sources;
pub mod store;
