//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **predict**: Predict a disease from a JSON array of symptom tokens
//! - **symptoms**: List every known symptom token
//! - **serve**: Start the HTTP prediction service
//!
//! ## Usage
//!
//! ```text
//! # Predict from symptoms
//! symptom-solver predict '["itching", "skin_rash", "nodal_skin_eruptions"]'
//!
//! # Human-readable output
//! symptom-solver predict '["chills", "high_fever"]' --format text
//!
//! # Sorted list of known symptoms
//! symptom-solver symptoms
//!
//! # Use a custom dataset directory
//! symptom-solver --data-dir ./dataset predict '["cough"]'
//!
//! # Start the HTTP service
//! symptom-solver serve --port 8080
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::sources::{DataSources, DEFAULT_PRIMARY_DIR, DEFAULT_SECONDARY_DIR};

pub mod predict;
pub mod symptoms;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(version)]
#[command(about = "Predict a disease from reported symptoms")]
#[command(
    long_about = "symptom-solver maps a set of reported symptoms to the most likely disease.\n\nIt scores every disease in the reference tables by symptom severity, coverage, and specificity, and reports:\n- The best matching disease with a confidence percentage\n- The symptoms that matched\n- A description and precautions when available"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Primary directory searched for the CSV reference tables
    #[arg(long, global = true, default_value = DEFAULT_PRIMARY_DIR)]
    pub data_dir: PathBuf,

    /// Secondary directory used for tables missing from the primary one
    #[arg(long, global = true, default_value = DEFAULT_SECONDARY_DIR)]
    pub fallback_data_dir: PathBuf,
}

impl Cli {
    #[must_use]
    pub fn data_sources(&self) -> DataSources {
        DataSources::new(&self.data_dir, &self.fallback_data_dir)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict a disease from a JSON array of symptoms
    Predict(predict::PredictArgs),

    /// List all known symptom tokens
    Symptoms,

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
