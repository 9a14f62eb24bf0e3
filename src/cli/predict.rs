use clap::Args;

use crate::catalog::sources::DataSources;
use crate::catalog::store::ReferenceTables;
use crate::cli::OutputFormat;
use crate::core::types::PredictionResult;
use crate::matching::engine::PredictionEngine;
use crate::parsing::input::{parse_symptom_list, INVALID_SYMPTOMS_FORMAT};

#[derive(Args)]
pub struct PredictArgs {
    /// Symptoms as a JSON array of strings, e.g. '["itching", "skin_rash"]'
    #[arg(required = true)]
    pub symptoms: String,
}

/// Execute predict subcommand
///
/// A malformed symptom list is reported as a JSON error object on stdout, the
/// same channel as a normal result.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: PredictArgs,
    sources: &DataSources,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let symptoms = match parse_symptom_list(&args.symptoms) {
        Ok(symptoms) => symptoms,
        Err(e) => {
            tracing::debug!(error = %e, "rejected symptom list");
            println!(
                "{}",
                serde_json::json!({ "error": INVALID_SYMPTOMS_FORMAT })
            );
            return Ok(());
        }
    };

    let tables = ReferenceTables::load(sources);
    if verbose {
        eprintln!(
            "Loaded {} diseases (dataset: {})",
            tables.disease_count(),
            tables.provenance().diseases
        );
    }

    let engine = PredictionEngine::new(&tables);
    let result = engine.predict(&symptoms);

    if verbose {
        eprintln!("Prediction method: {}", result.method);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&result)?),
        OutputFormat::Text => print_text_result(&result),
    }

    Ok(())
}

fn print_text_result(result: &PredictionResult) {
    if let Some(error) = &result.error {
        println!("Error:       {error}");
        return;
    }

    println!("Disease:     {}", result.disease);
    println!("Confidence:  {:.1}%", result.confidence);
    if result.matching_count > 0 {
        println!(
            "Matched:     {} ({})",
            result.matching_symptoms.join(", "),
            result.matching_count
        );
    }
    if let Some(description) = &result.description {
        println!("Description: {description}");
    }
    if let Some(precautions) = &result.precautions {
        println!("Precautions:");
        for precaution in precautions {
            println!("  - {precaution}");
        }
    }
}
