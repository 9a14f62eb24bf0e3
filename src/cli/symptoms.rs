use crate::catalog::sources::DataSources;
use crate::catalog::store::ReferenceTables;
use crate::cli::OutputFormat;
use crate::matching::engine::PredictionEngine;

/// Execute symptoms subcommand: print the sorted known-symptom list
///
/// # Errors
///
/// Returns an error if the list cannot be serialized.
pub fn run(sources: &DataSources, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let tables = ReferenceTables::load(sources);
    let engine = PredictionEngine::new(&tables);
    let symptoms = engine.known_symptoms();

    if verbose {
        eprintln!("{} known symptoms", symptoms.len());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&symptoms)?),
        OutputFormat::Text => {
            for symptom in &symptoms {
                println!("{symptom}");
            }
        }
    }

    Ok(())
}
