use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("symptom_solver=debug,info")
    } else {
        EnvFilter::new("symptom_solver=warn")
    };

    // Diagnostics go to stderr; stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let sources = cli.data_sources();

    match cli.command {
        cli::Commands::Predict(args) => {
            cli::predict::run(args, &sources, cli.format, cli.verbose)?;
        }
        cli::Commands::Symptoms => {
            cli::symptoms::run(&sources, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, &sources)?;
        }
    }

    Ok(())
}
