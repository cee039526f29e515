//! `urdu-prep`: clean an Urdu TSV corpus and build sentence groups.
//!
//! Usage:
//!   urdu-prep            - clean then group, default filenames
//!   urdu-prep clean      - TSV corpus -> cleaned_urdu_text.txt
//!   urdu-prep group      - cleaned_urdu_text.txt -> sentence_groups.txt

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use urdu_prep_core::PipelineError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("urdu_prep=info,urdu_prep_core=info")
                }),
        )
        .init();

    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}

/// A missing input is reported but does not fail the run; every other
/// error exits with status 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::MissingSource { .. }) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
