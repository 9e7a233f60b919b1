//! voice-pack-gen CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use voice_pack_gen::backend::create_backend;
use voice_pack_gen::cli::Args;
use voice_pack_gen::engine::ClipGenerator;
use voice_pack_gen::pipeline::{self, RunSummary};

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.pipeline_config();
    let backend = create_backend(&args.api_base_url, args.timeout_secs)?;
    let generator = ClipGenerator::new(backend);

    let summary = pipeline::run(&config, &generator)?;
    print_summary(&summary);

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    if let Some(path) = &summary.manifest_saved {
        println!("Wrote manifest: {}", path.display());
    }

    if summary.catalog_written {
        println!("Wrote catalog: {}", summary.catalog_path.display());
    } else {
        println!("Catalog up to date: {}", summary.catalog_path.display());
    }

    if let Some(report) = &summary.audio {
        println!("Audio: {}", report.output_dir.display());
        println!("  Generated: {}", report.generated.len());
        println!("  Skipped: {}", report.skipped.len());
        println!("Done.");
    }
}
