use std::process::ExitCode;
use tracing::{error, info};

use word_seeder::{logging, ConvertError, ConverterConfig, Pipeline};

fn run() -> anyhow::Result<()> {
    let config = ConverterConfig::load()?;

    println!(
        "🔄 Converting '{}' into '{}'...",
        config.input_path.display(),
        config.output_path.display()
    );

    let report = Pipeline::run(&config)?;

    let summary = serde_json::to_string(&report)?;
    info!(report = %summary, "Conversion finished");
    println!(
        "✅ Done! {} unique '{}' words written to '{}'",
        report.accepted,
        config.target_pos().unwrap_or("*"),
        report.output_file
    );
    println!("   Records read: {}", report.records_read);
    println!("   Skipped: {}", report.skipped());
    println!("   Insert statements: {}", report.statements_written);
    println!("   Place this file in the 'db-init' directory and restart the database container.");
    Ok(())
}

fn main() -> ExitCode {
    // Held until exit so buffered log lines reach the file
    let _guard = logging::init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConvertError>() {
                Some(ConvertError::SourceNotFound { path }) => {
                    error!("Source file not found: {}", path);
                    println!("❌ Error: could not find input file '{}'", path);
                }
                _ => {
                    error!("Conversion failed: {:#}", e);
                    println!("❌ Error: {:#}", e);
                }
            }
            ExitCode::FAILURE
        }
    }
}
