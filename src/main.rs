use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use pixconv::{format_file_size, Cli, ConversionEngine, ImageTransformer};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else if cli.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = cli
        .into_options()
        .resolve()
        .context("Invalid configuration")?;

    let transformer = ImageTransformer::new(config.quality(), config.optimize_png());
    let show_progress = !config.verbose() && !config.debug();
    let engine = ConversionEngine::new(config, transformer).with_progress(show_progress);

    let report = engine.run().context("Conversion aborted")?;

    if engine.config().dry_run() {
        println!(
            "Dry run complete. {} conversions planned, {} skipped, from {} images.",
            report.planned,
            report.skipped,
            report.files_found
        );
        return Ok(());
    }

    println!(
        "Conversion complete. Converted {} of {} attempted ({} skipped) into: {} ({} -> {})",
        report.converted,
        report.attempted(),
        report.skipped,
        engine.config().target_dir().display(),
        format_file_size(report.bytes_read),
        format_file_size(report.bytes_written)
    );

    if !report.is_success() {
        for (path, reason) in &report.failures {
            eprintln!("  failed: {} ({})", path.display(), reason);
        }
        bail!(
            "{} of {} conversions failed",
            report.failures.len(),
            report.attempted()
        );
    }

    Ok(())
}
