use crate::cli::BatchArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::output::open_output;
use crate::utils::progress::CliProgressHandler;
use ramapp::core::io::table;
use ramapp::engine::progress::ProgressReporter;
use ramapp::engine::tasks::outliers;
use ramapp::workflows::batch;
use tracing::{info, warn};

pub async fn run(args: BatchArgs, quiet: bool) -> Result<()> {
    let config = PartialAppConfig::resolve(&args.analysis)?;
    let delimiter = config.delimiter_for(Some(args.output.as_path()));

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the batch workflow on {:?}", &args.dir);
    let report =
        tokio::task::block_in_place(|| batch::run(&args.dir, &config.analysis, &reporter))?;

    let writer = open_output(Some(args.output.as_path()))?;
    if args.with_outliers {
        let flags = outliers::detect_dataset_outliers(&report.records);
        let flagged = flags.iter().filter(|f| f.is_outlier).count();
        info!(flagged, "Outlier flags computed.");
        table::write_dataset_with_outliers(&report.records, &flags, writer, delimiter)?;
    } else {
        table::write_dataset(&report.records, writer, delimiter)?;
    }

    let succeeded = report.files_processed - report.failures.len();
    println!(
        "✓ {} records from {}/{} files written to: {}",
        report.records.len(),
        succeeded,
        report.files_processed,
        args.output.display()
    );

    if report.files_processed == 0 {
        warn!("No .pdb files found in {:?}", &args.dir);
        println!("Warning: no .pdb files found in {}.", args.dir.display());
    }
    for failure in &report.failures {
        eprintln!("  ✗ {}: {}", failure.path.display(), failure.error);
    }

    Ok(())
}
