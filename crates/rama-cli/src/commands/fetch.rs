use crate::cli::FetchArgs;
use crate::error::{CliError, Result};
use crate::fetch::{self, FetchOutcome, FetchProgress, StructureFetcher};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

pub async fn run(args: FetchArgs) -> Result<()> {
    let mut ids = args
        .ids
        .iter()
        .map(|id| fetch::normalize_id(id))
        .collect::<Result<Vec<_>>>()?;
    if let Some(list) = &args.list {
        ids.extend(fetch::read_id_list(list)?);
    }

    let output_dir = match args.output {
        Some(dir) => dir,
        None => StructureFetcher::default_output_dir()?,
    };
    let mut fetcher = StructureFetcher::new(output_dir);
    if let Some(base_url) = args.base_url {
        info!("Using download mirror {}", base_url);
        fetcher = fetcher.with_base_url(base_url);
    }
    println!(
        "Fetching {} structure(s) into: {}",
        ids.len(),
        fetcher.output_dir().display()
    );

    let mut failed = 0usize;
    for id in &ids {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} {msg:<6} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message(id.clone());

        let progress_callback = |progress: FetchProgress| match progress {
            FetchProgress::DownloadStarted { total_size } => {
                if let Some(size) = total_size {
                    pb.set_length(size);
                }
            }
            FetchProgress::Downloading { downloaded } => pb.set_position(downloaded),
        };

        match fetcher.fetch(id, args.force, progress_callback).await {
            Ok(FetchOutcome::Downloaded(path)) => {
                pb.finish_and_clear();
                println!("✓ {} saved to {}", id, path.display());
            }
            Ok(FetchOutcome::AlreadyPresent(path)) => {
                pb.finish_and_clear();
                println!("  {} already present at {} (use --force to refresh)", id, path.display());
            }
            Err(e) => {
                pb.finish_and_clear();
                warn!("Failed to fetch {}: {}", id, e);
                eprintln!("✗ {}: {}", id, e);
                failed += 1;
            }
        }
    }

    info!(requested = ids.len(), failed, "Fetch finished.");
    if failed > 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "{} of {} downloads failed",
            failed,
            ids.len()
        )));
    }
    Ok(())
}
