use crate::cli::OutliersArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::utils::output::open_output;
use ramapp::core::io::table;
use ramapp::engine::tasks::outliers::detect_dataset_outliers;
use std::fs::File;
use std::io::BufReader;
use tracing::info;

pub async fn run(args: OutliersArgs) -> Result<()> {
    let config = PartialAppConfig::resolve(&args.analysis)?;
    let input_delimiter = config.delimiter_for(Some(args.input.as_path()));
    let output_delimiter = config.delimiter_for(args.output.as_deref());

    let reader = BufReader::new(File::open(&args.input)?);
    let records = table::read_angle_table(reader, input_delimiter).map_err(|e| {
        CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        }
    })?;
    info!(records = records.len(), "Angle table loaded from {:?}", &args.input);

    let flags = detect_dataset_outliers(&records);
    let flagged = flags.iter().filter(|f| f.is_outlier).count();
    info!(flagged, "Outlier detection finished.");

    let writer = open_output(args.output.as_deref())?;
    table::write_dataset_with_outliers(&records, &flags, writer, output_delimiter)?;

    if let Some(path) = &args.output {
        println!(
            "✓ {} of {} residues flagged as outliers, written to: {}",
            flagged,
            records.len(),
            path.display()
        );
    }
    Ok(())
}
