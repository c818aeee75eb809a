use crate::cli::DensityArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::utils::output::open_output;
use ramapp::core::io::{density::write_density_table, table};
use ramapp::engine::tasks::density::build_density_table;
use std::fs::File;
use std::io::BufReader;
use tracing::info;

pub async fn run(args: DensityArgs) -> Result<()> {
    let config = PartialAppConfig::resolve(&args.analysis)?;
    let delimiter = config.delimiter_for(Some(args.input.as_path()));

    info!("Reading phi/psi pairs from {:?}", &args.input);
    let reader = BufReader::new(File::open(&args.input)?);
    let pairs = table::read_phi_psi(reader, delimiter).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    info!(pairs = pairs.len(), "Angle pairs loaded.");

    let density = build_density_table(&pairs, config.analysis.density_bin_size)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut writer = open_output(Some(args.output.as_path()))?;
    write_density_table(&density, &mut writer)?;

    println!(
        "✓ Density of {} pairs over {} occupied bins written to: {}",
        pairs.len(),
        density.len(),
        args.output.display()
    );
    Ok(())
}
