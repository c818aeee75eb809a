use crate::cli::AnglesArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::output::open_output;
use ramapp::core::io::table;
use ramapp::core::models::angles::SideChainTorsion;
use ramapp::workflows::analyze::{self, AngleKind};
use tracing::info;

pub async fn run(args: AnglesArgs) -> Result<()> {
    let config = PartialAppConfig::resolve(&args.analysis)?;
    let delimiter = config.delimiter_for(args.output.as_deref());

    info!("Computing {} angles for {:?}", args.kind, &args.input);
    let angles = tokio::task::block_in_place(|| {
        analyze::run(&args.input, &config.analysis, &[args.kind])
    })?;

    let writer = open_output(args.output.as_deref())?;
    let rows = match args.kind {
        AngleKind::Backbone => {
            table::write_angle_table(&angles.backbone, writer, delimiter)?;
            angles.backbone.len()
        }
        AngleKind::Chi1 => {
            table::write_side_chain_table(&angles.chi1, SideChainTorsion::Chi1, writer, delimiter)?;
            angles.chi1.len()
        }
        AngleKind::Chi2 => {
            table::write_side_chain_table(&angles.chi2, SideChainTorsion::Chi2, writer, delimiter)?;
            angles.chi2.len()
        }
    };

    info!(rows, "Angle table written.");
    if let Some(path) = &args.output {
        println!("✓ {} {} rows written to: {}", rows, args.kind, path.display());
    }
    Ok(())
}
