use crate::cli::SecondaryArgs;
use crate::error::Result;
use ramapp::core::io::pdb::PdbFile;
use ramapp::engine::error::AnalysisError;
use tracing::info;

pub async fn run(args: SecondaryArgs) -> Result<()> {
    info!("Scanning HELIX/SHEET records in {:?}", &args.input);
    let summary = PdbFile::scan_secondary_structure_path(&args.input)
        .map_err(|e| AnalysisError::from_pdb(&args.input, e))?;

    if summary.total_residues == 0 {
        println!(
            "Warning: no CA atoms found in {}; percentages are reported as 0.",
            args.input.display()
        );
    }
    println!("Residues: {}", summary.total_residues);
    println!("Helix:    {:.2}%", summary.helix_percent);
    println!("Sheet:    {:.2}%", summary.sheet_percent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::TRIPEPTIDE_PDB;
    use crate::error::CliError;
    use std::fs;
    use std::path::PathBuf;

    #[tokio::test]
    async fn summary_is_printed_for_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tri.pdb");
        fs::write(&input, TRIPEPTIDE_PDB).unwrap();
        assert!(run(SecondaryArgs { input }).await.is_ok());
    }

    #[tokio::test]
    async fn missing_file_is_a_file_access_error() {
        let result = run(SecondaryArgs {
            input: PathBuf::from("/nonexistent/structure.pdb"),
        })
        .await;
        assert!(matches!(
            result,
            Err(CliError::Analysis(AnalysisError::FileAccess { .. }))
        ));
    }
}
