use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::angles::{AngleRecord, SideChainAngleRecord};
use crate::core::models::table::AtomTable;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::tasks::{backbone, side_chain};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleKind {
    Backbone,
    Chi1,
    Chi2,
}

impl AngleKind {
    pub const ALL: [AngleKind; 3] = [AngleKind::Backbone, AngleKind::Chi1, AngleKind::Chi2];
}

#[derive(Debug, Error)]
#[error("Unknown angle kind '{0}'. Expected one of: backbone, chi1, chi2.")]
pub struct ParseAngleKindError(String);

impl FromStr for AngleKind {
    type Err = ParseAngleKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backbone" | "phi-psi" => Ok(AngleKind::Backbone),
            "chi1" => Ok(AngleKind::Chi1),
            "chi2" => Ok(AngleKind::Chi2),
            _ => Err(ParseAngleKindError(s.to_string())),
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleKind::Backbone => write!(f, "backbone"),
            AngleKind::Chi1 => write!(f, "chi1"),
            AngleKind::Chi2 => write!(f, "chi2"),
        }
    }
}

/// Angle tables computed for one structure. Kinds that were not requested stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureAngles {
    pub backbone: Vec<AngleRecord>,
    pub chi1: Vec<SideChainAngleRecord>,
    pub chi2: Vec<SideChainAngleRecord>,
}

/// Parses a PDB file and assembles the requested angle kinds.
///
/// # Errors
///
/// Returns [`AnalysisError::FileAccess`] if the file cannot be read and
/// [`AnalysisError::MalformedRecord`] if an `ATOM` line has an unparsable
/// numeric field.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn run(
    path: &Path,
    config: &AnalysisConfig,
    kinds: &[AngleKind],
) -> Result<StructureAngles, AnalysisError> {
    let table = PdbFile::read_from_path(path).map_err(|e| AnalysisError::from_pdb(path, e))?;
    info!(
        atoms = table.len(),
        chains = table.chains().len(),
        residues = table.residue_count(),
        "Structure loaded."
    );
    Ok(analyze_table(&table, config, kinds))
}

/// Assembles the requested angle kinds from an already parsed table.
pub fn analyze_table(
    table: &AtomTable,
    config: &AnalysisConfig,
    kinds: &[AngleKind],
) -> StructureAngles {
    let mut angles = StructureAngles::default();
    if kinds.contains(&AngleKind::Backbone) {
        angles.backbone = backbone::assemble_backbone(table, config);
    }
    if kinds.contains(&AngleKind::Chi1) {
        angles.chi1 = side_chain::assemble_chi1(table, config);
    }
    if kinds.contains(&AngleKind::Chi2) {
        angles.chi2 = side_chain::assemble_chi2(table, config);
    }
    angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fixtures::tripeptide_pdb;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn run_computes_all_requested_kinds_from_file() {
        let file = write_temp(&tripeptide_pdb("A"));
        let angles = run(file.path(), &AnalysisConfig::default(), &AngleKind::ALL).unwrap();

        assert_eq!(angles.backbone.len(), 1);
        let middle = &angles.backbone[0];
        assert_eq!(middle.residue_name, "GLN");
        assert_eq!(
            (middle.phi, middle.psi, middle.omega),
            (Some(-107.83), Some(144.35), Some(-179.45))
        );

        assert_eq!(angles.chi1.len(), 1);
        assert!((angles.chi1[0].chi - 54.54121110005313).abs() < 1e-6);
        assert_eq!(angles.chi2.len(), 1);
        assert!((angles.chi2[0].chi - 151.6968019585243).abs() < 1e-6);
    }

    #[test]
    fn run_leaves_unrequested_kinds_empty() {
        let file = write_temp(&tripeptide_pdb("A"));
        let angles = run(file.path(), &AnalysisConfig::default(), &[AngleKind::Chi2]).unwrap();
        assert!(angles.backbone.is_empty());
        assert!(angles.chi1.is_empty());
        assert_eq!(angles.chi2.len(), 1);
    }

    #[test]
    fn run_reports_missing_file_as_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pdb");
        let err = run(&path, &AnalysisConfig::default(), &AngleKind::ALL).unwrap_err();
        assert!(matches!(err, AnalysisError::FileAccess { path: p, .. } if p == path));
    }

    #[test]
    fn run_reports_bad_coordinates_as_malformed_record() {
        let mut text = tripeptide_pdb("A");
        text = text.replacen("  15.685", "  15.6x5", 1);
        let file = write_temp(&text);

        let err = run(file.path(), &AnalysisConfig::default(), &AngleKind::ALL).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedRecord { .. }));
    }

    #[test]
    fn empty_file_yields_empty_tables() {
        let file = write_temp("");
        let angles = run(file.path(), &AnalysisConfig::default(), &AngleKind::ALL).unwrap();
        assert_eq!(angles, StructureAngles::default());
    }

    #[test]
    fn angle_kind_parses_case_insensitively() {
        assert_eq!("Backbone".parse::<AngleKind>().unwrap(), AngleKind::Backbone);
        assert_eq!("CHI2".parse::<AngleKind>().unwrap(), AngleKind::Chi2);
        assert!("chi3".parse::<AngleKind>().is_err());
        assert_eq!(AngleKind::Chi1.to_string(), "chi1");
    }
}
