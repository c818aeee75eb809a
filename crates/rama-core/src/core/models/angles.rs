/// Backbone torsions of one residue.
///
/// Each angle is `None` when one of its four defining atoms could not be
/// resolved, for example at chain termini.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleRecord {
    pub chain_id: String,
    pub residue_number: isize,
    pub residue_name: String,
    pub phi: Option<f64>,
    pub psi: Option<f64>,
    pub omega: Option<f64>,
}

impl AngleRecord {
    /// Returns `(phi, psi)` when both are present.
    pub fn phi_psi(&self) -> Option<(f64, f64)> {
        Some((self.phi?, self.psi?))
    }
}

/// A single side-chain torsion (chi1 or chi2) of one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct SideChainAngleRecord {
    pub chain_id: String,
    pub residue_number: isize,
    pub residue_name: String,
    pub chi: f64,
}

/// Which side-chain torsion a [`SideChainAngleRecord`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideChainTorsion {
    Chi1,
    Chi2,
}

impl SideChainTorsion {
    pub fn column_name(&self) -> &'static str {
        match self {
            SideChainTorsion::Chi1 => "chi1",
            SideChainTorsion::Chi2 => "chi2",
        }
    }
}

/// An [`AngleRecord`] tagged with the structure it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetAngleRecord {
    pub pdb_id: String,
    pub angles: AngleRecord,
}

/// Outlier flags for one row of an angle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutlierFlags {
    pub phi_is_outlier: bool,
    pub psi_is_outlier: bool,
    pub is_outlier: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(phi: Option<f64>, psi: Option<f64>) -> AngleRecord {
        AngleRecord {
            chain_id: "A".to_string(),
            residue_number: 3,
            residue_name: "ALA".to_string(),
            phi,
            psi,
            omega: Some(179.1),
        }
    }

    #[test]
    fn phi_psi_requires_both_angles() {
        assert_eq!(record(Some(-60.0), Some(-45.0)).phi_psi(), Some((-60.0, -45.0)));
        assert_eq!(record(None, Some(-45.0)).phi_psi(), None);
        assert_eq!(record(Some(-60.0), None).phi_psi(), None);
    }

    #[test]
    fn side_chain_torsion_column_names() {
        assert_eq!(SideChainTorsion::Chi1.column_name(), "chi1");
        assert_eq!(SideChainTorsion::Chi2.column_name(), "chi2");
    }
}
