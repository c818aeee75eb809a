use super::collect_per_chain;
use crate::core::models::angles::{SideChainAngleRecord, SideChainTorsion};
use crate::core::models::table::{AtomTable, ResidueEntry};
use crate::core::utils::geometry::dihedral;
use crate::core::utils::identifiers::lacks_side_chain_torsions;
use crate::engine::config::AnalysisConfig;
use nalgebra::Point3;
use tracing::{debug, instrument};

const CHI1_BASE: [&str; 3] = ["N", "CA", "CB"];
const CHI2_BASE: [&str; 2] = ["CA", "CB"];

/// Computes chi1 (N, CA, CB, CG) for every residue carrying those atoms.
///
/// GLY and PRO never produce a record. Values are not rounded.
#[instrument(skip_all, name = "chi1_assembly")]
pub fn assemble_chi1(table: &AtomTable, config: &AnalysisConfig) -> Vec<SideChainAngleRecord> {
    assemble(table, config, SideChainTorsion::Chi1)
}

/// Computes chi2 (CA, CB, gamma, delta) for every residue carrying those atoms.
///
/// Gamma is CG or else OG; delta is CD or else OG. A residue with OG but no
/// CG/CD therefore uses OG twice and yields a degenerate 0.0; this is a
/// known defect reproduced as-is.
/// GLY and PRO never produce a record. Values are not rounded.
#[instrument(skip_all, name = "chi2_assembly")]
pub fn assemble_chi2(table: &AtomTable, config: &AnalysisConfig) -> Vec<SideChainAngleRecord> {
    assemble(table, config, SideChainTorsion::Chi2)
}

fn assemble(
    table: &AtomTable,
    config: &AnalysisConfig,
    torsion: SideChainTorsion,
) -> Vec<SideChainAngleRecord> {
    let records = collect_per_chain(table, config.parallel, |chain| {
        chain
            .residues()
            .iter()
            .filter(|residue| !lacks_side_chain_torsions(&residue.name))
            .filter_map(|residue| {
                let chi = match torsion {
                    SideChainTorsion::Chi1 => chi1(table, &chain.id, residue),
                    SideChainTorsion::Chi2 => chi2(table, &chain.id, residue),
                }?;
                Some(SideChainAngleRecord {
                    chain_id: chain.id.clone(),
                    residue_number: residue.number,
                    residue_name: residue.name.clone(),
                    chi,
                })
            })
            .collect()
    });

    debug!(
        torsion = torsion.column_name(),
        emitted = records.len(),
        "Side-chain torsions assembled."
    );
    records
}

fn chi1(table: &AtomTable, chain_id: &str, residue: &ResidueEntry) -> Option<f64> {
    let base = table.lookup_many(chain_id, residue.number, &CHI1_BASE)?;
    let cg = table.lookup(chain_id, residue.number, "CG")?;
    Some(dihedral(&base[0], &base[1], &base[2], &cg))
}

fn chi2(table: &AtomTable, chain_id: &str, residue: &ResidueEntry) -> Option<f64> {
    let base = table.lookup_many(chain_id, residue.number, &CHI2_BASE)?;
    let gamma = first_present(table, chain_id, residue.number, &["CG", "OG"])?;
    let delta = first_present(table, chain_id, residue.number, &["CD", "OG"])?;
    Some(dihedral(&base[0], &base[1], &gamma, &delta))
}

fn first_present(
    table: &AtomTable,
    chain_id: &str,
    residue_number: isize,
    candidates: &[&str],
) -> Option<Point3<f64>> {
    candidates
        .iter()
        .find_map(|name| table.lookup(chain_id, residue_number, name))
}
