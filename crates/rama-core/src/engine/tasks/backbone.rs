use super::collect_per_chain;
use crate::core::models::angles::AngleRecord;
use crate::core::models::table::{AtomTable, ResidueEntry};
use crate::core::utils::geometry::{dihedral, round_to_decimals};
use crate::engine::config::AnalysisConfig;
use tracing::{debug, instrument, trace};

/// Computes phi, psi and omega for every residue and keeps those admitted by
/// the configured [`InclusionPolicy`](crate::engine::config::InclusionPolicy).
///
/// Chains are visited in encounter order, residues in encounter order within
/// each chain. A torsion whose four atoms cannot all be found is `None`.
#[instrument(skip_all, name = "backbone_assembly")]
pub fn assemble_backbone(table: &AtomTable, config: &AnalysisConfig) -> Vec<AngleRecord> {
    let records = collect_per_chain(table, config.parallel, |chain| {
        chain
            .residues()
            .iter()
            .filter_map(|residue| backbone_record(table, &chain.id, residue, config))
            .collect()
    });

    debug!(
        residues = table.residue_count(),
        emitted = records.len(),
        policy = %config.inclusion_policy,
        "Backbone torsions assembled."
    );
    records
}

fn backbone_record(
    table: &AtomTable,
    chain_id: &str,
    residue: &ResidueEntry,
    config: &AnalysisConfig,
) -> Option<AngleRecord> {
    let n = residue.number;
    let round = |angle: Option<f64>| angle.map(|v| round_to_decimals(v, config.decimals));

    let phi = round(torsion(
        table,
        chain_id,
        [(n - 1, "C"), (n, "N"), (n, "CA"), (n, "C")],
    ));
    let psi = round(torsion(
        table,
        chain_id,
        [(n, "N"), (n, "CA"), (n, "C"), (n + 1, "N")],
    ));
    let omega = round(torsion(
        table,
        chain_id,
        [(n, "CA"), (n, "C"), (n + 1, "N"), (n + 1, "CA")],
    ));

    trace!(chain = chain_id, residue = n, ?phi, ?psi, ?omega, "Residue torsions");

    if !config.inclusion_policy.admits(phi, psi, omega) {
        return None;
    }

    Some(AngleRecord {
        chain_id: chain_id.to_string(),
        residue_number: n,
        residue_name: residue.name.clone(),
        phi,
        psi,
        omega,
    })
}

fn torsion(table: &AtomTable, chain_id: &str, atoms: [(isize, &str); 4]) -> Option<f64> {
    let [a, b, c, d] = atoms;
    let a = table.lookup(chain_id, a.0, a.1)?;
    let b = table.lookup(chain_id, b.0, b.1)?;
    let c = table.lookup(chain_id, c.0, c.1)?;
    let d = table.lookup(chain_id, d.0, d.1)?;
    Some(dihedral(&a, &b, &c, &d))
}
