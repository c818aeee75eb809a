use crate::core::models::density::{DensityTable, bin_index};
use crate::engine::config::ConfigError;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Bins `(phi, psi)` pairs on a square grid and normalizes the counts.
///
/// An angle falls in the bin whose lower edge is `floor(angle / bin_size) * bin_size`.
/// Pairs with a non-finite angle are left out of both the bins and the total.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidParameter`] if `bin_size` is not a positive number.
#[instrument(skip(pairs), name = "density_table")]
pub fn build_density_table(pairs: &[(f64, f64)], bin_size: f64) -> Result<DensityTable, ConfigError> {
    if !(bin_size.is_finite() && bin_size > 0.0) {
        return Err(ConfigError::InvalidParameter {
            name: "density_bin_size",
            reason: format!("must be a positive number, got {}", bin_size),
        });
    }

    let mut counts: BTreeMap<(i64, i64), usize> = BTreeMap::new();
    let mut binned = 0usize;
    for &(phi, psi) in pairs {
        if !(phi.is_finite() && psi.is_finite()) {
            continue;
        }
        *counts
            .entry((bin_index(phi, bin_size), bin_index(psi, bin_size)))
            .or_insert(0) += 1;
        binned += 1;
    }

    let total = binned as f64;
    let cells = counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / total))
        .collect();
    let table = DensityTable::new(bin_size, cells);

    debug!(
        pairs = pairs.len(),
        skipped = pairs.len() - binned,
        occupied = table.len(),
        "Density table built."
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_use_floor_of_angle_over_bin_size() {
        let table = build_density_table(&[(-107.83, 144.35), (-1.0, 0.5)], 2.0).unwrap();
        let cells: Vec<_> = table.cells().collect();
        assert_eq!(cells, vec![(-108.0, 144.0, 0.5), (-2.0, 0.0, 0.5)]);
    }

    #[test]
    fn non_finite_pairs_are_not_binned() {
        let pairs = [(f64::NAN, -45.0), (-60.0, -45.0), (-60.5, f64::INFINITY)];
        let table = build_density_table(&pairs, 2.0).unwrap();
        let cells: Vec<_> = table.cells().collect();
        assert_eq!(cells, vec![(-60.0, -46.0, 1.0)]);
    }

    #[test]
    fn frequencies_are_normalized_over_all_pairs() {
        let pairs = [(-60.1, -45.2), (-60.9, -44.1), (-62.5, -45.9), (120.0, 130.0)];
        let table = build_density_table(&pairs, 2.0).unwrap();

        let total: f64 = table.cells().map(|(_, _, f)| f).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(table.frequency_at(-60.5, -45.0), 0.5);
        assert_eq!(table.frequency_at(-62.5, -45.9), 0.25);
        assert_eq!(table.frequency_at(0.0, 0.0), 0.0);
    }

    #[test]
    fn wider_bins_merge_cells() {
        let pairs = [(-60.1, -45.2), (-61.5, -45.9), (-64.0, -41.0)];
        let table = build_density_table(&pairs, 10.0).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cells().next(), Some((-70.0, -50.0, 1.0)));
        assert_eq!(table.bins_per_axis(), 36);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = build_density_table(&[], 2.0).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn non_positive_bin_size_is_rejected() {
        assert!(build_density_table(&[(0.0, 0.0)], 0.0).is_err());
        assert!(build_density_table(&[(0.0, 0.0)], -1.0).is_err());
    }
}
