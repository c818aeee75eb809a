use std::collections::BTreeMap;

/// Normalized phi/psi occupancy over a square grid of angle bins.
///
/// Cells are keyed by bin index; the lower edge of a bin in degrees is
/// `index * bin_size`. Only occupied cells are stored and their frequencies
/// sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    pub bin_size: f64,
    pub(crate) cells: BTreeMap<(i64, i64), f64>,
}

impl DensityTable {
    pub(crate) fn new(bin_size: f64, cells: BTreeMap<(i64, i64), f64>) -> Self {
        Self { bin_size, cells }
    }

    /// Occupied cells as `(phi_bin, psi_bin, frequency)` in ascending phi then psi order.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.cells.iter().map(|(&(phi, psi), &frequency)| {
            (
                phi as f64 * self.bin_size,
                psi as f64 * self.bin_size,
                frequency,
            )
        })
    }

    /// Frequency of the bin containing `(phi, psi)`, zero when unoccupied.
    pub fn frequency_at(&self, phi: f64, psi: f64) -> f64 {
        let key = (bin_index(phi, self.bin_size), bin_index(psi, self.bin_size));
        self.cells.get(&key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of bins spanning one full turn.
    pub fn bins_per_axis(&self) -> usize {
        (360.0 / self.bin_size).ceil() as usize
    }
}

pub(crate) fn bin_index(angle: f64, bin_size: f64) -> i64 {
    (angle / bin_size).floor() as i64
}
