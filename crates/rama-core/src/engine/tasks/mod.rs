//! Computational tasks that turn an atom table into angle tables and statistics.
//!
//! Backbone and side-chain assembly walk chains and residues in encounter
//! order; the statistics tasks operate on the resulting tables.

use crate::core::models::table::{AtomTable, ChainEntry};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod backbone;
pub mod density;
pub mod outliers;
pub mod side_chain;

/// Runs `per_chain` on every chain and concatenates the results in chain order.
pub(crate) fn collect_per_chain<T, F>(table: &AtomTable, parallel: bool, per_chain: F) -> Vec<T>
where
    T: Send,
    F: Fn(&ChainEntry) -> Vec<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let chunks: Vec<Vec<T>> = if parallel && table.chains().len() > 1 {
        table.chains().par_iter().map(&per_chain).collect()
    } else {
        table.chains().iter().map(&per_chain).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let chunks: Vec<Vec<T>> = {
        let _ = parallel;
        table.chains().iter().map(&per_chain).collect()
    };

    chunks.into_iter().flatten().collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::table::AtomTable;
    use nalgebra::Point3;

    pub const N1: [f64; 3] = [17.047, 14.099, 3.625];
    pub const CA1: [f64; 3] = [16.967, 12.784, 4.338];
    pub const C1: [f64; 3] = [15.685, 12.755, 5.133];
    pub const N2: [f64; 3] = [15.115, 11.555, 5.265];
    pub const CA2: [f64; 3] = [13.856, 11.469, 6.066];
    pub const C2: [f64; 3] = [14.164, 10.785, 7.379];
    pub const N3: [f64; 3] = [13.488, 11.241, 8.417];
    pub const CA3: [f64; 3] = [13.660, 10.707, 9.787];
    pub const C3: [f64; 3] = [12.269, 10.431, 10.323];

    pub const CB: [f64; 3] = [13.0, 12.7, 6.3];
    pub const CG: [f64; 3] = [12.6, 13.4, 5.0];
    pub const CD: [f64; 3] = [11.3, 14.1, 5.2];
    pub const OG: [f64; 3] = [13.8, 13.6, 6.9];

    pub fn atom(chain: &str, num: isize, res: &str, name: &str, xyz: [f64; 3]) -> AtomRecord {
        AtomRecord::new(name, res, chain, num, Point3::from(xyz))
    }

    /// Backbone atoms of a three-residue chain with the middle residue named `middle`.
    pub fn backbone_rows(chain: &str, middle: &str) -> Vec<AtomRecord> {
        vec![
            atom(chain, 1, "MET", "N", N1),
            atom(chain, 1, "MET", "CA", CA1),
            atom(chain, 1, "MET", "C", C1),
            atom(chain, 2, middle, "N", N2),
            atom(chain, 2, middle, "CA", CA2),
            atom(chain, 2, middle, "C", C2),
            atom(chain, 3, "LYS", "N", N3),
            atom(chain, 3, "LYS", "CA", CA3),
            atom(chain, 3, "LYS", "C", C3),
        ]
    }

    pub fn tripeptide(chain: &str) -> AtomTable {
        backbone_rows(chain, "THR").into_iter().collect()
    }
}
