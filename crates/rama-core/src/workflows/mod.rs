//! # Workflows Module
//!
//! High-level entry points that take structure files from disk to angle tables.
//!
//! - **Single structure** ([`analyze`]) - Parse one PDB file and assemble the requested
//!   angle kinds.
//! - **Directory batch** ([`batch`]) - Analyze every `.pdb` file in a directory in
//!   parallel, tagging each record with its source file and collecting per-file failures
//!   without aborting the run.

pub mod analyze;
pub mod batch;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::engine::tasks::fixtures::*;

    pub fn atom_line(serial: usize, name: &str, res: &str, chain: &str, num: isize, xyz: [f64; 3]) -> String {
        let padded_name = if name.len() < 4 {
            format!(" {:<3}", name)
        } else {
            name.to_string()
        };
        format!(
            "ATOM  {:>5} {} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           {}",
            serial, padded_name, res, chain, num, xyz[0], xyz[1], xyz[2], &name[..1]
        )
    }

    /// A three-residue chain as PDB text, with a GLN side chain on residue 2
    /// and a water molecule that the parser must drop.
    pub fn tripeptide_pdb(chain: &str) -> String {
        let atoms = [
            ("N", "MET", 1, N1),
            ("CA", "MET", 1, CA1),
            ("C", "MET", 1, C1),
            ("N", "GLN", 2, N2),
            ("CA", "GLN", 2, CA2),
            ("C", "GLN", 2, C2),
            ("CB", "GLN", 2, CB),
            ("CG", "GLN", 2, CG),
            ("CD", "GLN", 2, CD),
            ("N", "LYS", 3, N3),
            ("CA", "LYS", 3, CA3),
            ("C", "LYS", 3, C3),
            ("O", "HOH", 4, [0.0, 0.0, 0.0]),
        ];
        let mut text = String::from("HEADER    TEST STRUCTURE\n");
        for (i, (name, res, num, xyz)) in atoms.iter().enumerate() {
            text.push_str(&atom_line(i + 1, name, res, chain, *num, *xyz));
            text.push('\n');
        }
        text.push_str("END\n");
        text
    }
}
