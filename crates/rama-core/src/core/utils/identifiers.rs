use phf::{Set, phf_set};

static CANONICAL_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

pub const GLYCINE: &str = "GLY";
pub const PROLINE: &str = "PRO";

/// Returns `true` if `residue_name` is one of the 20 canonical amino acids.
///
/// The comparison is exact: names are expected to be upper-case three-letter
/// codes with surrounding whitespace already removed.
pub fn is_canonical_residue(residue_name: &str) -> bool {
    CANONICAL_RESIDUE_NAMES.contains(residue_name)
}

/// Residues whose side chains carry no chi torsions worth reporting.
pub fn lacks_side_chain_torsions(residue_name: &str) -> bool {
    residue_name == GLYCINE || residue_name == PROLINE
}
