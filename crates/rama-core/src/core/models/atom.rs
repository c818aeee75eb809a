use nalgebra::Point3;

/// A single protein atom extracted from an `ATOM` record of a structure file.
///
/// Records are immutable once parsed and only ever created for residues in the
/// canonical 20-residue vocabulary. The parser keeps them in file order, which
/// is the order every downstream residue walk relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The name of the atom (e.g., "CA", "N", "OG").
    pub atom_name: String,
    /// The three-letter residue name (e.g., "ALA", "GLY").
    pub residue_name: String,
    /// The chain identifier; empty when the chain column is blank.
    pub chain_id: String,
    /// The residue sequence number from the source file.
    pub residue_number: isize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    /// Creates a new `AtomRecord`.
    ///
    /// # Arguments
    ///
    /// * `atom_name` - The name of the atom.
    /// * `residue_name` - The three-letter name of the parent residue.
    /// * `chain_id` - The identifier of the parent chain.
    /// * `residue_number` - The sequence number of the parent residue.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        atom_name: &str,
        residue_name: &str,
        chain_id: &str,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            atom_name: atom_name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id: chain_id.to_string(),
            residue_number,
            position,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }
}
