//! Pure helpers shared across the crate: torsion geometry and residue vocabularies.

pub mod geometry;
pub mod identifiers;
