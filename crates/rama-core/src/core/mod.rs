//! # Core Module
//!
//! This module provides the stateless building blocks of ramapp: the atom and
//! angle data models, structure-file I/O, and the torsion geometry.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atom records, the indexed atom table, residue
//!   categories and angle records
//! - **File I/O** ([`io`]) - Fixed-column PDB parsing, delimited angle tables and density tables
//! - **Utilities** ([`utils`]) - Dihedral geometry and residue vocabularies
//!
//! Nothing in this module holds state across calls; the [`crate::engine`] layer
//! drives these pieces to assemble angle tables.

pub mod io;
pub mod models;
pub mod utils;
