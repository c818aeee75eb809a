//! Provides input/output functionality for structure files and derived tables.
//!
//! Structure files are read through the [`traits::StructureFile`] interface,
//! currently implemented for fixed-column PDB text. Angle tables are exported
//! and re-read as delimited text, and density grids are written in a plain
//! commented text format.

pub mod density;
pub mod pdb;
pub mod table;
pub mod traits;
