//! # Core Models Module
//!
//! This module contains the data structures used to represent the atoms of a
//! protein structure and the torsion angles derived from them.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom record with its residue/chain keys and coordinates
//! - [`table`] - The ordered atom table with an indexed coordinate lookup
//! - [`residue`] - The canonical amino acids and their physicochemical categories
//! - [`angles`] - Backbone and side-chain torsion records produced by the engine
//! - [`density`] - Normalized phi/psi occupancy grid
//!
//! ## Usage
//!
//! ```ignore
//! use ramapp::core::models::{atom::AtomRecord, table::AtomTable};
//! use nalgebra::Point3;
//!
//! let mut table = AtomTable::new();
//! table.push(AtomRecord::new("CA", "ALA", "A", 1, Point3::new(0.0, 0.0, 0.0)));
//! let ca = table.lookup("A", 1, "CA");
//! ```

pub mod angles;
pub mod atom;
pub mod density;
pub mod residue;
pub mod table;
