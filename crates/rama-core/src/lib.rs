//! # ramapp Core Library
//!
//! A library for extracting backbone (phi, psi, omega) and side-chain (chi1, chi2)
//! torsion angles from protein structure files, with the statistics usually built
//! on top of them: Ramachandran density grids, IQR outlier flags and a secondary
//! structure summary.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `AtomTable`,
//!   angle records), dihedral geometry, residue classification and file I/O.
//!
//! - **[`engine`]: The Computations.** Validated configuration, the angle assembly
//!   tasks, outlier and density statistics, error types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that read a structure
//!   file (or a directory of them) and return angle tables.

pub mod core;
pub mod engine;
pub mod workflows;
