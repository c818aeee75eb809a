//! # Engine Module
//!
//! This module turns an [`AtomTable`](crate::core::models::table::AtomTable) into
//! torsion angle tables and derives statistics from those tables.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Inclusion policy, rounding, parallelism and density settings
//! - **Tasks** ([`tasks`]) - Backbone and side-chain assembly, outlier flags, density grids
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for long runs
//! - **Error Handling** ([`error`]) - Per-file analysis errors
//!
//! Missing atoms are never errors here: a torsion that cannot be resolved is simply
//! absent from the output.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
