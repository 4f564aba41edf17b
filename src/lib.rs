//! odup: run Odoo module updates across multiple databases
//!
//! Wraps the Odoo binary to update modules sequentially on a list of
//! databases, refusing to run while the Odoo service is active. Operating
//! parameters come from a layered INI configuration search path.

pub mod cli;
pub mod config;
pub mod orchestrator;
