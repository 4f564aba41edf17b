//! Sequential update orchestration
//!
//! Resolves the database target list, guards against a running Odoo daemon,
//! and runs the update binary once per database with interrupt-driven
//! graceful-then-forced shutdown.

pub mod interrupt;
pub mod runner;
pub mod service;
pub mod targets;
