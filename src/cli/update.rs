//! Update command implementation

use anyhow::{Context, Result};
use std::process;

use crate::config::{self, ConfigEnv};
use crate::orchestrator::interrupt::InterruptState;
use crate::orchestrator::runner::{run_updates, RunOutcome, UpdateCommand};
use crate::orchestrator::service::service_is_active;
use crate::orchestrator::targets::{list_databases, resolve_targets};

pub fn run(databases: &str, odoo_args: &[String]) -> Result<()> {
    let env = ConfigEnv::from_process();
    let config_files = config::discover_config_files(&env);
    tracing::debug!(candidates = config_files.len(), "config search path built");

    let cfg = config::load_builtin(&config_files)?;

    let db_user = cfg.require("odoo", "database_user")?;
    let odoo_path = cfg.require("odoo", "binary_path")?;
    let odoo_conf_path = cfg.require("odoo", "config_path")?;
    let daemon_name = cfg.require("odoo", "daemon_name")?;
    let working_dir = cfg.require("odoo", "working_directory")?;

    let targets = resolve_targets(databases, || list_databases(db_user))?;
    tracing::debug!(count = targets.len(), "resolved database targets");

    // The update must never run next to a live Odoo daemon. Stopping the
    // service stays a manual operator action.
    if service_is_active(daemon_name)? {
        eprintln!("Error: Odoo service is running. Stop it before updating.");
        eprintln!("To do so, run as root: systemctl stop {daemon_name}");
        process::exit(1);
    }

    std::env::set_current_dir(working_dir)
        .with_context(|| format!("Failed to change working directory to {working_dir}"))?;

    let binary = match which::which(odoo_path) {
        Ok(path) => path,
        Err(_) => {
            eprintln!("Error: Command {odoo_path} not found");
            process::exit(1);
        }
    };
    tracing::debug!(binary = %binary.display(), "update binary resolved");

    let interrupts = InterruptState::install().context("Failed to install SIGINT handler")?;

    let command = UpdateCommand {
        binary,
        config_path: odoo_conf_path.to_string(),
        extra_args: odoo_args.to_vec(),
    };

    match run_updates(&command, &targets, &interrupts)? {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Aborted => process::exit(1),
    }
}
