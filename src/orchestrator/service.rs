//! Odoo service-state guard

use anyhow::{Context, Result};
use std::process::Command;

/// Ask systemd whether the daemon is currently active.
///
/// The orchestrator only ever reads this state; stopping the service is left
/// to the operator.
pub fn service_is_active(daemon: &str) -> Result<bool> {
    let output = Command::new("systemctl")
        .args(["show", "--property", "ActiveState"])
        .arg(daemon)
        .output()
        .context("Failed to run systemctl")?;
    Ok(parse_active_state(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse a `key=value` state line; true only for the exact value `active`.
pub fn parse_active_state(output: &str) -> bool {
    output
        .trim()
        .rsplit('=')
        .next()
        .map(|state| state == "active")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_state_exact_match_only() {
        assert!(parse_active_state("ActiveState=active"));
        assert!(parse_active_state("ActiveState=active\n"));
        assert!(!parse_active_state("ActiveState=inactive"));
        assert!(!parse_active_state("ActiveState=failed"));
        assert!(!parse_active_state("ActiveState="));
        assert!(!parse_active_state(""));
        assert!(!parse_active_state("ActiveState=activating"));
    }
}
