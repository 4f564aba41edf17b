//! Database target resolution

use anyhow::{Context, Result};
use std::process::Command;

/// Turn the databases argument into a target list.
///
/// The literal `all` delegates to the injected listing collaborator;
/// anything else is split on commas with each name trimmed. No
/// deduplication, no validation of the resulting names.
pub fn resolve_targets<F>(databases: &str, list_all: F) -> Result<Vec<String>>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    if databases.trim() == "all" {
        list_all()
    } else {
        Ok(databases
            .split(',')
            .map(|name| name.trim().to_string())
            .collect())
    }
}

/// All databases owned by `owner`, according to `psql -l`.
pub fn list_databases(owner: &str) -> Result<Vec<String>> {
    let output = Command::new("psql")
        .arg("-l")
        .output()
        .context("Failed to run psql -l")?;
    if !output.status.success() {
        anyhow::bail!("psql -l exited with {}", output.status);
    }
    Ok(parse_database_list(
        &String::from_utf8_lossy(&output.stdout),
        owner,
    ))
}

/// Extract database names from a `psql -l` style listing.
///
/// Keeps rows mentioning the owner, takes the first `|`-separated field as
/// the database name. Rows with an empty first field (rulers,
/// access-privilege continuation rows) name no database and are dropped.
pub fn parse_database_list(listing: &str, owner: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|line| line.contains(owner))
        .filter_map(|line| line.split('|').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_targets_splits_and_trims() {
        let targets = resolve_targets("db1, db2 ,db3", || unreachable!()).expect("targets");
        assert_eq!(targets, vec!["db1", "db2", "db3"]);
    }

    #[test]
    fn test_resolve_targets_all_delegates_to_listing() {
        let targets = resolve_targets(" all ", || Ok(vec!["prod".to_string(), "staging".to_string()]))
            .expect("targets");
        assert_eq!(targets, vec!["prod", "staging"]);
    }

    #[test]
    fn test_resolve_targets_keeps_empty_entries() {
        let targets = resolve_targets("a,,b", || unreachable!()).expect("targets");
        assert_eq!(targets, vec!["a", "", "b"]);
    }

    #[test]
    fn test_resolve_targets_propagates_listing_error() {
        let result = resolve_targets("all", || anyhow::bail!("psql unavailable"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_database_list() {
        let listing = "\
 prod_main    | odoo  | UTF8     | en_US.UTF-8 | en_US.UTF-8 |
 prod_shop    | odoo  | UTF8     | en_US.UTF-8 | en_US.UTF-8 |
 postgres     | admin | UTF8     | en_US.UTF-8 | en_US.UTF-8 |
              |       |          |             |             | =Tc/odoo
 template0    | admin | UTF8     | en_US.UTF-8 | en_US.UTF-8 |
";
        assert_eq!(
            parse_database_list(listing, "odoo"),
            vec!["prod_main", "prod_shop"]
        );
    }

    #[test]
    fn test_parse_database_list_no_match() {
        assert!(parse_database_list(" postgres | admin |\n", "odoo").is_empty());
        assert!(parse_database_list("", "odoo").is_empty());
    }
}
