//! Config search-path composition
//!
//! Candidate paths are composed from plain values so discovery is testable
//! without mutating the process environment.

use std::env;
use std::path::{Path, PathBuf};

/// Program name, used for the rc-file and config-directory names.
pub const PRG_NAME: &str = "odup";

/// Environment variable naming a config file that beats the whole search path.
pub const CONF_ENV_VAR: &str = "ODUP_CONF";

const RC_NAME: &str = "oduprc";

/// Environment inputs that drive config-file discovery.
pub struct ConfigEnv {
    pub home: Option<PathBuf>,
    pub xdg_config_home: Option<String>,
    pub xdg_config_dirs: Option<String>,
    pub conf_override: Option<String>,
}

impl ConfigEnv {
    /// Snapshot the relevant variables from the process environment.
    pub fn from_process() -> Self {
        Self {
            home: dirs::home_dir(),
            xdg_config_home: non_empty_var("XDG_CONFIG_HOME"),
            xdg_config_dirs: non_empty_var("XDG_CONFIG_DIRS"),
            conf_override: non_empty_var(CONF_ENV_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Compose one candidate path per root location.
///
/// Produces `root/filename`, or `root/directory/filename` when a directory
/// is given. Pure path composition: never touches the filesystem and
/// preserves input order.
pub fn list_config_paths(
    locations: &[PathBuf],
    filename: &str,
    directory: Option<&str>,
) -> Vec<PathBuf> {
    locations
        .iter()
        .map(|root| match directory {
            Some(dir) => root.join(dir).join(filename),
            None => root.join(filename),
        })
        .collect()
}

/// Build the full candidate list, highest precedence first:
/// `$ODUP_CONF`, the XDG config home, `~/.oduprc`, the XDG config dirs,
/// then `/etc`.
pub fn discover_config_files(env: &ConfigEnv) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = &env.conf_override {
        candidates.push(PathBuf::from(path));
    }

    if let Some(config_home) = env
        .xdg_config_home
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| env.home.as_ref().map(|home| home.join(".config")))
    {
        candidates.extend(list_config_paths(&[config_home], RC_NAME, Some(PRG_NAME)));
    }

    candidates.extend(list_config_paths(
        &[PathBuf::from("~")],
        &format!(".{RC_NAME}"),
        None,
    ));

    let config_dirs: Vec<PathBuf> = env
        .xdg_config_dirs
        .as_deref()
        .unwrap_or("/etc/xdg")
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect();
    candidates.extend(list_config_paths(&config_dirs, RC_NAME, Some(PRG_NAME)));

    candidates.extend(list_config_paths(
        &[PathBuf::from("/etc")],
        RC_NAME,
        Some(PRG_NAME),
    ));

    candidates
}

/// Expand a leading `~` component against the given home directory.
///
/// Paths without the shorthand, or with no home to expand against, pass
/// through unchanged.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_config_paths_without_directory() {
        let locations = vec![PathBuf::from("test"), PathBuf::from("~/test")];
        let paths = list_config_paths(&locations, "pgrtestrc", None);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("test/pgrtestrc"),
                PathBuf::from("~/test/pgrtestrc"),
            ]
        );
    }

    #[test]
    fn test_list_config_paths_with_directory() {
        let locations = vec![PathBuf::from("test"), PathBuf::from("~/test")];
        let paths = list_config_paths(&locations, "pgrtestrc", Some("dirtest"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("test/dirtest/pgrtestrc"),
                PathBuf::from("~/test/dirtest/pgrtestrc"),
            ]
        );
    }

    #[test]
    fn test_list_config_paths_empty_locations() {
        assert!(list_config_paths(&[], "pgrtestrc", None).is_empty());
    }

    #[test]
    fn test_discover_precedence_order() {
        let env = ConfigEnv {
            home: Some(PathBuf::from("/home/alice")),
            xdg_config_home: None,
            xdg_config_dirs: Some("/opt/xdg:/srv/xdg".to_string()),
            conf_override: Some("/tmp/override.conf".to_string()),
        };
        let candidates = discover_config_files(&env);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/tmp/override.conf"),
                PathBuf::from("/home/alice/.config/odup/oduprc"),
                PathBuf::from("~/.oduprc"),
                PathBuf::from("/opt/xdg/odup/oduprc"),
                PathBuf::from("/srv/xdg/odup/oduprc"),
                PathBuf::from("/etc/odup/oduprc"),
            ]
        );
    }

    #[test]
    fn test_discover_xdg_config_home_beats_home_fallback() {
        let env = ConfigEnv {
            home: Some(PathBuf::from("/home/alice")),
            xdg_config_home: Some("/custom/config".to_string()),
            xdg_config_dirs: None,
            conf_override: None,
        };
        let candidates = discover_config_files(&env);
        assert_eq!(candidates[0], PathBuf::from("/custom/config/odup/oduprc"));
        assert!(candidates.contains(&PathBuf::from("/etc/xdg/odup/oduprc")));
    }

    #[test]
    fn test_expand_home() {
        let home = PathBuf::from("/home/alice");
        assert_eq!(
            expand_home(Path::new("~/.oduprc"), Some(&home)),
            PathBuf::from("/home/alice/.oduprc")
        );
        assert_eq!(
            expand_home(Path::new("/etc/odup/oduprc"), Some(&home)),
            PathBuf::from("/etc/odup/oduprc")
        );
        assert_eq!(
            expand_home(Path::new("~/.oduprc"), None),
            PathBuf::from("~/.oduprc")
        );
    }
}
