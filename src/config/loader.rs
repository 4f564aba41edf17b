//! Config file loading and merging
//!
//! Each file parses into an immutable section/key/value mapping; the
//! mappings then fold over the defaults baseline with last-write-wins
//! semantics. The first path in the candidate list has the highest
//! precedence, so the existing files are applied in reverse order.

use ini::Ini;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::expand_home;

/// Baseline configuration compiled into the binary. Always present, must
/// always parse.
const BUILTIN_DEFAULTS: &str = include_str!("defaults.conf");

/// Keys outside any `[section]` header, and section-less fallback lookups,
/// live here.
const GENERAL_SECTION: &str = "general";

type SectionMap = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("missing required key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },
}

/// The merged configuration: section -> key -> value, read-only.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    sections: SectionMap,
}

impl ResolvedConfig {
    /// Look up a key, falling back to the `general` section when the named
    /// section lacks it.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .or_else(|| {
                self.sections
                    .get(GENERAL_SECTION)
                    .and_then(|keys| keys.get(key))
            })
            .map(String::as_str)
    }

    /// Like [`get`](Self::get), but absence is an error naming the key.
    pub fn require(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.get(section, key).ok_or_else(|| ConfigError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        })
    }
}

/// Load a configuration from a defaults file plus an ordered candidate list.
///
/// The defaults file is mandatory: missing or unparsable is fatal. Candidate
/// paths that do not exist are silently skipped; malformed syntax in a
/// present candidate is fatal. The first candidate has the highest
/// precedence.
pub fn load(defaults_path: &Path, config_paths: &[PathBuf]) -> Result<ResolvedConfig, ConfigError> {
    let home = dirs::home_dir();
    let defaults_path = expand_home(defaults_path, home.as_deref());

    let content = fs::read_to_string(&defaults_path).map_err(|source| ConfigError::Io {
        path: defaults_path.clone(),
        source,
    })?;
    let baseline = parse_sections(&content).map_err(|source| ConfigError::Parse {
        path: defaults_path,
        source,
    })?;

    fold_overrides(baseline, config_paths, home.as_deref())
}

/// Like [`load`], with the baseline taken from the defaults compiled into
/// the binary.
pub fn load_builtin(config_paths: &[PathBuf]) -> Result<ResolvedConfig, ConfigError> {
    let baseline = parse_sections(BUILTIN_DEFAULTS).map_err(|source| ConfigError::Parse {
        path: PathBuf::from("<built-in defaults>"),
        source,
    })?;

    fold_overrides(baseline, config_paths, dirs::home_dir().as_deref())
}

fn parse_sections(content: &str) -> Result<SectionMap, ini::ParseError> {
    let ini = Ini::load_from_str_noescape(content)?;
    let mut sections = SectionMap::new();
    for (section, properties) in ini.iter() {
        let name = section.unwrap_or(GENERAL_SECTION).to_string();
        let keys = sections.entry(name).or_default();
        for (key, value) in properties.iter() {
            keys.insert(key.to_string(), value.to_string());
        }
    }
    Ok(sections)
}

fn fold_overrides(
    baseline: SectionMap,
    config_paths: &[PathBuf],
    home: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    let mut existing: Vec<PathBuf> = config_paths
        .iter()
        .map(|path| expand_home(path, home))
        .filter(|path| path.exists())
        .collect();
    // Apply the lowest-precedence file first so a later (= higher
    // precedence) write wins per key.
    existing.reverse();

    let mut merged = baseline;
    for path in existing {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let sections =
            parse_sections(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        for (name, keys) in sections {
            let target = merged.entry(name).or_default();
            for (key, value) in keys {
                target.insert(key, value);
            }
        }
        tracing::debug!(path = %path.display(), "merged config file");
    }

    Ok(ResolvedConfig { sections: merged })
}
