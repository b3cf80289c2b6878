//! Configuration discovery and effective settings resolution.
//!
//! tfsort reads `tfsort.toml|yaml|yml` from the scan root or the closest
//! ancestor (stopping at a `.git` directory) and merges it with CLI flags to
//! produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `special`: `count`, `source`, `providers`, `lifecycle`, `for_each`
//! - `declarations`: `variable`
//! - `exclude`: `.terraform`
//! - `extensions`: `tf`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::models::policy::{OrderPolicy, DEFAULT_SPECIAL};
use crate::walk::Rules;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["tfsort.toml", "tfsort.yaml", "tfsort.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `tfsort.toml|yaml`.
pub struct TfsortConfig {
    pub output: Option<String>,
    /// Replaces the special-name set used for blocks and object literals.
    pub special: Option<Vec<String>>,
    /// Top-level block types whose labels must be alphabetical per file.
    pub declarations: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub rules: Rules,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory holding a config file or a `.git` entry.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_FILES {
            let candidate = cur.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load `TfsortConfig` from an explicit file, picking the format by extension.
pub fn load_config(path: &Path) -> Result<TfsortConfig> {
    let s = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli_directory: Option<&str>, cli_output: Option<&str>) -> Result<Effective> {
    let root = PathBuf::from(cli_directory.unwrap_or("."));
    // Absolute path so ancestor lookup works for relative roots like "."
    let search_from = fs::canonicalize(&root).map_err(|e| Error::io(&root, e))?;
    let config_path = find_config(&search_from);
    let cfg = match config_path.as_deref() {
        Some(p) => {
            tracing::info!(config = %p.display(), "using config file");
            load_config(p)?
        }
        None => TfsortConfig::default(),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let body = match cfg.special {
        Some(names) => OrderPolicy::from_names(names),
        None => OrderPolicy::from_names(DEFAULT_SPECIAL),
    };
    let declaration_types = cfg
        .declarations
        .unwrap_or_else(|| vec!["variable".to_string()]);
    let exclude = cfg
        .exclude
        .unwrap_or_else(|| vec![".terraform".to_string()]);
    // Accept both "tf" and ".tf"
    let extensions = cfg
        .extensions
        .unwrap_or_else(|| vec!["tf".to_string()])
        .into_iter()
        .map(|e| e.trim_start_matches('.').to_string())
        .collect::<Vec<String>>();
    tracing::debug!(
        special = ?body.special_names().collect::<Vec<_>>(),
        declarations = ?declaration_types,
        extensions = ?extensions,
        "resolved ordering rules"
    );

    Ok(Effective {
        root,
        config_path,
        output,
        rules: Rules {
            body,
            declarations: OrderPolicy::plain(),
            declaration_types,
        },
        exclude,
        extensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.output, "human");
        assert_eq!(eff.exclude, vec![".terraform"]);
        assert_eq!(eff.extensions, vec!["tf"]);
        assert_eq!(eff.rules.declaration_types, vec!["variable"]);
        assert!(eff.rules.body.is_special("for_each"));
        assert!(!eff.rules.body.is_special("metadata"));
    }

    #[test]
    fn test_load_toml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("tfsort.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
special = ["count", "source", "metadata"]
declarations = ["variable", "output"]
extensions = [".tf", "tofu"]
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None).unwrap();
        assert!(eff
            .config_path
            .as_deref()
            .is_some_and(|p| p.ends_with("tfsort.toml")));
        assert_eq!(eff.output, "json");
        assert!(eff.rules.body.is_special("metadata"));
        assert!(!eff.rules.body.is_special("for_each"));
        assert_eq!(eff.rules.declaration_types, vec!["variable", "output"]);
        assert_eq!(eff.extensions, vec!["tf", "tofu"]);

        // CLI output overrides config output
        let eff = resolve_effective(root.to_str(), Some("human")).unwrap();
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_load_yaml_from_ancestor() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tfsort.yaml"), "exclude:\n  - .terraform\n  - vendor\n").unwrap();
        let nested = root.join("modules").join("net");
        fs::create_dir_all(&nested).unwrap();

        let eff = resolve_effective(nested.to_str(), None).unwrap();
        assert_eq!(eff.exclude, vec![".terraform", "vendor"]);
        assert_eq!(eff.root, nested);
    }

    #[test]
    fn test_git_directory_stops_lookup() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tfsort.toml"), "output = \"json\"\n").unwrap();
        let repo = root.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        assert!(find_config(&repo).is_none());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tfsort.toml"), "unknown_key = 1\n").unwrap();
        let err = resolve_effective(root.to_str(), None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = resolve_effective(missing.to_str(), None).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
