use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::convert::{ConvertOptions, DEFAULT_KEYS, TAXONOMIES_KEY};
use crate::walk::build_globset;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    #[serde(default = "default_keys")]
    pub keys: Vec<String>,
    #[serde(default = "default_quote_values")]
    pub quote_values: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            quote_values: true,
        }
    }
}

fn default_keys() -> Vec<String> {
    DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
}
fn default_quote_values() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct WalkConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

impl Config {
    pub fn convert_options(&self) -> Result<ConvertOptions> {
        ConvertOptions::new(&self.convert.keys, self.convert.quote_values)
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if given, otherwise the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

fn validate(config: &Config) -> Result<()> {
    // Validate keys
    if config.convert.keys.is_empty() {
        anyhow::bail!("convert.keys must not be empty");
    }
    let mut seen = HashSet::new();
    for key in &config.convert.keys {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!(
                "convert.keys: '{}' is not a valid key (use letters, digits, '_' or '-')",
                key
            );
        }
        if key == TAXONOMIES_KEY {
            anyhow::bail!("convert.keys must not contain '{}'", TAXONOMIES_KEY);
        }
        if !seen.insert(key.as_str()) {
            anyhow::bail!("convert.keys: duplicate key '{}'", key);
        }
    }

    // Validate globs
    if config.walk.include_globs.is_empty() {
        anyhow::bail!("walk.include_globs must not be empty");
    }
    build_globset(&config.walk.include_globs).context("walk.include_globs")?;
    build_globset(&config.walk.exclude_globs).context("walk.exclude_globs")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(body: &str) -> (TempDir, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("taxonomize.toml");
        fs::write(&path, body).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = load_or_default(None).unwrap();
        assert_eq!(cfg.convert.keys, vec!["tags", "categories"]);
        assert!(cfg.convert.quote_values);
        assert_eq!(cfg.walk.include_globs, vec!["**/*.md"]);
        assert!(cfg.walk.exclude_globs.is_empty());
        assert!(!cfg.walk.follow_symlinks);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let (_tmp, path) = write_config("");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.convert.keys, vec!["tags", "categories"]);
    }

    #[test]
    fn test_full_file() {
        let (_tmp, path) = write_config(
            r#"[convert]
keys = ["series"]
quote_values = false

[walk]
include_globs = ["content/**/*.md"]
exclude_globs = ["**/drafts/**"]
follow_symlinks = true
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.convert.keys, vec!["series"]);
        assert!(!cfg.convert.quote_values);
        assert_eq!(cfg.walk.exclude_globs, vec!["**/drafts/**"]);
        assert!(cfg.walk.follow_symlinks);
        let opts = cfg.convert_options().unwrap();
        assert_eq!(opts.keys().collect::<Vec<_>>(), vec!["series"]);
    }

    #[test]
    fn test_rejects_bad_keys() {
        for body in [
            "[convert]\nkeys = []\n",
            "[convert]\nkeys = [\"\"]\n",
            "[convert]\nkeys = [\"a b\"]\n",
            "[convert]\nkeys = [\"taxonomies\"]\n",
            "[convert]\nkeys = [\"tags\", \"tags\"]\n",
        ] {
            let (_tmp, path) = write_config(body);
            assert!(load_config(&path).is_err(), "accepted: {}", body);
        }
    }

    #[test]
    fn test_rejects_bad_glob() {
        let (_tmp, path) = write_config("[walk]\ninclude_globs = [\"a/[\"]\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_rejects_unknown_field() {
        let (_tmp, path) = write_config("[convert]\nsort = true\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/taxonomize.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
