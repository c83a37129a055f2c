//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tocnav/tocnav.toml`
//! 3. Local config: `.tocnav.toml` next to the ToC file, or the file given with `--config`
//! 4. Environment variables: `TOCNAV_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::format::Format;
use crate::application::ApplicationError;

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_NAME: &str = ".tocnav.toml";

/// How sections without entries are treated by `check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySectionPolicy {
    Allow,
    #[default]
    Warn,
    Deny,
}

/// Lint rule settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub empty_sections: EmptySectionPolicy,
    /// Regex every page path must match, e.g. `^/`
    pub path_pattern: Option<String>,
    /// Nesting depth beyond which entries are flagged
    pub max_depth: Option<usize>,
}

/// Mapping from page paths to documentation source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Directory holding the page sources (relative paths resolve against the ToC file)
    pub docs_root: Option<PathBuf>,
    /// URL prefix removed from a page path before mapping it to a file
    pub strip_prefix: String,
    /// Page source extensions, tried in order
    pub extensions: Vec<String>,
    /// File name used when a path names a directory
    pub index_name: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            docs_root: None,
            strip_prefix: String::new(),
            extensions: vec!["md".into()],
            index_name: "index".into(),
        }
    }
}

/// Navigation rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix prepended to page paths in rendered links
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLintConfig {
    pub empty_sections: Option<EmptySectionPolicy>,
    pub path_pattern: Option<String>,
    pub max_depth: Option<usize>,
}

/// Raw links config (arrays are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLinksConfig {
    pub docs_root: Option<PathBuf>,
    pub strip_prefix: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub index_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub base_url: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<Format>,
    pub lint: RawLintConfig,
    pub links: RawLinksConfig,
    pub render: RawRenderConfig,
}

/// Merge arrays with union semantics and negation support.
///
/// - Items from overlay are appended to base (order kept, duplicates dropped)
/// - Items prefixed with `!` remove the corresponding item from the result
///
/// ```ignore
/// merge_array(&["md", "html"], &["rst"])   // → ["md", "html", "rst"]
/// merge_array(&["md", "html"], &["!html"]) // → ["md"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let removed: HashSet<&str> = overlay.iter().filter_map(|p| p.strip_prefix('!')).collect();
    let mut seen = HashSet::new();

    base.iter()
        .chain(overlay.iter().filter(|p| !p.starts_with('!')))
        .filter(|item| !removed.contains(item.as_str()))
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

/// Unified configuration for tocnav.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default ToC format when the file extension does not tell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    pub lint: LintConfig,
    pub links: LinksConfig,
    pub render: RenderConfig,
}

/// Get the XDG config directory for tocnav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tocnav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tocnav.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_NAME)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(root) = &self.links.docs_root {
            self.links.docs_root = Some(PathBuf::from(expand(&root.to_string_lossy())));
        }
    }

    /// Global config onto defaults: arrays REPLACE the compiled defaults.
    fn apply_global(&self, global: &RawSettings) -> Self {
        let mut merged = self.merge_scalars(global);
        if let Some(extensions) = &global.links.extensions {
            merged.links.extensions = extensions.clone();
        }
        merged
    }

    /// Local config onto the current settings: arrays UNION with negation.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut merged = self.merge_scalars(overlay);
        if let Some(extensions) = &overlay.links.extensions {
            merged.links.extensions = merge_array(&self.links.extensions, extensions);
        }
        merged
    }

    fn merge_scalars(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay.format.or(self.format),
            lint: LintConfig {
                empty_sections: overlay
                    .lint
                    .empty_sections
                    .unwrap_or(self.lint.empty_sections),
                path_pattern: overlay
                    .lint
                    .path_pattern
                    .clone()
                    .or_else(|| self.lint.path_pattern.clone()),
                max_depth: overlay.lint.max_depth.or(self.lint.max_depth),
            },
            links: LinksConfig {
                docs_root: overlay
                    .links
                    .docs_root
                    .clone()
                    .or_else(|| self.links.docs_root.clone()),
                strip_prefix: overlay
                    .links
                    .strip_prefix
                    .clone()
                    .unwrap_or_else(|| self.links.strip_prefix.clone()),
                extensions: self.links.extensions.clone(),
                index_name: overlay
                    .links
                    .index_name
                    .clone()
                    .unwrap_or_else(|| self.links.index_name.clone()),
            },
            render: RenderConfig {
                base_url: overlay
                    .render
                    .base_url
                    .clone()
                    .unwrap_or_else(|| self.render.base_url.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `toc_dir` - Directory of the ToC file, searched for `.tocnav.toml`
    /// * `explicit` - Config file given on the command line; replaces the local lookup
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(toc_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        let local_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => toc_dir.map(local_config_path).filter(|p| p.exists()),
        };
        if let Some(path) = local_path {
            debug!("local config: {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TOCNAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TOCNAV")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("links.extensions")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<Format>(&config, "format")? {
            settings.format = Some(val);
        }
        if let Some(val) = env_value(&config, "lint.empty_sections")? {
            settings.lint.empty_sections = val;
        }
        if let Some(val) = env_value::<String>(&config, "lint.path_pattern")? {
            settings.lint.path_pattern = Some(val);
        }
        if let Some(val) = env_value::<usize>(&config, "lint.max_depth")? {
            settings.lint.max_depth = Some(val);
        }
        if let Some(val) = env_value::<String>(&config, "links.docs_root")? {
            settings.links.docs_root = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value(&config, "links.strip_prefix")? {
            settings.links.strip_prefix = val;
        }
        if let Some(val) = env_value(&config, "links.extensions")? {
            settings.links.extensions = val;
        }
        if let Some(val) = env_value(&config, "links.index_name")? {
            settings.links.index_name = val;
        }
        if let Some(val) = env_value(&config, "render.base_url")? {
            settings.render.base_url = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tocnav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tocnav/tocnav.toml  (defines your baseline)
#   Local:  .tocnav.toml next to the toc  (or --config FILE)
#   Env:    TOCNAV_* environment variables, e.g. TOCNAV_LINT__EMPTY_SECTIONS=deny
#
# Local config UNIONS arrays with global; "!item" removes an inherited item:
#   extensions = ["ipynb", "!html"]

# Format used when the file extension is not yaml/yml/json/toml
# format = "yaml"

[lint]
# Sections without entries: "allow", "warn" or "deny"
# empty_sections = "warn"

# Regex every page path must match
# path_pattern = "^/"

# Flag entries nested deeper than this
# max_depth = 6

[links]
# Directory holding the page sources (relative to the toc file)
# docs_root = "docs"

# URL prefix removed before mapping a path to a file
# strip_prefix = "/ranking/api_docs/python"

# Page source extensions, tried in order
# extensions = ["md"]

# File name used when a path names a directory
# index_name = "index"

[render]
# Prefix for rendered links
# base_url = "https://www.tensorflow.org"
"#
        .to_string()
    }
}

/// An env override for `key`; unset is `None`, an unparsable value is an error.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override {}: {}", key, e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_defaults_when_created_then_expected_values() {
        let settings = Settings::default();
        assert_eq!(settings.lint.empty_sections, EmptySectionPolicy::Warn);
        assert_eq!(settings.links.extensions, strings(&["md"]));
        assert_eq!(settings.links.index_name, "index");
        assert!(settings.format.is_none());
    }

    #[test]
    fn test_merge_array_union_keeps_order() {
        let result = merge_array(&strings(&["md", "html"]), &strings(&["rst", "md"]));
        assert_eq!(result, strings(&["md", "html", "rst"]));
    }

    #[test]
    fn test_merge_array_negation() {
        let result = merge_array(&strings(&["md", "html"]), &strings(&["!md", "ipynb"]));
        assert_eq!(result, strings(&["html", "ipynb"]));
    }

    #[test]
    fn test_merge_array_negation_nonexistent() {
        let result = merge_array(&strings(&["md"]), &strings(&["!x"]));
        assert_eq!(result, strings(&["md"]));
    }

    #[test]
    fn test_apply_global_replaces_arrays() {
        let global = RawSettings {
            links: RawLinksConfig {
                extensions: Some(strings(&["html"])),
                ..RawLinksConfig::default()
            },
            ..RawSettings::default()
        };
        let result = Settings::default().apply_global(&global);
        assert_eq!(result.links.extensions, strings(&["html"]));
    }

    #[test]
    fn test_merge_with_scalars_overlay_wins_only_when_set() {
        let base = Settings {
            lint: LintConfig {
                empty_sections: EmptySectionPolicy::Deny,
                path_pattern: Some("^/".into()),
                max_depth: None,
            },
            ..Settings::default()
        };
        let overlay = RawSettings {
            format: Some(Format::Json),
            lint: RawLintConfig {
                max_depth: Some(4),
                ..RawLintConfig::default()
            },
            ..RawSettings::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.format, Some(Format::Json));
        assert_eq!(result.lint.empty_sections, EmptySectionPolicy::Deny);
        assert_eq!(result.lint.path_pattern.as_deref(), Some("^/"));
        assert_eq!(result.lint.max_depth, Some(4));
    }

    #[test]
    fn given_tilde_in_docs_root_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            links: LinksConfig {
                docs_root: Some(PathBuf::from("~/docs")),
                ..LinksConfig::default()
            },
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let root = settings.links.docs_root.unwrap();
        assert!(root.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_empty_section_policy_when_parsing_toml_then_lowercase_names() {
        let raw: RawSettings = toml::from_str("[lint]\nempty_sections = \"deny\"\n").unwrap();
        assert_eq!(raw.lint.empty_sections, Some(EmptySectionPolicy::Deny));
    }

    #[test]
    fn given_template_when_parsed_then_valid_toml() {
        let raw: Result<RawSettings, _> = toml::from_str(&Settings::template());
        assert!(raw.is_ok());
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_sections() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("[lint]"));
        assert!(text.contains("[links]"));
    }
}
