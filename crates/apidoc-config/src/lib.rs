//! Configuration management for apidoc.
//!
//! Parses `apidoc.toml` with serde and provides auto-discovery of the config
//! file in parent directories. Relative resource and template paths are
//! resolved against the directory holding the config file.
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` and `${VAR:-default}`:
//!
//! - every string nested in `[variables]`
//! - `settings.external_docs_url`

mod expand;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "apidoc.toml";

/// Substitution placeholder inside output filename patterns.
pub const PLACEHOLDER: &str = "%s";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the progress bar setting.
    pub progressbar: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Resource mirrors: source directory (relative to config) -> destination subdirectory.
    resources: BTreeMap<String, String>,
    /// Output filename patterns per page kind.
    pub filenames: Filenames,
    /// Template paths as written in TOML.
    templates: TemplatesRaw,
    /// Values injected verbatim into every page context.
    pub variables: BTreeMap<String, serde_json::Value>,

    /// Resolved resource mirrors (set after loading).
    #[serde(skip)]
    pub resources_resolved: Vec<ResourceMapping>,
    /// Resolved template paths (set after loading).
    #[serde(skip)]
    pub templates_resolved: Templates,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// General settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw a progress bar while generating.
    pub progressbar: bool,
    /// Base URL for documentation of built-in types.
    pub external_docs_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            progressbar: true,
            external_docs_url: "http://php.net/manual/".to_owned(),
        }
    }
}

/// Page kinds that have a configurable output filename pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Namespace,
    Package,
    Class,
    Source,
}

impl FileKind {
    pub const ALL: [Self; 4] = [Self::Namespace, Self::Package, Self::Class, Self::Source];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Package => "package",
            Self::Class => "class",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output filename patterns, each containing one [`PLACEHOLDER`].
///
/// Defaults apply only when the `[filenames]` table is absent. Inside the
/// table a missing pattern stays missing, which is an error once a link of
/// that kind is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct Filenames {
    pub namespace: Option<String>,
    pub package: Option<String>,
    pub class: Option<String>,
    pub source: Option<String>,
}

impl Default for Filenames {
    fn default() -> Self {
        Self {
            namespace: Some("namespace-%s.html".to_owned()),
            package: Some("package-%s.html".to_owned()),
            class: Some("class-%s.html".to_owned()),
            source: Some("source-%s.html".to_owned()),
        }
    }
}

impl Filenames {
    /// Pattern configured for `kind`.
    #[must_use]
    pub fn get(&self, kind: FileKind) -> Option<&str> {
        match kind {
            FileKind::Namespace => self.namespace.as_deref(),
            FileKind::Package => self.package.as_deref(),
            FileKind::Class => self.class.as_deref(),
            FileKind::Source => self.source.as_deref(),
        }
    }

    /// All configured patterns in a fixed kind order.
    pub fn patterns(&self) -> impl Iterator<Item = (FileKind, &str)> {
        FileKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|pattern| (kind, pattern)))
    }
}

/// Template paths as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplatesRaw {
    common: BTreeMap<String, String>,
    namespace: Option<String>,
    package: Option<String>,
    class: Option<String>,
    source: Option<String>,
}

/// Resolved template paths.
#[derive(Debug, Default, Clone)]
pub struct Templates {
    /// Fixed pages rendered once: destination name -> template.
    pub common: BTreeMap<String, PathBuf>,
    pub namespace: PathBuf,
    pub package: PathBuf,
    pub class: PathBuf,
    pub source: PathBuf,
}

/// A directory copied verbatim into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMapping {
    /// Absolute source directory.
    pub source: PathBuf,
    /// Destination subdirectory, relative to the output directory.
    pub destination: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`variables.title`").
        field: String,
        /// Error message (e.g., "${`RELEASE`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `apidoc.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration text, resolving relative paths against `base`.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(progressbar) = settings.progressbar {
            self.settings.progressbar = progressbar;
        }
    }

    /// Directory that relative paths were resolved against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            settings: Settings::default(),
            resources: BTreeMap::new(),
            filenames: Filenames::default(),
            templates: TemplatesRaw::default(),
            variables: BTreeMap::new(),
            resources_resolved: Vec::new(),
            templates_resolved: Templates::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a filename pattern does not hold
    /// exactly one placeholder or a resource destination escapes the output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_filenames()?;
        self.validate_resources()?;
        Ok(())
    }

    fn validate_filenames(&self) -> Result<(), ConfigError> {
        for (kind, pattern) in self.filenames.patterns() {
            let count = pattern.matches(PLACEHOLDER).count();
            if count != 1 {
                return Err(ConfigError::Validation(format!(
                    "filenames.{kind} must contain exactly one {PLACEHOLDER} placeholder, found {count}"
                )));
            }
        }
        Ok(())
    }

    fn validate_resources(&self) -> Result<(), ConfigError> {
        for mapping in &self.resources_resolved {
            let dest = Path::new(&mapping.destination);
            let escapes = dest.is_absolute()
                || dest
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir));
            if mapping.destination.is_empty() || escapes {
                return Err(ConfigError::Validation(format!(
                    "resources destination '{}' must be a relative subdirectory",
                    mapping.destination
                )));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.settings.external_docs_url = expand::expand_env(
            &self.settings.external_docs_url,
            "settings.external_docs_url",
        )?;
        for (key, value) in &mut self.variables {
            expand::expand_value(value, &format!("variables.{key}"))?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.resources_resolved = self
            .resources
            .iter()
            .map(|(source, destination)| ResourceMapping {
                source: config_dir.join(source),
                destination: destination.trim_matches('/').to_owned(),
            })
            .collect();

        self.templates_resolved = Templates {
            common: self
                .templates
                .common
                .iter()
                .map(|(dest, template)| (dest.clone(), config_dir.join(template)))
                .collect(),
            namespace: resolve(self.templates.namespace.as_deref(), "templates/namespace.html"),
            package: resolve(self.templates.package.as_deref(), "templates/package.html"),
            class: resolve(self.templates.class.as_deref(), "templates/class.html"),
            source: resolve(self.templates.source.as_deref(), "templates/source.html"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.settings.progressbar);
        assert_eq!(config.settings.external_docs_url, "http://php.net/manual/");
        assert_eq!(
            config.filenames.get(FileKind::Class),
            Some("class-%s.html")
        );
        assert_eq!(
            config.templates_resolved.namespace,
            PathBuf::from("/test/templates/namespace.html")
        );
        assert!(config.templates_resolved.common.is_empty());
        assert!(config.resources_resolved.is_empty());
        assert!(config.variables.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("", Path::new("/project")).unwrap();
        assert_eq!(config.filenames.get(FileKind::Source), Some("source-%s.html"));
        assert!(config.settings.progressbar);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[settings]
progressbar = false

[resources]
"theme/resources" = "resources/"

[filenames]
namespace = "ns-%s.html"
class = "api/%s.html"

[templates]
class = "theme/class.html"

[templates.common]
"index.html" = "theme/overview.html"
"elements.js" = "theme/elements.js"

[variables]
title = "My API"
year = 2011
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert!(!config.settings.progressbar);
        assert_eq!(
            config.resources_resolved,
            vec![ResourceMapping {
                source: PathBuf::from("/project/theme/resources"),
                destination: "resources".to_owned(),
            }]
        );
        assert_eq!(config.filenames.get(FileKind::Namespace), Some("ns-%s.html"));
        assert_eq!(config.filenames.get(FileKind::Class), Some("api/%s.html"));
        // An explicit [filenames] table replaces the defaults
        assert_eq!(config.filenames.get(FileKind::Package), None);
        assert_eq!(
            config.templates_resolved.class,
            PathBuf::from("/project/theme/class.html")
        );
        assert_eq!(
            config.templates_resolved.common.keys().collect::<Vec<_>>(),
            vec!["elements.js", "index.html"]
        );
        assert_eq!(config.variables["title"], serde_json::json!("My API"));
        assert_eq!(config.variables["year"], serde_json::json!(2011));
    }

    #[test]
    fn test_patterns_skip_missing_kinds() {
        let filenames = Filenames {
            namespace: None,
            package: Some("p-%s.html".to_owned()),
            class: None,
            source: Some("s-%s.html".to_owned()),
        };
        let kinds: Vec<_> = filenames.patterns().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![FileKind::Package, FileKind::Source]);
    }

    #[test]
    fn test_validate_rejects_pattern_without_placeholder() {
        let toml = r#"
[filenames]
class = "classes.html"
"#;
        let err = Config::from_toml(toml, Path::new("/p")).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("filenames.class"));
    }

    #[test]
    fn test_validate_rejects_pattern_with_two_placeholders() {
        let toml = r#"
[filenames]
source = "%s/%s.html"
"#;
        let err = Config::from_toml(toml, Path::new("/p")).unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_validate_rejects_escaping_resource_destination() {
        let toml = r#"
[resources]
"assets" = "../outside"
"#;
        let err = Config::from_toml(toml, Path::new("/p")).unwrap_err();
        assert!(err.to_string().contains("../outside"));
    }

    #[test]
    fn test_expand_env_in_variables() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("APIDOC_CONFIG_RELEASE", "2.0");
        }
        let toml = r#"
[variables]
release = "v${APIDOC_CONFIG_RELEASE}"
"#;
        let config = Config::from_toml(toml, Path::new("/p")).unwrap();
        assert_eq!(config.variables["release"], serde_json::json!("v2.0"));
        unsafe {
            std::env::remove_var("APIDOC_CONFIG_RELEASE");
        }
    }

    #[test]
    fn test_expand_env_missing_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("APIDOC_CONFIG_MISSING");
        }
        let toml = r#"
[settings]
external_docs_url = "${APIDOC_CONFIG_MISSING}"
"#;
        let err = Config::from_toml(toml, Path::new("/p")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("settings.external_docs_url"));
    }

    #[test]
    fn test_apply_cli_settings_progressbar() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            progressbar: Some(false),
        });
        assert!(!config.settings.progressbar);

        config.apply_cli_settings(&CliSettings::default());
        assert!(!config.settings.progressbar);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/apidoc.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_sets_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apidoc.toml");
        std::fs::write(&path, "[templates]\nsource = \"tpl/source.html\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(config.base_dir(), dir.path());
        assert_eq!(config.templates_resolved.source, dir.path().join("tpl/source.html"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_file_kind_display() {
        assert_eq!(FileKind::Namespace.to_string(), "namespace");
        assert_eq!(FileKind::Source.to_string(), "source");
    }
}
