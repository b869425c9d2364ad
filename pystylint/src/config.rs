//! Configuration loading from `.pystylint.toml` or `pyproject.toml`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file searched for first.
pub const CONFIG_FILENAME: &str = ".pystylint.toml";
/// Fallback config file, read from `[tool.pystylint]`.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Two-part dotted decorator name checked by the attrs rule when the
/// configuration does not override it.
pub const DEFAULT_ATTR_DECORATOR: &str = "attr.s";

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for pystylint.
    pub pystylint: StyleConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for pystylint.
pub struct StyleConfig {
    /// Rule codes to run; when set, only these rules are registered.
    pub select: Option<Vec<String>>,
    /// Rule codes to skip.
    pub ignore: Option<Vec<String>>,
    /// Append the offending source line to each reported violation.
    pub verbose: Option<bool>,
    /// Stop at the first violation and report only it.
    pub quiet: Option<bool>,
    /// Dotted two-part decorator name validated by rule E1005.
    pub attr_decorator: Option<String>,
}

/// Mirror of `pyproject.toml` for the `[tool.pystylint]` table.
#[derive(Debug, Deserialize, Default)]
struct PyProject {
    #[serde(default)]
    tool: PyProjectTool,
}

#[derive(Debug, Deserialize, Default)]
struct PyProjectTool {
    #[serde(default)]
    pystylint: StyleConfig,
}

impl Config {
    /// Loads configuration from default locations in the current directory.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let pystylint_toml = current.join(CONFIG_FILENAME);
            if pystylint_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pystylint_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(pystylint_toml);
                        return config;
                    }
                }
            }

            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        return Config {
                            pystylint: pyproject.tool.pystylint,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Splits the configured attrs decorator name into its two dotted parts.
    ///
    /// Falls back to the default when the configured value is not a
    /// two-part dotted name.
    #[must_use]
    pub fn attr_decorator_parts(&self) -> (String, String) {
        let configured = self
            .pystylint
            .attr_decorator
            .as_deref()
            .unwrap_or(DEFAULT_ATTR_DECORATOR);
        match configured.split_once('.') {
            Some((base, attr)) if !base.is_empty() && !attr.is_empty() && !attr.contains('.') => {
                (base.to_owned(), attr.to_owned())
            }
            _ => {
                let (base, attr) = DEFAULT_ATTR_DECORATOR
                    .split_once('.')
                    .unwrap_or(("attr", "s"));
                (base.to_owned(), attr.to_owned())
            }
        }
    }
}
