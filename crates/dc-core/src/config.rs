//! Configuration discovery and parsing.
//!
//! The config is looked up from the working directory upwards, first in a
//! `package.json` `damaged-captain` key, then in the rc / YAML files listed
//! in [`CONFIG_FILE_NAMES`]. Relative paths in the config resolve against
//! the directory that holds it.

use crate::env::{Credential, Environment};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database identifier meaning "no database configured"
pub const UNDEFINED_DATABASE: &str = "$";

/// Key holding the config inside `package.json`
pub const PACKAGE_JSON_KEY: &str = "damaged-captain";

/// Config file names looked up in each directory, after `package.json`
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".damaged-captainrc",
    ".damaged-captainrc.json",
    ".damaged-captainrc.yaml",
    ".damaged-captainrc.yml",
    "damaged-captain.yml",
    "damaged-captain.yaml",
];

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Database client executable
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments passed to the client before the database name
    #[serde(default)]
    pub args: Vec<String>,

    /// Target database identifier (`$` means unset)
    #[serde(default = "default_database")]
    pub database: String,

    /// Migration root directory
    #[serde(default = "default_migration_dir")]
    pub migration_dir: String,

    /// Optional dotenv file supplying placeholder values
    #[serde(default)]
    pub env: Option<String>,

    /// Env file key holding the client credential
    #[serde(default)]
    pub password_from_env: Option<String>,

    /// Environment variable the credential is passed to the client as
    #[serde(default)]
    pub password_to_env: Option<String>,

    /// Output path for generated types
    #[serde(default)]
    pub output_types: Option<String>,

    /// Prefix prepended to generated type names
    #[serde(default)]
    pub output_interface_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            database: default_database(),
            migration_dir: default_migration_dir(),
            env: None,
            password_from_env: None,
            password_to_env: None,
            output_types: None,
            output_interface_prefix: None,
        }
    }
}

fn default_command() -> String {
    "mysql".to_string()
}

fn default_database() -> String {
    UNDEFINED_DATABASE.to_string()
}

fn default_migration_dir() -> String {
    "migrations".to_string()
}

impl Config {
    /// Parse a config from file contents. `path` is used for format
    /// detection and error messages.
    pub fn parse(path: &Path, content: &str) -> CoreResult<Self> {
        let parse_error = |message: String| CoreError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        let config: Config = if path.file_name().is_some_and(|n| n == "package.json") {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            let section = value
                .get(PACKAGE_JSON_KEY)
                .cloned()
                .ok_or_else(|| parse_error(format!("missing '{PACKAGE_JSON_KEY}' key")))?;
            serde_json::from_value(section).map_err(|e| parse_error(e.to_string()))?
        } else if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.command.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "command cannot be empty".to_string(),
            });
        }
        if self.migration_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrationDir cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The configured database, or [`CoreError::DatabaseNotSet`].
    pub fn database(&self) -> CoreResult<&str> {
        let database = self.database.trim();
        if database.is_empty() || database == UNDEFINED_DATABASE {
            Err(CoreError::DatabaseNotSet)
        } else {
            Ok(database)
        }
    }
}

/// Whether a `package.json` carries a damaged-captain section.
fn package_json_has_config(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
        .is_some_and(|value| value.get(PACKAGE_JSON_KEY).is_some())
}

/// Find the config file closest to `start`, walking up to the filesystem root.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let package_json = dir.join("package.json");
        if package_json.is_file() && package_json_has_config(&package_json) {
            return Some(package_json);
        }
        if let Some(found) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
        {
            return Some(found);
        }
    }
    None
}

/// A loaded config together with the directory it was found in.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing the config file; relative paths resolve here
    pub root: PathBuf,

    /// Path of the config file
    pub config_path: PathBuf,

    /// Parsed configuration
    pub config: Config,
}

impl Project {
    /// Load the config at an explicit path
    pub fn load(config_path: &Path) -> CoreResult<Self> {
        let config_path = if config_path.is_absolute() {
            config_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(config_path)
        };
        let config = Config::load(&config_path)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        log::debug!("Using config {}", config_path.display());
        Ok(Self {
            root,
            config_path,
            config,
        })
    }

    /// Search upwards from `start` for a config file and load it
    pub fn discover(start: &Path) -> CoreResult<Self> {
        match find_config_file(start) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: format!(
                    "{} (searched upwards for package.json or {})",
                    start.display(),
                    CONFIG_FILE_NAMES.join(", ")
                ),
            }),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute migration root
    pub fn migration_dir(&self) -> PathBuf {
        self.resolve(&self.config.migration_dir)
    }

    /// Absolute env file path, if configured
    pub fn env_path(&self) -> Option<PathBuf> {
        self.config.env.as_deref().map(|p| self.resolve(p))
    }

    /// Absolute generated-types output path, if configured
    pub fn output_types_path(&self) -> Option<PathBuf> {
        self.config.output_types.as_deref().map(|p| self.resolve(p))
    }

    /// Load the environment map from the configured env file
    pub fn environment(&self) -> CoreResult<Environment> {
        Environment::load_optional(self.env_path().as_deref())
    }

    /// Resolve the credential to inject into the client process
    pub fn credential(&self, env: &Environment) -> CoreResult<Option<Credential>> {
        env.credential(
            self.config.password_from_env.as_deref(),
            self.config.password_to_env.as_deref(),
        )
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
