//! Environment map loaded from an optional dotenv file.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder values for migration scripts, resolved once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

/// A credential to hand to the client process as an environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Variable name seen by the client process
    pub name: String,
    /// Variable value
    pub value: String,
}

impl Environment {
    /// Build an environment from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a dotenv file. The process environment is left untouched.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let env_error = |message: String| CoreError::EnvFile {
            path: path.display().to_string(),
            message,
        };

        let iter = dotenvy::from_path_iter(path).map_err(|e| env_error(e.to_string()))?;
        let mut vars = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| env_error(e.to_string()))?;
            vars.insert(key, value);
        }
        log::debug!("Loaded {} env values from {}", vars.len(), path.display());
        Ok(Self { vars })
    }

    /// Load from `path` when given, otherwise return an empty map.
    pub fn load_optional(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Resolve the credential to inject into the client process.
    ///
    /// Both names must be configured together. The source key must exist in
    /// the map.
    pub fn credential(&self, from: Option<&str>, to: Option<&str>) -> CoreResult<Option<Credential>> {
        match (from, to) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) => {
                let value = self.get(from).ok_or_else(|| CoreError::ConfigInvalid {
                    message: format!("passwordFromEnv '{from}' is not defined in the env file"),
                })?;
                Ok(Some(Credential {
                    name: to.to_string(),
                    value: value.to_string(),
                }))
            }
            _ => Err(CoreError::ConfigInvalid {
                message: "passwordFromEnv and passwordToEnv must be set together".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_env_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "DB_PASSWORD=hunter2\n# comment\nSCHEMA=app\n").unwrap();

        let env = Environment::load(&path).unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("DB_PASSWORD"), Some("hunter2"));
        assert_eq!(env.get("SCHEMA"), Some("app"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Environment::load(&dir.path().join("nope.env")).unwrap_err();
        assert!(matches!(err, CoreError::EnvFile { .. }));
    }

    #[test]
    fn test_load_optional_none_is_empty() {
        let env = Environment::load_optional(None).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn test_credential_resolution() {
        let env = Environment::from_pairs([("SECRET", "pw")]);
        let cred = env
            .credential(Some("SECRET"), Some("MYSQL_PWD"))
            .unwrap()
            .unwrap();
        assert_eq!(cred.name, "MYSQL_PWD");
        assert_eq!(cred.value, "pw");
        assert!(env.credential(None, None).unwrap().is_none());
    }

    #[test]
    fn test_credential_missing_source_key() {
        let env = Environment::default();
        let err = env
            .credential(Some("SECRET"), Some("MYSQL_PWD"))
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_credential_half_configured() {
        let env = Environment::from_pairs([("SECRET", "pw")]);
        assert!(env.credential(Some("SECRET"), None).is_err());
        assert!(env.credential(None, Some("MYSQL_PWD")).is_err());
    }
}
