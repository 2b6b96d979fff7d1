//! Runtime settings.
//!
//! The binary takes no flags. Every setting has a default matching the usual
//! development setup and can be overridden through an environment variable:
//!
//! | Variable                   | Default            |
//! |----------------------------|--------------------|
//! | `CORS_SERVER_START_PORT`   | `8000`             |
//! | `CORS_SERVER_MAX_ATTEMPTS` | `100`              |
//! | `CORS_SERVER_ROOT`         | `.`                |
//! | `CORS_SERVER_PORT_FILE`    | `<root>/.cors_port`|

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const START_PORT_VAR: &str = "CORS_SERVER_START_PORT";
pub const MAX_ATTEMPTS_VAR: &str = "CORS_SERVER_MAX_ATTEMPTS";
pub const ROOT_VAR: &str = "CORS_SERVER_ROOT";
pub const PORT_FILE_VAR: &str = "CORS_SERVER_PORT_FILE";

pub const DEFAULT_START_PORT: u16 = 8000;
pub const DEFAULT_MAX_ATTEMPTS: u16 = 100;

/// File name of the port record, read by the front-end dev tooling.
pub const PORT_FILE_NAME: &str = ".cors_port";

/// Where to serve from and how to pick a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// First port tried by the scan.
    pub start_port: u16,
    /// Number of consecutive ports tried before giving up.
    pub max_attempts: u16,
    /// Directory whose files are served.
    pub root: PathBuf,
    /// Where the chosen port is written while the server runs.
    pub port_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let root = PathBuf::from(".");
        Self {
            start_port: DEFAULT_START_PORT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            port_file: root.join(PORT_FILE_NAME),
            root,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a numeric variable is not a positive
    /// integer that fits a port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset and empty variables fall back to their defaults. When only the
    /// root is overridden, the port file follows it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let start_port = match lookup(START_PORT_VAR) {
            Some(value) => parse_positive(START_PORT_VAR, &value)?,
            None => DEFAULT_START_PORT,
        };
        let max_attempts = match lookup(MAX_ATTEMPTS_VAR) {
            Some(value) => parse_positive(MAX_ATTEMPTS_VAR, &value)?,
            None => DEFAULT_MAX_ATTEMPTS,
        };
        let root = lookup(ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let port_file = lookup(PORT_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(PORT_FILE_NAME));

        Ok(Self {
            start_port,
            max_attempts,
            root,
            port_file,
        })
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u16> {
    let invalid = |reason: String| Error::Config {
        key,
        value: value.to_string(),
        reason,
    };

    match value.trim().parse::<u16>() {
        Ok(0) => Err(invalid("must be a positive integer".to_string())),
        Ok(parsed) => Ok(parsed),
        Err(error) => Err(invalid(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.start_port, 8000);
        assert_eq!(config.max_attempts, 100);
        assert_eq!(config.port_file, PathBuf::from("./.cors_port"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = from_pairs(&[
            (START_PORT_VAR, "9000"),
            (MAX_ATTEMPTS_VAR, " 10 "),
            (ROOT_VAR, "/srv/dict"),
            (PORT_FILE_VAR, "/tmp/port"),
        ])
        .unwrap();

        assert_eq!(config.start_port, 9000);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.root, PathBuf::from("/srv/dict"));
        assert_eq!(config.port_file, PathBuf::from("/tmp/port"));
    }

    #[test]
    fn test_port_file_follows_root() {
        let config = from_pairs(&[(ROOT_VAR, "output_dictionary")]).unwrap();
        assert_eq!(
            config.port_file,
            PathBuf::from("output_dictionary").join(PORT_FILE_NAME)
        );
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = from_pairs(&[(START_PORT_VAR, ""), (ROOT_VAR, "  ")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_is_rejected() {
        let error = from_pairs(&[(MAX_ATTEMPTS_VAR, "0")]).unwrap_err();
        assert!(matches!(
            error,
            Error::Config {
                key: MAX_ATTEMPTS_VAR,
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_and_overflow_are_rejected() {
        assert!(from_pairs(&[(START_PORT_VAR, "eight thousand")]).is_err());
        assert!(from_pairs(&[(START_PORT_VAR, "70000")]).is_err());
        assert!(from_pairs(&[(START_PORT_VAR, "-1")]).is_err());
    }
}
