//! Configuration management module.
//!
//! This module handles loading configuration from disk, including the API
//! base URL, optional access token, network limits, log level and the
//! location of the session file.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const SESSION_FILE_NAME: &str = "session.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/ghview";

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub log_level: String,
    pub session_file: Option<PathBuf>,
    pub(crate) file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub log_level: String,
    pub session_file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            log_level: "info".to_string(),
            session_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_file(ConfigFile::default(), None)
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config::default()
    }

    fn from_file(file_config: ConfigFile, file_path: Option<PathBuf>) -> Config {
        Config {
            base_url: file_config.base_url,
            access_token: file_config.access_token.filter(|t| !t.is_empty()),
            timeout_secs: file_config.timeout_secs,
            max_concurrent_requests: file_config.max_concurrent_requests,
            log_level: file_config.log_level,
            session_file: file_config.session_file,
            file_path,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place;
    /// the directory is created so the session file has somewhere to live.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        let file_config = if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            Config::parse(&contents)?
        } else {
            ConfigFile::default()
        };

        *self = Config::from_file(file_config, Some(file_path));
        if self.session_file.is_none() {
            self.session_file = Some(dir_path.join(SESSION_FILE_NAME));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_requests must be at least 1".to_string(),
            )
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()).into());
        }
        Ok(())
    }

    fn parse(contents: &str) -> Result<ConfigFile, ConfigError> {
        // An empty file is a valid, all-default configuration
        if contents.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::DeserializationFailed(e.to_string()))
    }

    /// Path of the loaded configuration file, once `load` has run.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Log level parsed from the configuration, `Info` when unrecognized.
    ///
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrent_requests, 1);
        assert_eq!(config.access_token, None);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut config = Config::new();
        config.load(nested.to_str()).unwrap();

        assert!(nested.exists());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.file_path(), Some(nested.join(FILE_NAME).as_path()));
        assert_eq!(config.session_file, Some(nested.join(SESSION_FILE_NAME)));
    }

    #[test]
    fn load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(FILE_NAME)).unwrap();
        writeln!(file, "base_url: http://localhost:9000").unwrap();
        writeln!(file, "access_token: abc123").unwrap();
        writeln!(file, "log_level: debug").unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.access_token.as_deref(), Some("abc123"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn load_explicit_session_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "session_file: /tmp/ghview-session.yml\n",
        )
        .unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/ghview-session.yml"))
        );
    }

    #[test]
    fn load_empty_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "access_token: ''\n").unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "timeout_secs: [not, a, number]\n").unwrap();

        let mut config = Config::new();
        let result = config.load(dir.path().to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::DeserializationFailed(_)))
        ));
    }

    #[test]
    fn load_rejects_zero_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "max_concurrent_requests: 0\n").unwrap();

        let mut config = Config::new();
        assert!(matches!(
            config.load(dir.path().to_str()),
            Err(AppError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn load_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "timeout_secs: 0\n").unwrap();

        let mut config = Config::new();
        assert!(matches!(
            config.load(dir.path().to_str()),
            Err(AppError::Config(ConfigError::Invalid(_)))
        ));
    }
}
