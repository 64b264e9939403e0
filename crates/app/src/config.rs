use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use common::prelude::{ExternalTools, KeyEncryptor, NativeRsa, Strategy};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "santa.toml";

/// Settings read from `santa.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose entries are the participants and their private keys
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Path of the results archive
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// How pairs are assigned (greedy or cyclic)
    #[serde(default)]
    pub strategy: Strategy,
    /// Which encryptor seals the results (external or native)
    #[serde(default)]
    pub encryptor: EncryptorKind,
    /// Default log level, overridden by --log-level and RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily log files (stderr only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// External tool locations
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./in")
}

fn default_output() -> PathBuf {
    PathBuf::from("./out/results.zip")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output: default_output(),
            strategy: Strategy::default(),
            encryptor: EncryptorKind::default(),
            log_level: default_log_level(),
            log_dir: None,
            tools: ToolsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_ssh_keygen")]
    pub ssh_keygen: PathBuf,
    #[serde(default = "default_openssl")]
    pub openssl: PathBuf,
    /// Where public keys are staged for openssl (system temp dir if not set)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_ssh_keygen() -> PathBuf {
    PathBuf::from("ssh-keygen")
}

fn default_openssl() -> PathBuf {
    PathBuf::from("openssl")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ssh_keygen: default_ssh_keygen(),
            openssl: default_openssl(),
            temp_dir: None,
        }
    }
}

/// Encryptor implementation used to seal results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptorKind {
    /// `ssh-keygen` and `openssl` subprocesses
    #[default]
    External,
    /// In-process RSA
    Native,
}

impl EncryptorKind {
    pub fn build(&self, tools: &ToolsConfig) -> Box<dyn KeyEncryptor> {
        match self {
            EncryptorKind::External => {
                let mut external = ExternalTools::new()
                    .with_ssh_keygen(&tools.ssh_keygen)
                    .with_openssl(&tools.openssl);
                if let Some(dir) = &tools.temp_dir {
                    external = external.with_temp_dir(dir);
                }
                Box::new(external)
            }
            EncryptorKind::Native => Box::new(NativeRsa::new()),
        }
    }
}

impl fmt::Display for EncryptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncryptorKind::External => f.write_str("external"),
            EncryptorKind::Native => f.write_str("native"),
        }
    }
}

impl FromStr for EncryptorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "external" => Ok(EncryptorKind::External),
            "native" => Ok(EncryptorKind::Native),
            other => Err(ConfigError::UnknownEncryptor(other.to_string())),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./santa.toml` is used when
    /// present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(CONFIG_FILE_NAME);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("unknown encryptor '{0}', expected 'external' or 'native'")]
    UnknownEncryptor(String),
}
