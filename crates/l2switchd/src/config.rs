//! Configuration for l2switchd
//!
//! Settings come from an optional TOML file and are overridden by command
//! line flags. Default file location: /etc/l2switch/l2switchd.toml

use crate::error::{Result, SwitchdError};
use crate::message::MAX_TRANSPORT_INTERFACE;
use clap::Parser;
use l2switch_fdb::{SwitchConfig, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/l2switch/l2switchd.toml";

/// Transparent Ethernet learning switch
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "l2switchd")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Interfaces to switch between, numbered from 1 in the order given
    pub interfaces: Vec<String>,

    /// Address table capacity
    #[arg(short = 'c', long)]
    pub capacity: Option<usize>,

    /// Outbound queue depth in frames
    #[arg(short = 'q', long)]
    pub queue_depth: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    pub log_level: Option<String>,

    /// Configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Address table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdbConfig {
    /// Number of MAC addresses the switch remembers
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Host transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Frames that may wait for stdout before new ones are dropped
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Complete l2switchd configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchdConfig {
    /// Interface names, numbered from 1
    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub fdb: FdbConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_queue_depth() -> usize {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FdbConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SwitchdConfig {
    /// Load configuration from `path`; the file must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SwitchdError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content, path)
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SwitchdError::Io(e)),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SwitchdError::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Builds the effective configuration: file (explicit or default
    /// location), then command line overrides, then validation.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(DEFAULT_CONFIG_PATH)?,
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Overrides file settings with flags given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if !args.interfaces.is_empty() {
            self.interfaces = args.interfaces.clone();
        }
        if let Some(capacity) = args.capacity {
            self.fdb.capacity = capacity;
        }
        if let Some(queue_depth) = args.queue_depth {
            self.transport.queue_depth = queue_depth;
        }
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.interfaces.is_empty() {
            return Err(SwitchdError::Configuration(
                "at least one interface is required".to_string(),
            ));
        }

        if self.interfaces.len() > usize::from(MAX_TRANSPORT_INTERFACE) {
            return Err(SwitchdError::Configuration(format!(
                "at most {} interfaces are supported",
                MAX_TRANSPORT_INTERFACE
            )));
        }

        if self.fdb.capacity == 0 {
            return Err(SwitchdError::Configuration(
                "fdb.capacity must be > 0".to_string(),
            ));
        }

        if self.transport.queue_depth == 0 {
            return Err(SwitchdError::Configuration(
                "transport.queue_depth must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Forwarding core configuration for these settings.
    pub fn switch_config(&self) -> SwitchConfig {
        SwitchConfig::new(self.interfaces.len()).with_capacity(self.fdb.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(interfaces: &[&str]) -> Args {
        Args {
            interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = SwitchdConfig::default();
        assert!(config.interfaces.is_empty());
        assert_eq!(config.fdb.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.transport.queue_depth, 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "interfaces = [\"eth0\", \"eth1\"]\n\n[fdb]\ncapacity = 64").unwrap();

        let config = SwitchdConfig::load(file.path()).unwrap();
        assert_eq!(config.interfaces, vec!["eth0", "eth1"]);
        assert_eq!(config.fdb.capacity, 64);
        assert_eq!(config.transport.queue_depth, 1024);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fdb\ncapacity = ").unwrap();

        let err = SwitchdConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SwitchdError::Configuration(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SwitchdConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SwitchdConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SwitchdConfig::load(dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let mut config = SwitchdConfig {
            interfaces: vec!["from-file".to_string()],
            ..Default::default()
        };
        let mut overrides = args(&["eth0", "eth1", "eth2"]);
        overrides.capacity = Some(5);
        overrides.log_level = Some("debug".to_string());

        config.apply_args(&overrides);

        assert_eq!(config.interfaces, vec!["eth0", "eth1", "eth2"]);
        assert_eq!(config.fdb.capacity, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.transport.queue_depth, 1024);
    }

    #[test]
    fn test_explicit_config_flag_is_used() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "interfaces = [\"a\"]\n[transport]\nqueue_depth = 8").unwrap();

        let config = SwitchdConfig::from_args(&Args {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.interfaces, vec!["a"]);
        assert_eq!(config.transport.queue_depth, 8);
    }

    #[test]
    fn test_validate() {
        let mut config = SwitchdConfig::default();
        assert!(config.validate().is_err());

        config.interfaces = vec!["eth0".to_string()];
        assert!(config.validate().is_ok());

        config.fdb.capacity = 0;
        assert!(config.validate().is_err());
        config.fdb.capacity = 1;

        config.transport.queue_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_switch_config() {
        let mut config = SwitchdConfig::default();
        config.apply_args(&args(&["a", "b", "c", "d"]));
        let switch = config.switch_config();
        assert_eq!(switch.interface_count, 4);
        assert_eq!(switch.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_clap_parsing() {
        let args = Args::try_parse_from(["l2switchd", "-c", "32", "eth0", "eth1"]).unwrap();
        assert_eq!(args.interfaces, vec!["eth0", "eth1"]);
        assert_eq!(args.capacity, Some(32));
        assert_eq!(args.config, None);
    }
}
