//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{PstError, Result};

/// Full paperstat configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub device: DeviceConfig,
    pub commands: CommandsConfig,
    pub network: NetworkConfig,
    pub preview: PreviewConfig,
}

/// Which backend a process uses. Resolved exactly once at startup and passed
/// explicitly into the collector and display backend constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Physical e-paper panel, live telemetry commands.
    Real,
    /// File preview, fixed sample telemetry text.
    Mock,
}

impl BackendMode {
    /// Pure function of the reported host name: exactly one configured name
    /// yields `Real`, every other value yields `Mock`.
    #[must_use]
    pub fn resolve(hostname: &str, device: &DeviceConfig) -> Self {
        if hostname == device.real_hostname {
            Self::Real
        } else {
            Self::Mock
        }
    }
}

/// Identity of the panel-equipped host and its wireless interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Lower-cased host name that selects the real backend.
    pub real_hostname: String,
    /// Interface passed to the wireless status command.
    pub wireless_interface: String,
}

/// External telemetry commands and pseudo-file paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandsConfig {
    pub thermal: String,
    pub memory: String,
    pub disk: String,
    /// Interface name is appended at invocation time.
    pub wireless: String,
    pub uptime_path: PathBuf,
}

/// Outbound-address discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address the probe socket "connects" to. No datagram is ever sent.
    pub probe_addr: String,
}

/// Mock-backend preview output and viewer refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewConfig {
    pub image_path: PathBuf,
    /// Command that terminates any previous viewer process.
    pub viewer_kill: String,
    /// Command that opens a viewer; the image path is appended.
    pub viewer_open: String,
    /// Pause between kill, open, and the preceding file write.
    pub step_delay_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            real_hostname: "pion".to_string(),
            wireless_interface: "wlan0".to_string(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            thermal: "/usr/bin/vcgencmd measure_temp".to_string(),
            memory: "free".to_string(),
            disk: "df -k".to_string(),
            wireless: "/usr/sbin/iwconfig".to_string(),
            uptime_path: PathBuf::from("/proc/uptime"),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_addr: "8.8.8.8:80".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("paperstat.png"),
            viewer_kill: "killall Preview".to_string(),
            viewer_open: "open -g".to_string(),
            step_delay_ms: 500,
        }
    }
}

impl Config {
    /// Default configuration path (`~/.config/paperstat/config.toml`).
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[PST-CONFIG] WARNING: HOME not set, falling back to /tmp");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        home_dir
            .join(".config")
            .join("paperstat")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path;
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = env::var_os("PAPERSTAT_CONFIG").map(PathBuf::from);
        Self::load_with_env(path, env_path)
    }

    /// A path named via `PAPERSTAT_CONFIG` is as explicit as `--config`: a
    /// typo'd env var fails loudly instead of silently using defaults.
    fn load_with_env(path: Option<&Path>, env_path: Option<PathBuf>) -> Result<Self> {
        let is_explicit_path = path.is_some() || env_path.is_some();
        let path_buf = path
            .map(Path::to_path_buf)
            .or(env_path)
            .unwrap_or_else(Self::default_path);

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| PstError::Io {
                path: path_buf.clone(),
                source,
            })?;
            toml::from_str::<Self>(&raw)?
        } else if is_explicit_path {
            return Err(PstError::InvalidConfig {
                details: format!("config file not found: {}", path_buf.display()),
            });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = env::var("PAPERSTAT_REAL_HOSTNAME") {
            self.device.real_hostname = name;
        }
        if let Ok(iface) = env::var("PAPERSTAT_INTERFACE") {
            self.device.wireless_interface = iface;
        }
        if let Ok(path) = env::var("PAPERSTAT_PREVIEW_PATH") {
            self.preview.image_path = PathBuf::from(path);
        }
    }

    /// Reject values that would break collection or presentation later.
    pub fn validate(&self) -> Result<()> {
        if self.device.real_hostname.is_empty() {
            return Err(PstError::InvalidConfig {
                details: "device.real_hostname must not be empty".to_string(),
            });
        }
        if self.device.wireless_interface.is_empty() {
            return Err(PstError::InvalidConfig {
                details: "device.wireless_interface must not be empty".to_string(),
            });
        }
        if self.network.probe_addr.parse::<SocketAddr>().is_err() {
            return Err(PstError::InvalidConfig {
                details: format!(
                    "network.probe_addr is not a socket address: {}",
                    self.network.probe_addr
                ),
            });
        }
        for (name, cmd) in [
            ("commands.thermal", &self.commands.thermal),
            ("commands.memory", &self.commands.memory),
            ("commands.disk", &self.commands.disk),
            ("commands.wireless", &self.commands.wireless),
        ] {
            if cmd.trim().is_empty() {
                return Err(PstError::InvalidConfig {
                    details: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }

    /// Effective config rendered back as TOML (for `paperstat config`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| PstError::ConfigParse {
            context: "toml",
            details: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().expect("default config should validate");
        assert_eq!(cfg.device.real_hostname, "pion");
        assert_eq!(cfg.device.wireless_interface, "wlan0");
        assert_eq!(cfg.preview.step_delay_ms, 500);
    }

    #[test]
    fn mode_resolution_is_pure_over_hostname() {
        let device = DeviceConfig::default();
        assert_eq!(BackendMode::resolve("pion", &device), BackendMode::Real);
        assert_eq!(BackendMode::resolve("muon", &device), BackendMode::Mock);
        assert_eq!(BackendMode::resolve("", &device), BackendMode::Mock);
        // Resolution is case-sensitive; the collector lower-cases first.
        assert_eq!(BackendMode::resolve("PION", &device), BackendMode::Mock);
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let cfg: Config = toml::from_str(
            "[device]\n\
             real_hostname = \"kaon\"\n",
        )
        .expect("partial config should parse");
        assert_eq!(cfg.device.real_hostname, "kaon");
        assert_eq!(cfg.commands.disk, "df -k");
        assert_eq!(cfg.network.probe_addr, "8.8.8.8:80");
    }

    #[test]
    fn rejects_bad_probe_addr() {
        let mut cfg = Config::default();
        cfg.network.probe_addr = "not-an-addr".to_string();
        let err = cfg.validate().expect_err("bad probe addr should fail");
        assert_eq!(err.code(), "PST-1001");
    }

    #[test]
    fn rejects_empty_command() {
        let mut cfg = Config::default();
        cfg.commands.memory = "  ".to_string();
        let err = cfg.validate().expect_err("empty command should fail");
        assert!(err.to_string().contains("commands.memory"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/paperstat.toml")))
            .expect_err("explicit missing path should fail");
        assert_eq!(err.code(), "PST-1001");
    }

    #[test]
    fn env_missing_path_is_an_error() {
        let err =
            Config::load_with_env(None, Some(PathBuf::from("/nonexistent/paperstat.toml")))
                .expect_err("missing env-named path should fail");
        assert_eq!(err.code(), "PST-1001");
    }

    #[test]
    fn env_path_loads_named_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[device]\nreal_hostname = \"kaon\"\n").expect("write config");

        let cfg = Config::load_with_env(None, Some(path)).expect("env-named config loads");
        assert_eq!(cfg.device.real_hostname, "kaon");
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config::default();
        let rendered = cfg.to_toml().expect("should render");
        let parsed: Config = toml::from_str(&rendered).expect("should re-parse");
        assert_eq!(cfg, parsed);
    }
}
