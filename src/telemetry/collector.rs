//! One synchronous collection cycle: every dimension read, parsed, and
//! formatted into display-ready strings.

#![allow(missing_docs)]

use std::net::{IpAddr, UdpSocket};

use serde::Serialize;

use crate::core::config::{BackendMode, Config};
use crate::core::errors::{PstError, Result};
use crate::telemetry::parsers;
use crate::telemetry::source::SourceSet;

/// Lower-cased OS-reported host name.
///
/// Used both for the hostname field and for backend-mode resolution, so it
/// lives outside the collector.
pub fn reported_hostname() -> Result<String> {
    let name = hostname::get().map_err(|err| PstError::Runtime {
        details: format!("hostname lookup failed: {err}"),
    })?;
    Ok(name.to_string_lossy().to_lowercase())
}

/// Display-ready values for one collection cycle.
///
/// Every field is always a string; parse failures surface as sentinel text,
/// never as an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readings {
    pub hostname: String,
    pub ip: String,
    pub wifi: String,
    pub time: String,
    pub memory: String,
    pub disk: String,
    pub temperature: String,
    pub uptime: String,
}

/// Telemetry collector: owns the per-dimension sources plus the probe
/// address used for outbound-interface discovery.
#[derive(Debug, Clone)]
pub struct Collector {
    sources: SourceSet,
    probe_addr: String,
}

impl Collector {
    /// Build a collector for the resolved backend mode.
    #[must_use]
    pub fn new(mode: BackendMode, config: &Config) -> Self {
        Self {
            sources: SourceSet::for_mode(mode, config),
            probe_addr: config.network.probe_addr.clone(),
        }
    }

    /// Collector over explicit sources (fixture injection for tests).
    #[must_use]
    pub fn with_sources(sources: SourceSet, probe_addr: impl Into<String>) -> Self {
        Self {
            sources,
            probe_addr: probe_addr.into(),
        }
    }

    /// Local address of the outbound interface, discovered by "connecting" a
    /// datagram socket to the probe address. No datagram is ever sent.
    ///
    /// Socket errors are recovered locally as an inline message in place of
    /// the address.
    #[must_use]
    pub fn ip_address(&self) -> String {
        match self.probe_local_addr() {
            Ok(addr) => addr.to_string(),
            Err(err) => format!("Error: {err}"),
        }
    }

    fn probe_local_addr(&self) -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect(self.probe_addr.as_str())?;
        Ok(socket.local_addr()?.ip())
    }

    pub fn temperature(&self) -> Result<String> {
        Ok(parsers::parse_temperature(&self.sources.thermal.read()?).into_display())
    }

    pub fn memory(&self) -> Result<String> {
        Ok(parsers::parse_memory(&self.sources.memory.read()?).into_display())
    }

    pub fn uptime(&self) -> Result<String> {
        Ok(parsers::parse_uptime(&self.sources.uptime.read()?).into_display())
    }

    pub fn wifi(&self) -> Result<String> {
        Ok(parsers::parse_wifi(&self.sources.wireless.read()?).into_display())
    }

    /// Unlike the other dimensions this propagates failure: not exactly one
    /// root mount in the listing is a fatal configuration error.
    pub fn disk(&self) -> Result<String> {
        parsers::parse_disk(&self.sources.disk.read()?)
    }

    /// Local wall-clock time, minute resolution.
    #[must_use]
    pub fn local_time(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    }

    /// Run the full cycle. Strictly sequential; each source blocks until its
    /// command or query returns.
    pub fn collect(&self) -> Result<Readings> {
        Ok(Readings {
            hostname: reported_hostname()?,
            ip: self.ip_address(),
            wifi: self.wifi()?,
            time: self.local_time(),
            memory: self.memory()?,
            disk: self.disk()?,
            temperature: self.temperature()?,
            uptime: self.uptime()?,
        })
    }
}
