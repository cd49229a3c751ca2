//! Raw-text data sources: live shell commands, pseudo-files, or fixed
//! sample text. The parsers never know which kind produced their input,
//! so tests can inject arbitrary fixtures.

#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::core::config::{BackendMode, Config};
use crate::core::errors::{PstError, Result};

/// One telemetry dimension's raw-text provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Shell command; captured stdout is the sample. Failure is fatal.
    Command(String),
    /// Pseudo-file contents (e.g. `/proc/uptime`). Failure is fatal.
    File(PathBuf),
    /// Fixed sample text for mock runs and tests.
    Fixed(String),
}

impl TextSource {
    /// Produce the raw sample text for this dimension.
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Command(command) => run_command(command),
            Self::File(path) => fs::read_to_string(path).map_err(|source| PstError::Io {
                path: path.clone(),
                source,
            }),
            Self::Fixed(text) => Ok(text.clone()),
        }
    }
}

/// Run a command line through the shell and capture stdout.
///
/// Spawn errors and non-zero exits both propagate as fatal: a missing or
/// broken telemetry command is a configuration problem, not a soft miss.
fn run_command(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|err| PstError::CommandFailed {
            command: command.to_string(),
            details: err.to_string(),
        })?;
    if !output.status.success() {
        return Err(PstError::CommandFailed {
            command: command.to_string(),
            details: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ──────────────────── fixed sample text ────────────────────
//
// Captured from a live Raspberry Pi so mock runs and parser tests exercise
// the exact shapes the real commands emit.

pub const SAMPLE_THERMAL: &str = "temp=38.1'C";

pub const SAMPLE_MEMORY: &str = "\
               total        used        free      shared  buff/cache   available
Mem:          436980      109240      213468         948      166464      327740
Swap:         102396           0      102396
";

pub const SAMPLE_UPTIME: &str = "4544.69 18031.09\n";

pub const SAMPLE_WIRELESS: &str = "\
wlan0     IEEE 802.11  ESSID:\"CornellCroft\"
          Mode:Managed  Frequency:2.437 GHz  Access Point: F4:92:BF:7F:55:E4
          Bit Rate=72.2 Mb/s   Tx-Power=31 dBm
          Retry short limit:7   RTS thr:off   Fragment thr:off
          Power Management:on
          Link Quality=64/70  Signal level=-46 dBm
          Rx invalid nwid:0  Rx invalid crypt:0  Rx invalid frag:0
          Tx excessive retries:1  Invalid misc:0   Missed beacon:0
";

pub const SAMPLE_DISK: &str = "\
Filesystem     1K-blocks    Used Available Use% Mounted on
udev               81736       0     81736   0% /dev
tmpfs              43700     932     42768   3% /run
/dev/mmcblk0p2 122364296 4306628 111824324   4% /
tmpfs             218488       0    218488   0% /dev/shm
tmpfs               5120       8      5112   1% /run/lock
/dev/mmcblk0p1    522232   95702    426530  19% /boot/firmware
tmpfs              43696       0     43696   0% /run/user/1000
";

/// Per-dimension sources for one collection cycle.
#[derive(Debug, Clone)]
pub struct SourceSet {
    pub thermal: TextSource,
    pub memory: TextSource,
    pub uptime: TextSource,
    pub wireless: TextSource,
    pub disk: TextSource,
}

impl SourceSet {
    /// Build the source set for the resolved backend mode.
    #[must_use]
    pub fn for_mode(mode: BackendMode, config: &Config) -> Self {
        match mode {
            BackendMode::Real => Self {
                thermal: TextSource::Command(config.commands.thermal.clone()),
                memory: TextSource::Command(config.commands.memory.clone()),
                uptime: TextSource::File(config.commands.uptime_path.clone()),
                wireless: TextSource::Command(format!(
                    "{} {}",
                    config.commands.wireless, config.device.wireless_interface
                )),
                disk: TextSource::Command(config.commands.disk.clone()),
            },
            BackendMode::Mock => Self::fixed_samples(),
        }
    }

    /// All-fixed source set (mock mode and tests).
    #[must_use]
    pub fn fixed_samples() -> Self {
        Self {
            thermal: TextSource::Fixed(SAMPLE_THERMAL.to_string()),
            memory: TextSource::Fixed(SAMPLE_MEMORY.to_string()),
            uptime: TextSource::Fixed(SAMPLE_UPTIME.to_string()),
            wireless: TextSource::Fixed(SAMPLE_WIRELESS.to_string()),
            disk: TextSource::Fixed(SAMPLE_DISK.to_string()),
        }
    }
}
