//! Per-dimension field parsers: fixed patterns over raw command output,
//! with an explicit typed outcome so each can be unit-tested against
//! literal sample strings without invoking any external command.
//!
//! Every parser is total over its input except [`parse_disk`], whose
//! single-root-mount assumption is a hard precondition.

#![allow(missing_docs)]

use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{PstError, Result};

/// Sentinel shown when the thermal pattern does not match.
pub const NO_TEMP: &str = "NO TEMP";
/// Sentinel shown when the memory pattern does not match.
pub const NO_MEM: &str = "NO MEM";
/// Sentinel shown when the uptime pattern does not match.
pub const NO_UPTIME: &str = "NO UPTIME";
/// Sentinel shown when the wireless pattern does not match.
pub const NO_WIFI: &str = "NO WIFI";

/// Core count assumed by the active-percent formula.
// TODO: read the real count from /proc/cpuinfo; the baked-in 4 silently
// misreports activity on non-quad-core hosts.
const ASSUMED_CORE_COUNT: f64 = 4.0;

static THERMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"temp=(\d+\.\d+)'C").expect("literal pattern"));
static MEMORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mem:\s+(\d+)\s+(\d+)").expect("literal pattern"));
static UPTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)\s+(\d+\.\d+)").expect("literal pattern"));
static WIRELESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Link Quality=(\d+)/(\d+).+Signal level=(-\d+) dBm").expect("literal pattern")
});

/// Outcome of matching one fixed pattern against raw text.
///
/// A mismatch is recovered locally as a sentinel display string, never an
/// error, so the renderer needs no null handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Pattern matched; display-ready value.
    Value(String),
    /// Pattern did not match; fixed `NO <DIMENSION>` text.
    Sentinel(&'static str),
}

impl Extraction {
    /// The string that lands on the canvas either way.
    #[must_use]
    pub fn into_display(self) -> String {
        match self {
            Self::Value(value) => value,
            Self::Sentinel(text) => text.to_string(),
        }
    }

    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }
}

/// `temp=<float>'C` → `"<float> C"`.
#[must_use]
pub fn parse_temperature(raw: &str) -> Extraction {
    match THERMAL_RE.captures(raw) {
        Some(caps) => Extraction::Value(format!("{} C", &caps[1])),
        None => Extraction::Sentinel(NO_TEMP),
    }
}

/// `Mem: <total> <used> ...` → `"<floor(used/total*100)>%"`.
#[must_use]
pub fn parse_memory(raw: &str) -> Extraction {
    let Some(caps) = MEMORY_RE.captures(raw) else {
        return Extraction::Sentinel(NO_MEM);
    };
    let (Ok(total), Ok(used)) = (caps[1].parse::<u64>(), caps[2].parse::<u64>()) else {
        return Extraction::Sentinel(NO_MEM);
    };
    if total == 0 {
        return Extraction::Sentinel(NO_MEM);
    }
    Extraction::Value(format!("{}%", used * 100 / total))
}

/// `<total_secs> <idle_core_secs>` → `"<days>d, active <pct>%"`, both to
/// two decimal places.
#[must_use]
pub fn parse_uptime(raw: &str) -> Extraction {
    let Some(caps) = UPTIME_RE.captures(raw) else {
        return Extraction::Sentinel(NO_UPTIME);
    };
    let (Ok(total_seconds), Ok(idle_cores)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>())
    else {
        return Extraction::Sentinel(NO_UPTIME);
    };
    if total_seconds == 0.0 {
        return Extraction::Sentinel(NO_UPTIME);
    }
    let up_days = total_seconds / 86_400.0;
    let active_percent = (1.0 - idle_cores / (ASSUMED_CORE_COUNT * total_seconds)) * 100.0;
    Extraction::Value(format!("{up_days:.2}d, active {active_percent:.2}%"))
}

/// `Link Quality=<a>/<b> ... Signal level=<neg> dBm` → `"<a>/<b> <neg> dBm"`.
#[must_use]
pub fn parse_wifi(raw: &str) -> Extraction {
    match WIRELESS_RE.captures(raw) {
        Some(caps) => Extraction::Value(format!("{}/{} {} dBm", &caps[1], &caps[2], &caps[3])),
        None => Extraction::Sentinel(NO_WIFI),
    }
}

/// Select the single `df -k` line mounted at `/` and condense it to
/// `"<used>G/<total>G <percent>"` (kilobyte columns, integer-truncated
/// division by 1,000,000).
///
/// Zero or multiple root-mount lines is a configuration fault, not a soft
/// miss: the run aborts rather than rendering a guess.
pub fn parse_disk(raw: &str) -> Result<String> {
    let root_lines: Vec<&str> = raw
        .lines()
        .filter(|line| line.split_whitespace().next_back() == Some("/"))
        .collect();
    let [line] = root_lines[..] else {
        return Err(PstError::DiskLayout {
            matches: root_lines.len(),
        });
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [_device, total_kb, used_kb, _avail_kb, percent, _mount, ..] = fields[..] else {
        return Err(PstError::Runtime {
            details: format!("malformed disk listing line: {line}"),
        });
    };
    let total = parse_kb_column(total_kb, line)?;
    let used = parse_kb_column(used_kb, line)?;
    Ok(format!(
        "{}G/{}G {}",
        used / 1_000_000,
        total / 1_000_000,
        percent
    ))
}

fn parse_kb_column(column: &str, line: &str) -> Result<u64> {
    column.parse::<u64>().map_err(|err| PstError::Runtime {
        details: format!("non-numeric disk column {column:?} in line {line:?}: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::source::{
        SAMPLE_DISK, SAMPLE_MEMORY, SAMPLE_THERMAL, SAMPLE_UPTIME, SAMPLE_WIRELESS,
    };

    #[test]
    fn temperature_matches_sample() {
        assert_eq!(
            parse_temperature(SAMPLE_THERMAL),
            Extraction::Value("38.1 C".to_string())
        );
    }

    #[test]
    fn temperature_mismatch_yields_sentinel() {
        assert_eq!(parse_temperature("throttled=0x0"), Extraction::Sentinel(NO_TEMP));
        assert_eq!(parse_temperature(""), Extraction::Sentinel(NO_TEMP));
        // Integer-only reading does not match the fixed float pattern.
        assert_eq!(parse_temperature("temp=38'C"), Extraction::Sentinel(NO_TEMP));
    }

    #[test]
    fn memory_percent_is_floored() {
        // 109240 / 436980 = 24.99...% → 24%.
        assert_eq!(
            parse_memory(SAMPLE_MEMORY),
            Extraction::Value("24%".to_string())
        );
        assert_eq!(
            parse_memory("Mem:  100  99  1"),
            Extraction::Value("99%".to_string())
        );
    }

    #[test]
    fn memory_mismatch_and_zero_total_yield_sentinel() {
        assert_eq!(parse_memory("Swap: 0 0 0"), Extraction::Sentinel(NO_MEM));
        assert_eq!(parse_memory("Mem: 0 0 0"), Extraction::Sentinel(NO_MEM));
    }

    #[test]
    fn uptime_formats_days_and_active_percent() {
        // 4544.69 / 86400 = 0.0526d; (1 - 18031.09/(4*4544.69))*100 = 0.81%.
        assert_eq!(
            parse_uptime(SAMPLE_UPTIME),
            Extraction::Value("0.05d, active 0.81%".to_string())
        );
    }

    #[test]
    fn uptime_full_day_idle_free() {
        // One full day, zero idle: 1.00d, active 100.00%.
        assert_eq!(
            parse_uptime("86400.00 0.00"),
            Extraction::Value("1.00d, active 100.00%".to_string())
        );
    }

    #[test]
    fn uptime_mismatch_yields_sentinel() {
        assert_eq!(parse_uptime("not numbers"), Extraction::Sentinel(NO_UPTIME));
        assert_eq!(parse_uptime("4544 18031"), Extraction::Sentinel(NO_UPTIME));
    }

    #[test]
    fn wifi_extracts_quality_and_signal() {
        assert_eq!(
            parse_wifi(SAMPLE_WIRELESS),
            Extraction::Value("64/70 -46 dBm".to_string())
        );
    }

    #[test]
    fn wifi_mismatch_yields_sentinel() {
        assert_eq!(
            parse_wifi("wlan0: no wireless extensions"),
            Extraction::Sentinel(NO_WIFI)
        );
    }

    #[test]
    fn disk_condenses_single_root_line() {
        assert_eq!(parse_disk(SAMPLE_DISK).expect("root line"), "4G/122G 4%");
        assert_eq!(
            parse_disk("/dev/x 122364296 4306628 111824324 4% /\n").expect("root line"),
            "4G/122G 4%"
        );
    }

    #[test]
    fn disk_without_root_mount_is_fatal() {
        let err = parse_disk("tmpfs 100 1 99 1% /tmp\n").expect_err("no root line");
        assert_eq!(err.code(), "PST-2002");
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn disk_with_duplicate_root_mounts_is_fatal() {
        let raw = "/dev/a 100 1 99 1% /\n/dev/b 100 1 99 1% /\n";
        let err = parse_disk(raw).expect_err("two root lines");
        assert_eq!(err.code(), "PST-2002");
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn disk_with_garbled_numbers_is_fatal() {
        let err = parse_disk("/dev/a many 1 99 1% /\n").expect_err("bad column");
        assert_eq!(err.code(), "PST-3900");
    }

    #[test]
    fn extraction_display_conversion() {
        assert_eq!(
            Extraction::Value("24%".to_string()).into_display(),
            "24%"
        );
        assert_eq!(Extraction::Sentinel(NO_MEM).into_display(), "NO MEM");
        assert!(Extraction::Sentinel(NO_MEM).is_sentinel());
        assert!(!Extraction::Value(String::new()).is_sentinel());
    }
}
