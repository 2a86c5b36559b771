//! Bundled region table: English names and timezones per ISO region code.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Timezone reported when a number cannot be placed.
pub const UNKNOWN_TIMEZONE: &str = "Etc/Unknown";

static REGIONS: Lazy<RegionTable> =
    Lazy::new(|| RegionTable::parse(include_str!("../data/regions.tsv")));

/// The process-wide region table.
pub fn regions() -> &'static RegionTable {
    &REGIONS
}

/// Data known about one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionInfo {
    /// English short name (e.g. "United Kingdom")
    pub name: String,
    /// IANA zones in the region, most populous first
    pub timezones: Vec<String>,
}

/// Region code to [`RegionInfo`] lookup.
#[derive(Debug, Default)]
pub struct RegionTable {
    entries: HashMap<String, RegionInfo>,
}

impl RegionTable {
    /// Parse tab-separated `CODE  NAME  ZONE[,ZONE...]` lines.
    ///
    /// Blank lines and lines starting with `#` are ignored; malformed lines
    /// are skipped with a warning.
    pub fn parse(source: &str) -> Self {
        let mut entries = HashMap::new();

        for (index, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let (Some(code), Some(name), Some(zones), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                warn!(line = index + 1, "Skipping malformed region entry");
                continue;
            };

            let timezones: Vec<String> = zones
                .split(',')
                .map(str::trim)
                .filter(|zone| !zone.is_empty())
                .map(String::from)
                .collect();

            entries.insert(
                code.trim().to_ascii_uppercase(),
                RegionInfo {
                    name: name.trim().to_string(),
                    timezones,
                },
            );
        }

        debug!(regions = entries.len(), "Region table loaded");
        Self { entries }
    }

    /// Look up a region by its ISO code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&RegionInfo> {
        self.entries.get(&code.to_ascii_uppercase())
    }

    /// English name of a region.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|info| info.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
