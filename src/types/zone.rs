use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ConfigError;

pub const UNKNOWN_ZONE: &str = "Unknown";

/// Heart rate the standard table's bpm labels are written against.
const REFERENCE_HR_MAX: f64 = 180.0;

/// A training zone over percent of maximum heart rate, `[lower_pct, upper_pct)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zone {
    pub label: &'static str,
    pub lower_pct: f64,
    pub upper_pct: f64,
    pub color: &'static str,
}

impl Zone {
    pub fn contains(&self, pct: f64) -> bool {
        pct >= self.lower_pct && pct < self.upper_pct
    }
}

pub const STANDARD_ZONES: [Zone; 5] = [
    Zone {
        label: "Zone 1 (<108 bpm)",
        lower_pct: 0.0,
        upper_pct: 108.0 / REFERENCE_HR_MAX * 100.0,
        color: "#9E9E9E",
    },
    Zone {
        label: "Zone 2 (108-125 bpm)",
        lower_pct: 108.0 / REFERENCE_HR_MAX * 100.0,
        upper_pct: 125.0 / REFERENCE_HR_MAX * 100.0,
        color: "#2196F3",
    },
    Zone {
        label: "Zone 3 (125-140 bpm)",
        lower_pct: 125.0 / REFERENCE_HR_MAX * 100.0,
        upper_pct: 140.0 / REFERENCE_HR_MAX * 100.0,
        color: "#4CAF50",
    },
    Zone {
        label: "Zone 4 (140-160 bpm)",
        lower_pct: 140.0 / REFERENCE_HR_MAX * 100.0,
        upper_pct: 160.0 / REFERENCE_HR_MAX * 100.0,
        color: "#FF9800",
    },
    Zone {
        label: "Zone 5 (160-180 bpm)",
        lower_pct: 160.0 / REFERENCE_HR_MAX * 100.0,
        upper_pct: 100.0,
        color: "#F44336",
    },
];

/// Ordered zones that partition `[0, 100)` with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    pub fn new(zones: Vec<Zone>) -> Result<Self, ConfigError> {
        let first = zones
            .first()
            .ok_or_else(|| ConfigError::InvalidZones("no zones".to_string()))?;
        if first.lower_pct != 0.0 {
            return Err(ConfigError::InvalidZones(format!(
                "{} starts at {}%, expected 0%",
                first.label, first.lower_pct
            )));
        }

        for zone in &zones {
            if zone.lower_pct.is_nan()
                || zone.upper_pct.is_nan()
                || zone.lower_pct >= zone.upper_pct
            {
                return Err(ConfigError::InvalidZones(format!(
                    "{} has an empty range [{}, {})",
                    zone.label, zone.lower_pct, zone.upper_pct
                )));
            }
            if zone.label == UNKNOWN_ZONE {
                return Err(ConfigError::InvalidZones(format!(
                    "label {UNKNOWN_ZONE:?} is reserved"
                )));
            }
        }

        for pair in zones.windows(2) {
            if pair[0].upper_pct != pair[1].lower_pct {
                return Err(ConfigError::InvalidZones(format!(
                    "{} ends at {}% but {} starts at {}%",
                    pair[0].label, pair[0].upper_pct, pair[1].label, pair[1].lower_pct
                )));
            }
        }

        let last = &zones[zones.len() - 1];
        if last.upper_pct != 100.0 {
            return Err(ConfigError::InvalidZones(format!(
                "{} ends at {}%, expected 100%",
                last.label, last.upper_pct
            )));
        }

        Ok(Self { zones })
    }

    pub fn standard() -> Self {
        Self {
            zones: STANDARD_ZONES.to_vec(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn find(&self, pct: f64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(pct))
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Minutes spent per zone label, in zone-table order with `Unknown` last.
/// Zones that were never observed have no entry and read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTimeTotals {
    entries: Vec<(&'static str, f64)>,
}

impl ZoneTimeTotals {
    pub(crate) fn from_entries(entries: Vec<(&'static str, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, label: &str) -> f64 {
        self.entries
            .iter()
            .find(|(entry_label, _)| *entry_label == label)
            .map(|(_, minutes)| *minutes)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(entry_label, _)| *entry_label == label)
    }

    pub fn total_minutes(&self) -> f64 {
        self.entries.iter().map(|(_, minutes)| minutes).sum()
    }

    /// Fraction of total time spent in `label`; 0 when no time elapsed at all.
    pub fn share(&self, label: &str) -> f64 {
        let total = self.total_minutes();
        if total <= f64::EPSILON {
            return 0.0;
        }
        self.get(label) / total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl Serialize for ZoneTimeTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, minutes) in &self.entries {
            map.serialize_entry(label, minutes)?;
        }
        map.end()
    }
}
