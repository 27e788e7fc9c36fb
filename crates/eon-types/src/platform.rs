//! Platform state singleton and changelog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// A growth percentage, always within `0..=100`.
///
/// Construction and deserialization both clamp, so an out-of-range value
/// can never be observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GrowthLevel(u8);

impl GrowthLevel {
    /// The fully grown level.
    pub const MAX: Self = Self(100);

    /// The starting level.
    pub const ZERO: Self = Self(0);

    /// Create a level, clamping to 100.
    pub const fn new(percent: u8) -> Self {
        if percent > Self::MAX.0 {
            Self::MAX
        } else {
            Self(percent)
        }
    }

    /// The percentage value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the platform has fully grown.
    pub const fn is_max(self) -> bool {
        self.0 >= Self::MAX.0
    }
}

impl<'de> Deserialize<'de> for GrowthLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

impl core::fmt::Display for GrowthLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The singleton platform state row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformState {
    /// Platform version string (e.g. `1.0.3`).
    pub version: String,
    /// Number of interactions recorded so far. Never decreases.
    pub total_interactions: u64,
    /// Growth derived from `total_interactions`.
    pub growth_level: GrowthLevel,
    /// When the row was last written.
    pub last_updated: DateTime<Utc>,
}

impl PlatformState {
    /// A fresh state with no interactions.
    pub fn initial(version: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            total_interactions: 0,
            growth_level: GrowthLevel::ZERO,
            last_updated: now,
        }
    }
}

/// What caused a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ChangeTrigger {
    /// Seeded by the platform itself.
    System,
    /// Written when growth crossed a milestone.
    Growth,
}

impl ChangeTrigger {
    /// The lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Growth => "growth",
        }
    }
}

/// One entry of the platform changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChangelogEntry {
    /// Entry identifier.
    pub id: String,
    /// Human-readable message.
    pub message: String,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// What caused it.
    pub triggered_by: ChangeTrigger,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn growth_level_clamps_on_construction() {
        assert_eq!(GrowthLevel::new(42).value(), 42);
        assert_eq!(GrowthLevel::new(250), GrowthLevel::MAX);
        assert!(GrowthLevel::new(100).is_max());
    }

    #[test]
    fn growth_level_clamps_on_deserialize() {
        let level: GrowthLevel = serde_json::from_str("180").unwrap();
        assert_eq!(level, GrowthLevel::MAX);
    }

    #[test]
    fn changelog_entry_uses_camel_case() {
        let entry = ChangelogEntry {
            id: String::from("1"),
            message: String::from("hello"),
            timestamp: Utc::now(),
            triggered_by: ChangeTrigger::System,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["triggeredBy"], "system");
    }
}
