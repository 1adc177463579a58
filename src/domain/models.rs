use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::tiers::tier_ladder;

/// A single row on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub rank: i64,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub points: i64,
}

fn default_name() -> String {
    "Unknown".to_string()
}

/// Tier label → point value. The 10 canonical ladder labels are always
/// present after a load; stored labels outside the ladder are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierMapping {
    entries: BTreeMap<String, i64>,
}

impl Default for TierMapping {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TierMapping {
    /// Built-in mapping: every canonical label at its default point value.
    pub fn defaults() -> Self {
        let entries = tier_ladder()
            .iter()
            .map(|tier| (tier.label.to_string(), tier.default_points))
            .collect();
        Self { entries }
    }

    /// Defaults overlaid with whatever valid entries were stored. Unknown
    /// labels survive; non-integer or negative stored values are skipped.
    pub fn defaults_overlaid(stored: &BTreeMap<String, serde_json::Value>) -> Self {
        let mut mapping = Self::defaults();
        for (label, value) in stored {
            if let Some(points) = value.as_i64().filter(|points| *points >= 0) {
                mapping.entries.insert(label.clone(), points);
            }
        }
        mapping
    }

    pub fn points_for(&self, tier: &str) -> Option<i64> {
        self.entries.get(tier).copied()
    }

    pub fn set(&mut self, label: &str, points: i64) {
        self.entries.insert(label.to_string(), points);
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order: the canonical ladder from lowest to
    /// highest, then any extra stored labels alphabetically.
    pub fn iter_ladder(&self) -> Vec<(&str, i64)> {
        let mut ordered = Vec::with_capacity(self.entries.len());
        for tier in tier_ladder() {
            if let Some(points) = self.points_for(tier.label) {
                ordered.push((tier.label, points));
            }
        }
        let canonical: Vec<&str> = tier_ladder().iter().map(|t| t.label).collect();
        for (label, points) in &self.entries {
            if !canonical.contains(&label.as_str()) {
                ordered.push((label.as_str(), *points));
            }
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_cover_the_whole_ladder() {
        let mapping = TierMapping::defaults();
        assert_eq!(mapping.len(), 10);
        assert!(mapping.contains("LT5"));
        assert!(mapping.contains("HT1"));
    }

    #[test]
    fn overlay_keeps_stored_values_and_fills_gaps() {
        let mut stored = BTreeMap::new();
        stored.insert("LT5".to_string(), json!(10));
        let mapping = TierMapping::defaults_overlaid(&stored);

        assert_eq!(mapping.len(), 10);
        assert_eq!(mapping.points_for("LT5"), Some(10));
        assert_eq!(
            mapping.points_for("HT1"),
            TierMapping::defaults().points_for("HT1")
        );
    }

    #[test]
    fn overlay_preserves_unknown_labels_and_skips_invalid_values() {
        let mut stored = BTreeMap::new();
        stored.insert("Retired".to_string(), json!(7));
        stored.insert("LT4".to_string(), json!("not a number"));
        stored.insert("HT4".to_string(), json!(-3));
        let mapping = TierMapping::defaults_overlaid(&stored);

        assert_eq!(mapping.points_for("Retired"), Some(7));
        assert_eq!(
            mapping.points_for("LT4"),
            TierMapping::defaults().points_for("LT4")
        );
        assert_eq!(
            mapping.points_for("HT4"),
            TierMapping::defaults().points_for("HT4")
        );
    }

    #[test]
    fn ladder_iteration_orders_canonical_labels_lowest_first() {
        let mapping = TierMapping::defaults();
        let labels: Vec<&str> = mapping.iter_ladder().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels[0], "LT5");
        assert_eq!(labels[1], "HT5");
        assert_eq!(labels[9], "HT1");
    }

    #[test]
    fn record_deserializes_with_missing_fields_defaulted() {
        let record: PlayerRecord = serde_json::from_str(r#"{"tier":"HT2"}"#).unwrap();
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.tier, "HT2");
        assert_eq!(record.rank, 0);
        assert_eq!(record.points, 0);
    }
}
