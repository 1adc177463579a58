/// Canonical tier ladder
///
/// Five base tiers, each split into a Low and a High half, ordered from
/// lowest (LT5) to highest (HT1). The board tolerates arbitrary labels on
/// individual records; this table only fixes the labels that are always
/// present in the mapping and their built-in point values.
#[derive(Debug, Clone)]
pub struct TierConfig {
    pub label: &'static str,
    pub default_points: i64,
}

impl TierConfig {
    pub fn new(label: &'static str, default_points: i64) -> Self {
        Self {
            label,
            default_points,
        }
    }
}

/// The 10 canonical tiers, lowest first
pub fn tier_ladder() -> Vec<TierConfig> {
    vec![
        TierConfig::new("LT5", 3),
        TierConfig::new("HT5", 6),
        TierConfig::new("LT4", 10),
        TierConfig::new("HT4", 16),
        TierConfig::new("LT3", 24),
        TierConfig::new("HT3", 34),
        TierConfig::new("LT2", 46),
        TierConfig::new("HT2", 60),
        TierConfig::new("LT1", 80),
        TierConfig::new("HT1", 100),
    ]
}
