use crate::domain::{PlayerRecord, TierMapping};

/// Example board seeded the first time the store is empty, or whenever the
/// persisted player list fails to parse.
pub fn example_players() -> Vec<PlayerRecord> {
    let mapping = TierMapping::defaults();
    let entries = [
        (1, "Marlow", "HT1"),
        (2, "Vexa", "LT1"),
        (3, "Quillon", "HT2"),
        (4, "Sable", "LT2"),
        (5, "Brandt", "HT3"),
        (6, "Ilka", "LT3"),
        (7, "Togan", "HT4"),
        (8, "Perrin", "LT5"),
    ];

    entries
        .iter()
        .map(|(rank, name, tier)| PlayerRecord {
            rank: *rank,
            name: (*name).to_string(),
            tier: (*tier).to_string(),
            points: mapping.points_for(tier).unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_records_satisfy_the_invariants() {
        let players = example_players();
        assert!(!players.is_empty());
        for player in &players {
            assert!(!player.name.is_empty());
            assert!(player.points >= 0);
            assert!(TierMapping::defaults().contains(&player.tier));
        }
    }
}
