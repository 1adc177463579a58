use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use crate::codec;
use crate::domain::PlayerRecord;
use crate::normalize::normalize;
use crate::store::BoardStore;

/// Field overrides for an in-place edit. `None` leaves the stored value
/// alone, matching a form that arrives pre-filled with the current record.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub tier: Option<String>,
    pub points: Option<i64>,
    pub rank: Option<i64>,
}

/// The editable view's mutations. Each one loads the canonical state,
/// applies a single change, persists, and lets the store notify.
pub struct EditorService {
    store: BoardStore,
}

impl EditorService {
    pub fn new(store: BoardStore) -> Self {
        Self { store }
    }

    pub fn add_player(
        &self,
        name: &str,
        tier: &str,
        points: Option<i64>,
        rank: Option<i64>,
    ) -> Result<PlayerRecord> {
        if name.trim().is_empty() {
            bail!("Player name is required");
        }

        let mapping = self.store.load_mapping()?;
        let mut players = self.store.load_players()?;

        let mut raw = Map::new();
        raw.insert("name".to_string(), Value::from(name));
        raw.insert("tier".to_string(), Value::from(tier));
        raw.insert(
            "rank".to_string(),
            Value::from(rank.unwrap_or(players.len() as i64 + 1)),
        );
        if let Some(points) = points {
            raw.insert("points".to_string(), Value::from(points));
        }

        let record = normalize(&Value::Object(raw), &mapping);
        players.push(record.clone());
        self.store.save_players(&players)?;

        log::info!("Added {} ({})", record.name, record.tier);
        Ok(record)
    }

    pub fn edit_player(&self, index: usize, patch: RecordPatch) -> Result<PlayerRecord> {
        let mut players = self.store.load_players()?;
        let record = players
            .get_mut(index)
            .with_context(|| format!("No player at position {index}"))?;

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("Player name is required");
            }
            record.name = name;
        }
        if let Some(tier) = patch.tier {
            record.tier = tier.trim().to_string();
        }
        if let Some(points) = patch.points {
            if points < 0 {
                bail!("Points cannot be negative");
            }
            record.points = points;
        }
        if let Some(rank) = patch.rank {
            record.rank = rank;
        }

        let updated = record.clone();
        self.store.save_players(&players)?;
        Ok(updated)
    }

    pub fn delete_player(&self, index: usize) -> Result<PlayerRecord> {
        let mut players = self.store.load_players()?;
        if index >= players.len() {
            bail!("No player at position {index}");
        }

        let removed = players.remove(index);
        self.store.save_players(&players)?;

        log::info!("Deleted {} ({})", removed.name, removed.tier);
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear_players()
    }

    pub fn set_tier_points(&self, label: &str, points: i64) -> Result<()> {
        let label = label.trim();
        if label.is_empty() {
            bail!("Tier label is required");
        }
        if points < 0 {
            bail!("Points cannot be negative");
        }

        let mut mapping = self.store.load_mapping()?;
        mapping.set(label, points);
        self.store.save_mapping(&mapping)
    }

    /// Re-derive points from each record's tier. All mode overwrites every
    /// record; empty-only leaves nonzero points untouched. Tiers missing
    /// from the mapping go to 0, the same default normalization uses.
    pub fn apply_mapping(&self, empty_only: bool) -> Result<usize> {
        let mapping = self.store.load_mapping()?;
        let mut players = self.store.load_players()?;

        let mut updated = 0;
        for player in &mut players {
            if empty_only && player.points != 0 {
                continue;
            }
            player.points = mapping.points_for(&player.tier).unwrap_or(0);
            updated += 1;
        }

        self.store.save_players(&players)?;
        log::info!("Applied mapping to {updated} player(s)");
        Ok(updated)
    }

    /// Replace the whole list with the file's contents. The payload is
    /// parsed in full before the store is touched, so a malformed file
    /// leaves existing data exactly as it was.
    pub fn import_file(&self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {}", path.display()))?;

        let mapping = self.store.load_mapping()?;
        let players = codec::import_players(path, &text, &mapping)?;

        let count = players.len();
        self.store.save_players(&players)?;

        log::info!("Imported {count} player(s) from {}", path.display());
        Ok(count)
    }

    pub fn export_file(&self, path: &Path) -> Result<usize> {
        let players = self.store.load_players()?;
        let json = codec::json::export_players(&players)?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write export file {}", path.display()))?;

        log::info!("Exported {} player(s) to {}", players.len(), path.display());
        Ok(players.len())
    }
}
