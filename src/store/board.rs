use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::connection::{create_pool, get_connection, DbPool};
use super::seed;
use crate::domain::{PlayerRecord, TierMapping};
use crate::feed::{ChangeFeed, ChangeKind};

pub const PLAYERS_KEY: &str = "players";
pub const MAPPING_KEY: &str = "tier_mapping";

/// Per-key write counters, observable by other processes. A bump means the
/// corresponding entity was overwritten since the last look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreRevisions {
    pub players: i64,
    pub mapping: i64,
}

/// The canonical home of the board: two JSON documents under two known
/// keys. Every save bumps the key's revision and publishes on the change
/// feed; loads recover from unparsable values by reseeding defaults.
#[derive(Clone)]
pub struct BoardStore {
    pool: DbPool,
    feed: ChangeFeed,
}

impl BoardStore {
    pub fn open(database_path: &str, feed: ChangeFeed) -> Result<Self> {
        let pool = create_pool(database_path)?;
        let store = Self { pool, feed };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = get_connection(&self.pool)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to enable WAL on the board store")?;
        conn.execute_batch(include_str!("schema.sql"))
            .context("Failed to create board store schema")
    }

    /// Read the persisted player list. Absent or unparsable values are
    /// replaced by the example dataset; parse failures never propagate.
    pub fn load_players(&self) -> Result<Vec<PlayerRecord>> {
        let Some(text) = self.read_key(PLAYERS_KEY)? else {
            return self.reseed_players();
        };

        match serde_json::from_str::<Vec<PlayerRecord>>(&text) {
            Ok(players) => Ok(players),
            Err(e) => {
                log::warn!("Stored player list is unreadable, reseeding defaults: {e}");
                self.reseed_players()
            }
        }
    }

    /// Read the persisted mapping: built-in defaults overlaid with every
    /// valid stored entry, so stale labels survive and gaps are filled.
    pub fn load_mapping(&self) -> Result<TierMapping> {
        let Some(text) = self.read_key(MAPPING_KEY)? else {
            return self.reseed_mapping();
        };

        match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&text) {
            Ok(stored) => Ok(TierMapping::defaults_overlaid(&stored)),
            Err(e) => {
                log::warn!("Stored tier mapping is unreadable, reseeding defaults: {e}");
                self.reseed_mapping()
            }
        }
    }

    pub fn save_players(&self, players: &[PlayerRecord]) -> Result<()> {
        let json = serde_json::to_string(players).context("Failed to serialize player list")?;
        self.write_key(PLAYERS_KEY, &json)?;
        self.feed.publish(ChangeKind::PlayersUpdated);
        Ok(())
    }

    pub fn save_mapping(&self, mapping: &TierMapping) -> Result<()> {
        let json = serde_json::to_string(mapping).context("Failed to serialize tier mapping")?;
        self.write_key(MAPPING_KEY, &json)?;
        self.feed.publish(ChangeKind::MappingUpdated);
        Ok(())
    }

    /// Empty the player list, persist, notify.
    pub fn clear_players(&self) -> Result<()> {
        self.save_players(&[])
    }

    pub fn revisions(&self) -> Result<StoreRevisions> {
        Ok(StoreRevisions {
            players: self.read_revision(PLAYERS_KEY)?,
            mapping: self.read_revision(MAPPING_KEY)?,
        })
    }

    // Seeding writes directly: loads are read paths and do not notify.

    fn reseed_players(&self) -> Result<Vec<PlayerRecord>> {
        let players = seed::example_players();
        let json = serde_json::to_string(&players).context("Failed to serialize seed players")?;
        self.write_key(PLAYERS_KEY, &json)?;
        log::info!("Seeded {} example players", players.len());
        Ok(players)
    }

    fn reseed_mapping(&self) -> Result<TierMapping> {
        let mapping = TierMapping::defaults();
        let json = serde_json::to_string(&mapping).context("Failed to serialize seed mapping")?;
        self.write_key(MAPPING_KEY, &json)?;
        log::info!("Seeded default tier mapping");
        Ok(mapping)
    }

    fn read_key(&self, key: &str) -> Result<Option<String>> {
        let conn = get_connection(&self.pool)?;
        conn.query_row(
            "SELECT value FROM board_kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("Failed to read store key {key}"))
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        let conn = get_connection(&self.pool)?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO board_kv (key, value, revision, updated_at) VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 revision = board_kv.revision + 1,
                 updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .with_context(|| format!("Failed to write store key {key}"))?;
        Ok(())
    }

    fn read_revision(&self, key: &str) -> Result<i64> {
        let conn = get_connection(&self.pool)?;
        let revision = conn
            .query_row(
                "SELECT revision FROM board_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read revision of store key {key}"))?;
        Ok(revision.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> BoardStore {
        let path = std::env::temp_dir().join(format!("tierboard_{name}.db"));
        let _ = std::fs::remove_file(&path);
        BoardStore::open(path.to_str().unwrap(), ChangeFeed::new()).unwrap()
    }

    #[test]
    fn empty_store_seeds_players_and_keeps_them() {
        let store = scratch_store("seed_players");

        let first = store.load_players().unwrap();
        assert_eq!(first, seed::example_players());

        // The seed was persisted, not just returned.
        let raw = store.read_key(PLAYERS_KEY).unwrap().unwrap();
        let stored: Vec<PlayerRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, first);
    }

    #[test]
    fn corrupt_player_list_reseeds_and_persists_the_default() {
        let store = scratch_store("corrupt_players");
        store.write_key(PLAYERS_KEY, "{not json").unwrap();

        assert_eq!(store.load_players().unwrap(), seed::example_players());

        let raw = store.read_key(PLAYERS_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<PlayerRecord>>(&raw).is_ok());
    }

    #[test]
    fn non_array_player_value_is_treated_as_corrupt() {
        let store = scratch_store("non_array_players");
        store
            .write_key(PLAYERS_KEY, r#"{"rank":1,"name":"x","tier":"HT1","points":1}"#)
            .unwrap();

        assert_eq!(store.load_players().unwrap(), seed::example_players());
    }

    #[test]
    fn partial_mapping_is_overlaid_on_defaults() {
        let store = scratch_store("partial_mapping");
        store.write_key(MAPPING_KEY, r#"{"LT5":10}"#).unwrap();

        let mapping = store.load_mapping().unwrap();
        assert_eq!(mapping.len(), 10);
        assert_eq!(mapping.points_for("LT5"), Some(10));
        assert_eq!(
            mapping.points_for("HT1"),
            TierMapping::defaults().points_for("HT1")
        );
    }

    #[test]
    fn corrupt_mapping_reseeds_defaults() {
        let store = scratch_store("corrupt_mapping");
        store.write_key(MAPPING_KEY, "[]").unwrap();

        assert_eq!(store.load_mapping().unwrap(), TierMapping::defaults());
        let raw = store.read_key(MAPPING_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<BTreeMap<String, i64>>(&raw).is_ok());
    }

    #[test]
    fn saves_publish_on_the_change_feed() {
        let store = scratch_store("publish_on_save");
        let mut rx = store.feed().subscribe();

        store.save_players(&[]).unwrap();
        let mut mapping = store.load_mapping().unwrap();
        mapping.set("LT5", 11);
        store.save_mapping(&mapping).unwrap();

        assert_eq!(rx.try_recv().unwrap(), ChangeKind::PlayersUpdated);
        assert_eq!(rx.try_recv().unwrap(), ChangeKind::MappingUpdated);
    }

    #[test]
    fn every_save_bumps_the_revision_of_its_key_only() {
        let store = scratch_store("revisions");
        store.save_players(&seed::example_players()).unwrap();
        let before = store.revisions().unwrap();

        store.save_players(&[]).unwrap();
        let after = store.revisions().unwrap();

        assert_eq!(after.players, before.players + 1);
        assert_eq!(after.mapping, before.mapping);
    }

    #[test]
    fn clear_persists_an_empty_list() {
        let store = scratch_store("clear");
        store.load_players().unwrap();
        store.clear_players().unwrap();

        assert!(store.load_players().unwrap().is_empty());
    }
}
