use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::{PlayerRecord, TierMapping};
use crate::normalize::normalize;

/// A JSON import must be an array at the top level; every element is
/// normalized. Any parse failure aborts the import as a whole.
pub fn import_players(text: &str, mapping: &TierMapping) -> Result<Vec<PlayerRecord>> {
    let value: Value =
        serde_json::from_str(text).context("Import file is not valid JSON")?;
    let items = value
        .as_array()
        .context("JSON import must be an array of player records")?;

    Ok(items.iter().map(|item| normalize(item, mapping)).collect())
}

/// Pretty-printed JSON array, the download format of the board.
pub fn export_players(players: &[PlayerRecord]) -> Result<String> {
    serde_json::to_string_pretty(players).context("Failed to serialize player list for export")
}
