pub mod csv;
pub mod json;

use std::path::Path;

use anyhow::Result;

use crate::domain::{PlayerRecord, TierMapping};

/// Parse an import payload by file extension: `.json` must be a top-level
/// array of records, anything else is read as CSV. Failures abort the whole
/// import; no partial list ever reaches the store.
pub fn import_players(path: &Path, text: &str, mapping: &TierMapping) -> Result<Vec<PlayerRecord>> {
    if is_json(path) {
        json::import_players(text, mapping)
    } else {
        csv::import_players(text, mapping)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_picks_the_codec() {
        assert!(is_json(&PathBuf::from("players.json")));
        assert!(is_json(&PathBuf::from("players.JSON")));
        assert!(!is_json(&PathBuf::from("players.csv")));
        assert!(!is_json(&PathBuf::from("players")));
    }

    #[test]
    fn export_then_import_round_trips_the_list() {
        let mapping = TierMapping::defaults();
        let players = crate::store::seed::example_players();

        let exported = json::export_players(&players).unwrap();
        let imported =
            import_players(&PathBuf::from("players.json"), &exported, &mapping).unwrap();

        assert_eq!(imported, players);
    }
}
