use serde_json::{Map, Value};

use crate::domain::{PlayerRecord, TierMapping};

const NAME_FIELDS: &[&str] = &["name", "player", "username"];
const TIER_FIELDS: &[&str] = &["tier"];
const POINTS_FIELDS: &[&str] = &["points"];
const RANK_FIELDS: &[&str] = &["rank"];

/// Build a canonical record from heterogeneous input: form fields, an
/// imported JSON element, or a CSV row keyed by header. Field names match
/// case-insensitively (`tier`/`Tier`/`TIER`) and the name may arrive under
/// `name`, `player`, or `username`.
///
/// A supplied, coercible `points` wins; otherwise the tier's mapped value,
/// else 0. The output always satisfies the record invariants, and
/// renormalizing an already-normal record changes nothing.
pub fn normalize(raw: &Value, mapping: &TierMapping) -> PlayerRecord {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let tier = first_text(fields, TIER_FIELDS).unwrap_or_default();
    let points = first_number(fields, POINTS_FIELDS)
        .unwrap_or_else(|| mapping.points_for(&tier).unwrap_or(0))
        .max(0);
    let rank = first_number(fields, RANK_FIELDS).unwrap_or(0);
    let name = first_text(fields, NAME_FIELDS).unwrap_or_else(|| "Unknown".to_string());

    PlayerRecord {
        rank,
        name,
        tier,
        points,
    }
}

fn field<'a>(fields: &'a Map<String, Value>, wanted: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
        .map(|(_, value)| value)
}

/// First candidate field holding non-blank text. Numbers stringify.
fn first_text(fields: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|key| field(fields, key))
        .find_map(as_text)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First candidate field that coerces to an integer.
fn first_number(fields: &Map<String, Value>, candidates: &[&str]) -> Option<i64> {
    candidates
        .iter()
        .filter_map(|key| field(fields, key))
        .find_map(coerce_int)
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}
