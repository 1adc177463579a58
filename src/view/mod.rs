use std::cmp::Ordering;

use crate::domain::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Rank,
    Name,
    Tier,
    Points,
}

impl SortField {
    /// Lenient query-parameter parsing, unknown values fall through to the
    /// caller's default.
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "rank" => Some(SortField::Rank),
            "name" => Some(SortField::Name),
            "tier" => Some(SortField::Tier),
            "points" => Some(SortField::Points),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The one piece of view-local state: which column orders the table and
/// which way. Everything else is recomputed from the store on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Rank,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Column-header click: flip direction on the active field, otherwise
    /// select the field ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: String,
    pub tier_filter: String,
    pub sort: SortState,
}

impl ViewQuery {
    /// Shared lenient parsing for CLI flags and HTTP query parameters.
    /// Unknown sort fields and orders fall back to rank ascending.
    pub fn from_params(
        search: Option<&str>,
        tier: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Self {
        let field = sort_by
            .and_then(SortField::from_param)
            .unwrap_or(SortField::Rank);
        let direction = match order {
            Some("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };

        Self {
            search: search.unwrap_or_default().to_string(),
            tier_filter: tier.unwrap_or_default().to_string(),
            sort: SortState { field, direction },
        }
    }
}

/// The rows a renderer shows, paired with each record's position in the
/// canonical list — edit and delete track that position, never the place a
/// row happens to occupy after filtering and sorting.
///
/// Ties keep canonical order: the sort is stable and descending order is a
/// reversed comparator, not a reversed result.
pub fn visible_rows<'a>(
    players: &'a [PlayerRecord],
    query: &ViewQuery,
) -> Vec<(usize, &'a PlayerRecord)> {
    let mut rows: Vec<(usize, &PlayerRecord)> = players
        .iter()
        .enumerate()
        .filter(|(_, player)| matches(player, query))
        .collect();

    rows.sort_by(|(_, a), (_, b)| {
        let ordering = compare(a, b, query.sort.field);
        match query.sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

fn matches(player: &PlayerRecord, query: &ViewQuery) -> bool {
    matches_search(player, &query.search) && matches_tier(player, &query.tier_filter)
}

fn matches_search(player: &PlayerRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    player.name.to_lowercase().contains(&needle)
        || player.tier.to_lowercase().contains(&needle)
        || player.points.to_string().contains(&needle)
        || player.rank.to_string().contains(&needle)
}

fn matches_tier(player: &PlayerRecord, tier_filter: &str) -> bool {
    tier_filter.is_empty() || player.tier == tier_filter
}

fn compare(a: &PlayerRecord, b: &PlayerRecord, field: SortField) -> Ordering {
    match field {
        SortField::Rank => a.rank.cmp(&b.rank),
        SortField::Points => a.points.cmp(&b.points),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Tier => a.tier.to_lowercase().cmp(&b.tier.to_lowercase()),
    }
}
