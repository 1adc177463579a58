use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    /// Position in the canonical list, the handle edit/delete would use.
    pub index: usize,
    pub rank: i64,
    pub name: String,
    pub tier: String,
    pub points: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub items: Vec<PlayerRow>,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub tier: String,
    pub points: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResponse {
    pub entries: Vec<MappingEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub host: String,
    pub online: bool,
    pub players_online: i64,
    pub players_max: i64,
    pub motd: Vec<String>,
    pub checked_at: String,
}
