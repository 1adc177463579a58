use anyhow::Result;
use colored::Colorize;

use crate::api::status_client::StatusReport;
use crate::domain::PlayerRecord;
use crate::store::BoardStore;
use crate::view::{visible_rows, ViewQuery};

/// The read-only terminal rendering shared by `list` and `watch`. Holds no
/// data of its own: every render re-reads the store.
pub struct ViewerService {
    store: BoardStore,
}

impl ViewerService {
    pub fn new(store: BoardStore) -> Self {
        Self { store }
    }

    pub fn render_board(&self, query: &ViewQuery) -> Result<String> {
        let players = self.store.load_players()?;
        let rows = visible_rows(&players, query);
        Ok(render_table(&rows))
    }

    pub fn render_mapping(&self) -> Result<String> {
        let mapping = self.store.load_mapping()?;
        let mut out = String::new();
        out.push_str(&format!("{:<10} {:>6}\n", "TIER".bold(), "POINTS".bold()));
        for (label, points) in mapping.iter_ladder() {
            out.push_str(&format!("{label:<10} {points:>6}\n"));
        }
        Ok(out)
    }
}

pub fn render_table(rows: &[(usize, &PlayerRecord)]) -> String {
    if rows.is_empty() {
        return "(no players match)\n".to_string();
    }

    let name_width = rows
        .iter()
        .map(|(_, player)| player.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>5} {:<name_width$} {:<6} {:>7}\n",
        "#".bold(),
        "RANK".bold(),
        "NAME".bold(),
        "TIER".bold(),
        "POINTS".bold(),
    ));
    for (index, player) in rows {
        out.push_str(&format!(
            "{index:>4} {:>5} {:<name_width$} {:<6} {:>7}\n",
            player.rank, player.name, player.tier, player.points,
        ));
    }
    out
}

pub fn render_status(report: &StatusReport) -> String {
    let state = if report.online {
        "online".green().to_string()
    } else {
        "offline".red().to_string()
    };

    let mut line = format!(
        "{} is {state} ({}/{} players)",
        report.host.bold(),
        report.players_online,
        report.players_max,
    );
    for motd_line in &report.motd {
        line.push_str(&format!("\n  {motd_line}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: i64, name: &str, tier: &str, points: i64) -> PlayerRecord {
        PlayerRecord {
            rank,
            name: name.to_string(),
            tier: tier.to_string(),
            points,
        }
    }

    #[test]
    fn table_lists_rows_with_their_canonical_index() {
        let a = record(1, "Marlow", "HT1", 100);
        let b = record(2, "Vexa", "LT1", 80);
        let rows = vec![(3, &a), (0, &b)];

        let table = render_table(&rows);
        assert!(table.contains("Marlow"));
        assert!(table.contains("Vexa"));

        let marlow_line = table.lines().find(|l| l.contains("Marlow")).unwrap();
        assert!(marlow_line.trim_start().starts_with('3'));
    }

    #[test]
    fn empty_view_renders_a_placeholder() {
        assert_eq!(render_table(&[]), "(no players match)\n");
    }

    #[test]
    fn status_line_shows_counts_and_motd() {
        let mut report = StatusReport::offline("play.example.net");
        report.online = true;
        report.players_online = 4;
        report.players_max = 60;
        report.motd = vec!["Welcome".to_string()];

        let line = render_status(&report);
        assert!(line.contains("play.example.net"));
        assert!(line.contains("4/60"));
        assert!(line.contains("Welcome"));
    }

    #[test]
    fn offline_report_renders_the_fallback_state() {
        let line = render_status(&StatusReport::offline("play.example.net"));
        assert!(line.contains("offline"));
        assert!(line.contains("0/0"));
    }
}
