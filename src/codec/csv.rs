use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::domain::{PlayerRecord, TierMapping};
use crate::normalize::normalize;

/// CSV import: the first non-blank line is a case-insensitive header, each
/// following line becomes an object keyed by header, then normalized.
/// Fields may be enclosed in double quotes; a doubled quote inside an
/// enclosure is a literal quote and enclosed commas are data, not
/// delimiters. Blank lines are skipped.
pub fn import_players(text: &str, mapping: &TierMapping) -> Result<Vec<PlayerRecord>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().context("CSV import is empty")?;
    let headers: Vec<String> = split_line(header_line)
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();

    let players = lines
        .map(|line| row_to_record(line, &headers, mapping))
        .collect();
    Ok(players)
}

fn row_to_record(line: &str, headers: &[String], mapping: &TierMapping) -> PlayerRecord {
    let cells = split_line(line);
    let mut fields = Map::new();
    for (header, cell) in headers.iter().zip(cells) {
        fields.insert(header.clone(), Value::String(cell));
    }
    normalize(&Value::Object(fields), mapping)
}

/// Split one line on commas, honoring double-quote enclosures.
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            cells.push(std::mem::take(&mut cell));
        } else {
            cell.push(c);
        }
    }
    cells.push(cell);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rows_map_headers_to_fields() {
        let mapping = TierMapping::defaults();
        let players = import_players(
            "rank,name,tier,points\n1,Nia,HT1,100\n2,Kai,LT5,\n",
            &mapping,
        )
        .unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].rank, 1);
        assert_eq!(players[0].name, "Nia");
        assert_eq!(players[0].points, 100);
        // Empty points cell falls back to the tier mapping.
        assert_eq!(players[1].points, mapping.points_for("LT5").unwrap());
    }

    #[test]
    fn quoted_cells_keep_commas_and_doubled_quotes() {
        let mapping = TierMapping::defaults();
        let players = import_players(
            "rank,name,tier,points\n1,\"Smith, \"\"The Rock\"\"\",HT1,100\n",
            &mapping,
        )
        .unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Smith, \"The Rock\"");
        assert_eq!(players[0].tier, "HT1");
        assert_eq!(players[0].points, 100);
    }

    #[test]
    fn header_matching_is_case_insensitive_and_trimmed() {
        let mapping = TierMapping::defaults();
        let players = import_players(" RANK , Name , TIER , Points \n3,Ada,LT2,12\n", &mapping)
            .unwrap();

        assert_eq!(players[0].rank, 3);
        assert_eq!(players[0].name, "Ada");
        assert_eq!(players[0].tier, "LT2");
        assert_eq!(players[0].points, 12);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mapping = TierMapping::defaults();
        let players =
            import_players("\nname,tier\n\nNia,HT1\n\n\nKai,LT5\n", &mapping).unwrap();
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn empty_input_is_an_error() {
        let mapping = TierMapping::defaults();
        assert!(import_players("", &mapping).is_err());
        assert!(import_players("\n  \n", &mapping).is_err());
    }

    #[test]
    fn short_rows_leave_missing_fields_defaulted() {
        let mapping = TierMapping::defaults();
        let players = import_players("rank,name,tier,points\n5,Nia\n", &mapping).unwrap();
        assert_eq!(players[0].rank, 5);
        assert_eq!(players[0].name, "Nia");
        assert_eq!(players[0].tier, "");
        assert_eq!(players[0].points, 0);
    }
}
