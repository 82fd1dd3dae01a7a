use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::stat_kind::StatColumn;

/// One player's box-score numbers for one game.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatLine {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub fg3m: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fp: f64,
}

impl StatLine {
    pub fn get(&self, column: StatColumn) -> f64 {
        match column {
            StatColumn::Pts => self.pts,
            StatColumn::Reb => self.reb,
            StatColumn::Ast => self.ast,
            StatColumn::Fg3m => self.fg3m,
            StatColumn::Stl => self.stl,
            StatColumn::Blk => self.blk,
            StatColumn::Tov => self.tov,
            StatColumn::Fp => self.fp,
        }
    }

    pub fn sum(&self, columns: &[StatColumn]) -> f64 {
        columns.iter().map(|c| self.get(*c)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub player: String,
    pub game_date: NaiveDate,
    pub stats: StatLine,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        source: csv::Error,
    },

    #[error("JSON error in {source_name}: {source}")]
    Json {
        source_name: String,
        source: serde_json::Error,
    },

    #[error("malformed record {row} in {source_name}: {reason}")]
    MalformedRecord {
        source_name: String,
        row: usize,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawGameRow {
    #[serde(rename = "PLAYER", alias = "PLAYER_NAME")]
    player: String,
    #[serde(rename = "GAME DATE", alias = "GAME_DATE")]
    game_date: String,
    #[serde(rename = "PTS")]
    pts: f64,
    #[serde(rename = "REB")]
    reb: f64,
    #[serde(rename = "AST")]
    ast: f64,
    #[serde(rename = "3PM", alias = "FG3M")]
    fg3m: f64,
    #[serde(rename = "STL")]
    stl: f64,
    #[serde(rename = "BLK")]
    blk: f64,
    #[serde(rename = "TOV")]
    tov: f64,
    #[serde(rename = "FP", alias = "FANTASY_PTS")]
    fp: f64,
}

impl RawGameRow {
    fn into_record(self, source_name: &str, row: usize) -> Result<GameRecord, IngestError> {
        let player = self.player.trim().to_string();
        if player.is_empty() {
            return Err(IngestError::MalformedRecord {
                source_name: source_name.to_string(),
                row,
                reason: "empty player name".to_string(),
            });
        }
        let game_date =
            parse_game_date(&self.game_date).ok_or_else(|| IngestError::MalformedRecord {
                source_name: source_name.to_string(),
                row,
                reason: format!("unparsable game date {:?}", self.game_date),
            })?;
        let stats = StatLine {
            pts: self.pts,
            reb: self.reb,
            ast: self.ast,
            fg3m: self.fg3m,
            stl: self.stl,
            blk: self.blk,
            tov: self.tov,
            fp: self.fp,
        };
        if let Some(column) = StatColumn::ALL
            .into_iter()
            .find(|c| !stats.get(*c).is_finite())
        {
            return Err(IngestError::MalformedRecord {
                source_name: source_name.to_string(),
                row,
                reason: format!("non-finite {} value", column.header()),
            });
        }
        Ok(GameRecord {
            player,
            game_date,
            stats,
        })
    }
}

/// Accepts the date shapes seen in exported game logs.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn load_game_logs_csv_from_reader<R: Read>(
    rdr: R,
    source_name: &str,
) -> Result<Vec<GameRecord>, IngestError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<RawGameRow>().enumerate() {
        let raw = result.map_err(|source| IngestError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        // +2: one for the header line, one for 1-based numbering.
        out.push(raw.into_record(source_name, idx + 2)?);
    }
    Ok(out)
}

pub fn load_game_logs_json_from_reader<R: Read>(
    rdr: R,
    source_name: &str,
) -> Result<Vec<GameRecord>, IngestError> {
    let rows: Vec<RawGameRow> =
        serde_json::from_reader(rdr).map_err(|source| IngestError::Json {
            source_name: source_name.to_string(),
            source,
        })?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, raw)| raw.into_record(source_name, idx + 1))
        .collect()
}

/// Load a game-log file, picking the decoder from the extension (`.json`, else CSV).
pub fn load_game_logs(path: &Path) -> Result<Vec<GameRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source_name = path.display().to_string();
    let rdr = BufReader::new(file);
    let records = if is_json_path(path) {
        load_game_logs_json_from_reader(rdr, &source_name)?
    } else {
        load_game_logs_csv_from_reader(rdr, &source_name)?
    };
    tracing::info!(path = %source_name, rows = records.len(), "loaded game logs");
    Ok(records)
}

pub(crate) fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "PLAYER,GAME DATE,MATCHUP,PTS,REB,AST,3PM,STL,BLK,TOV,FP\n";

    #[test]
    fn parses_csv_and_ignores_extra_columns() {
        let data = format!(
            "{HEADER}Jalen Brunson,2024-11-05,NYK vs. HOU,31,4,8,3,1,0,2,48.6\n\
             Jalen Brunson,NOV 03 2024,NYK @ DET,22,2,6,2,0,0,3,33.0\n"
        );
        let err = load_game_logs_csv_from_reader(data.as_bytes(), "logs.csv").unwrap_err();
        // Second row has a date shape we do not accept.
        assert!(matches!(err, IngestError::MalformedRecord { row: 3, .. }));

        let data = format!(
            "{HEADER}Jalen Brunson,2024-11-05,NYK vs. HOU,31,4,8,3,1,0,2,48.6\n\
             Jalen Brunson,\"NOV 03, 2024\",NYK @ DET,22,2,6,2,0,0,3,33.0\n"
        );
        let rows = load_game_logs_csv_from_reader(data.as_bytes(), "logs.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stats.pts, 31.0);
        assert_eq!(rows[1].game_date, NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
        assert_eq!(rows[1].stats.fp, 33.0);
    }

    #[test]
    fn missing_column_is_malformed_input() {
        let data = "PLAYER,GAME DATE,PTS,REB,AST\nA,2024-11-05,1,2,3\n";
        let err = load_game_logs_csv_from_reader(data.as_bytes(), "logs.csv").unwrap_err();
        assert!(matches!(err, IngestError::Csv { .. }));
        assert!(err.to_string().contains("logs.csv"));
    }

    #[test]
    fn json_rows_accept_api_aliases() {
        let data = r#"[
            {"PLAYER_NAME":"A","GAME_DATE":"2024-11-05T00:00:00","PTS":10,"REB":5,"AST":2,
             "FG3M":1,"STL":1,"BLK":0,"TOV":2,"FANTASY_PTS":21.5,"MIN":33}
        ]"#;
        let rows = load_game_logs_json_from_reader(data.as_bytes(), "logs.json").unwrap();
        assert_eq!(rows[0].player, "A");
        assert_eq!(rows[0].stats.fg3m, 1.0);
        assert_eq!(rows[0].stats.fp, 21.5);
    }

    #[test]
    fn date_formats() {
        let want = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(parse_game_date("2025-01-09"), Some(want));
        assert_eq!(parse_game_date("01/09/2025"), Some(want));
        assert_eq!(parse_game_date("Jan 09, 2025"), Some(want));
        assert_eq!(parse_game_date("2025-01-09 19:30:00"), Some(want));
        assert_eq!(parse_game_date(""), None);
        assert_eq!(parse_game_date("yesterday"), None);
    }

    #[test]
    fn combo_sum_uses_listed_columns() {
        let line = StatLine {
            pts: 20.0,
            reb: 7.0,
            ast: 5.0,
            ..StatLine::default()
        };
        assert_eq!(
            line.sum(&[StatColumn::Pts, StatColumn::Reb, StatColumn::Ast]),
            32.0
        );
    }
}
