use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::game_log::{IngestError, is_json_path};
use crate::stat_kind::{LineStat, StatKind};

pub const DEFAULT_OPPONENT: &str = "unknown";

/// A standing prop line. The stat is resolved once, here, so aliases never leak downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntry {
    pub player: String,
    pub team: String,
    pub stat: LineStat,
    pub line: f64,
    pub opponent: String,
}

impl LineEntry {
    pub fn new(player: &str, team: &str, stat: &str, line: f64, opponent: Option<&str>) -> Self {
        Self {
            player: player.to_string(),
            team: team.to_string(),
            stat: LineStat::from_raw(stat),
            line,
            opponent: opponent
                .filter(|o| !o.trim().is_empty())
                .unwrap_or(DEFAULT_OPPONENT)
                .to_string(),
        }
    }

    pub fn kind(&self) -> Option<StatKind> {
        match &self.stat {
            LineStat::Known(kind) => Some(*kind),
            LineStat::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Stat")]
    stat: String,
    #[serde(rename = "Line")]
    line: f64,
    #[serde(rename = "Versus", default)]
    versus: Option<String>,
}

impl RawLine {
    fn into_entry(self, source_name: &str, row: usize) -> Result<LineEntry, IngestError> {
        if self.name.trim().is_empty() {
            return Err(IngestError::MalformedRecord {
                source_name: source_name.to_string(),
                row,
                reason: "empty Name".to_string(),
            });
        }
        if !self.line.is_finite() {
            return Err(IngestError::MalformedRecord {
                source_name: source_name.to_string(),
                row,
                reason: format!("non-finite Line for {}", self.name),
            });
        }
        Ok(LineEntry::new(
            self.name.trim(),
            self.team.trim(),
            &self.stat,
            self.line,
            self.versus.as_deref().map(str::trim),
        ))
    }
}

pub fn load_lines_json_from_reader<R: Read>(
    rdr: R,
    source_name: &str,
) -> Result<Vec<LineEntry>, IngestError> {
    let rows: Vec<RawLine> = serde_json::from_reader(rdr).map_err(|source| IngestError::Json {
        source_name: source_name.to_string(),
        source,
    })?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, raw)| raw.into_entry(source_name, idx + 1))
        .collect()
}

pub fn load_lines_csv_from_reader<R: Read>(
    rdr: R,
    source_name: &str,
) -> Result<Vec<LineEntry>, IngestError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<RawLine>().enumerate() {
        let raw = result.map_err(|source| IngestError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        out.push(raw.into_entry(source_name, idx + 2)?);
    }
    Ok(out)
}

pub fn load_lines(path: &Path) -> Result<Vec<LineEntry>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source_name = path.display().to_string();
    let rdr = BufReader::new(file);
    let lines = if is_json_path(path) {
        load_lines_json_from_reader(rdr, &source_name)?
    } else {
        load_lines_csv_from_reader(rdr, &source_name)?
    };
    let unsupported = lines.iter().filter(|l| l.kind().is_none()).count();
    if unsupported > 0 {
        tracing::warn!(path = %source_name, unsupported, "catalog has lines with unsupported stats");
    }
    tracing::info!(path = %source_name, lines = lines.len(), "loaded line catalog");
    Ok(lines)
}
