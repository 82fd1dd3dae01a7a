use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};

use crate::game_log::{GameRecord, StatLine};

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub source: String,
    pub rows_upserted: usize,
    pub players: usize,
    pub latest_game_date: Option<String>,
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS game_logs (
            player TEXT NOT NULL,
            game_date TEXT NOT NULL,
            day_ordinal INTEGER NOT NULL,
            pts REAL NOT NULL,
            reb REAL NOT NULL,
            ast REAL NOT NULL,
            fg3m REAL NOT NULL,
            stl REAL NOT NULL,
            blk REAL NOT NULL,
            tov REAL NOT NULL,
            fp REAL NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (player, game_date, day_ordinal)
        );
        CREATE INDEX IF NOT EXISTS idx_game_logs_player ON game_logs(player);

        CREATE TABLE IF NOT EXISTS ingest_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NULL,
            source TEXT NOT NULL,
            rows_upserted INTEGER NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Upsert all records in one transaction and log the run.
///
/// `day_ordinal` counts a player's rows on the same date in input order. It keeps same-day
/// rows distinct and ordered, and stays put when a refreshed file shifts row positions.
pub fn ingest_records(
    conn: &mut Connection,
    source: &str,
    records: &[GameRecord],
) -> Result<IngestSummary> {
    if records.is_empty() {
        return Err(anyhow!("no game log rows to ingest from {source}"));
    }

    let started_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO ingest_runs(started_at, finished_at, source, rows_upserted)
         VALUES (?1, NULL, ?2, 0)",
        params![started_at, source],
    )
    .context("insert ingest run")?;
    let run_id = conn.last_insert_rowid();

    let updated_at = Utc::now().to_rfc3339();
    let tx = conn.transaction().context("begin ingest transaction")?;
    let mut seen: HashMap<(&str, NaiveDate), i64> = HashMap::new();
    for record in records {
        let ordinal = seen
            .entry((record.player.as_str(), record.game_date))
            .or_insert(0);
        upsert_record(&tx, *ordinal, record, &updated_at)?;
        *ordinal += 1;
    }
    tx.commit().context("commit ingest transaction")?;

    let finished_at = Utc::now().to_rfc3339();
    conn.execute(
        "UPDATE ingest_runs SET finished_at = ?1, rows_upserted = ?2 WHERE run_id = ?3",
        params![finished_at, records.len() as i64, run_id],
    )
    .context("update ingest run")?;

    let players = conn
        .query_row("SELECT COUNT(DISTINCT player) FROM game_logs", [], |row| {
            row.get::<_, i64>(0)
        })
        .context("count players")?;
    let latest_game_date = conn
        .query_row("SELECT MAX(game_date) FROM game_logs", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .context("query latest game_date")?;

    Ok(IngestSummary {
        source: source.to_string(),
        rows_upserted: records.len(),
        players: usize::try_from(players).unwrap_or(0),
        latest_game_date,
    })
}

fn upsert_record(
    tx: &rusqlite::Transaction<'_>,
    day_ordinal: i64,
    r: &GameRecord,
    updated_at: &str,
) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO game_logs (
            player, game_date, day_ordinal,
            pts, reb, ast, fg3m, stl, blk, tov, fp, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(player, game_date, day_ordinal) DO UPDATE SET
            pts = excluded.pts,
            reb = excluded.reb,
            ast = excluded.ast,
            fg3m = excluded.fg3m,
            stl = excluded.stl,
            blk = excluded.blk,
            tov = excluded.tov,
            fp = excluded.fp,
            updated_at = excluded.updated_at
        "#,
        params![
            r.player,
            r.game_date.format(DATE_FMT).to_string(),
            day_ordinal,
            r.stats.pts,
            r.stats.reb,
            r.stats.ast,
            r.stats.fg3m,
            r.stats.stl,
            r.stats.blk,
            r.stats.tov,
            r.stats.fp,
            updated_at,
        ],
    )
    .with_context(|| format!("upsert game log {} {}", r.player, r.game_date))?;
    Ok(())
}

pub fn load_game_records(conn: &Connection) -> Result<Vec<GameRecord>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT player, game_date, pts, reb, ast, fg3m, stl, blk, tov, fp
            FROM game_logs
            ORDER BY player ASC, game_date DESC, day_ordinal ASC
            "#,
        )
        .context("prepare load game logs query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                StatLine {
                    pts: row.get(2)?,
                    reb: row.get(3)?,
                    ast: row.get(4)?,
                    fg3m: row.get(5)?,
                    stl: row.get(6)?,
                    blk: row.get(7)?,
                    tov: row.get(8)?,
                    fp: row.get(9)?,
                },
            ))
        })
        .context("query load game logs")?;

    let mut out = Vec::new();
    for row in rows {
        let (player, raw_date, stats) = row.context("decode game log row")?;
        let game_date = NaiveDate::parse_from_str(&raw_date, DATE_FMT)
            .with_context(|| format!("bad stored game_date {raw_date:?} for {player}"))?;
        out.push(GameRecord {
            player,
            game_date,
            stats,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::GameLogStore;

    fn record(player: &str, date: &str, pts: f64) -> GameRecord {
        GameRecord {
            player: player.to_string(),
            game_date: NaiveDate::parse_from_str(date, DATE_FMT).unwrap(),
            stats: StatLine {
                pts,
                ..StatLine::default()
            },
        }
    }

    #[test]
    fn ingest_then_load_orders_by_player_and_date() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let records = vec![
            record("B", "2025-01-02", 3.0),
            record("A", "2025-01-01", 1.0),
            record("A", "2025-01-03", 2.0),
        ];
        let summary = ingest_records(&mut conn, "test", &records).unwrap();
        assert_eq!(summary.rows_upserted, 3);
        assert_eq!(summary.players, 2);
        assert_eq!(summary.latest_game_date.as_deref(), Some("2025-01-03"));

        let loaded = load_game_records(&conn).unwrap();
        let got: Vec<(&str, f64)> = loaded
            .iter()
            .map(|r| (r.player.as_str(), r.stats.pts))
            .collect();
        assert_eq!(got, vec![("A", 2.0), ("A", 1.0), ("B", 3.0)]);
    }

    #[test]
    fn reingest_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let records = vec![record("A", "2025-01-01", 1.0)];
        ingest_records(&mut conn, "a", &records).unwrap();
        ingest_records(&mut conn, "a", &records).unwrap();
        assert_eq!(load_game_records(&conn).unwrap().len(), 1);
    }

    #[test]
    fn refreshed_file_updates_instead_of_duplicating() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let first: Vec<GameRecord> = (1..=5)
            .rev()
            .map(|day| record("P", &format!("2025-01-0{day}"), day as f64))
            .collect();
        ingest_records(&mut conn, "day1.csv", &first).unwrap();

        // Next day's export: one new game on top, every older row shifted down.
        let mut refreshed = vec![record("P", "2025-01-06", 6.0)];
        refreshed.extend((1..=5).rev().map(|day| {
            record("P", &format!("2025-01-0{day}"), day as f64 + 0.5)
        }));
        let summary = ingest_records(&mut conn, "day2.csv", &refreshed).unwrap();
        assert_eq!(summary.rows_upserted, 6);

        let store = GameLogStore::from_records(load_game_records(&conn).unwrap());
        let games = store.games("P");
        assert_eq!(games.len(), 6);
        let pts: Vec<f64> = games.iter().map(|g| g.stats.pts).collect();
        assert_eq!(pts, vec![6.0, 5.5, 4.5, 3.5, 2.5, 1.5]);
    }

    #[test]
    fn same_day_rows_keep_input_order() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let records = vec![
            record("P", "2025-01-02", 7.0),
            record("P", "2025-01-02", 3.0),
            record("Q", "2025-01-02", 1.0),
            record("P", "2025-01-01", 9.0),
        ];
        ingest_records(&mut conn, "a", &records).unwrap();
        ingest_records(&mut conn, "a", &records).unwrap();
        let loaded = load_game_records(&conn).unwrap();
        let p: Vec<f64> = loaded
            .iter()
            .filter(|r| r.player == "P")
            .map(|r| r.stats.pts)
            .collect();
        assert_eq!(p, vec![7.0, 3.0, 9.0]);
        assert_eq!(loaded.len(), 4);
    }

    #[test]
    fn empty_ingest_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert!(ingest_records(&mut conn, "empty", &[]).is_err());
    }
}
