use anyhow::{Context, Result};
use tracing::info;

use crate::card_export;
use crate::cards::{BuildReport, build_cards};
use crate::config::RunConfig;
use crate::fake_logs;
use crate::game_log::{self, GameRecord};
use crate::history::GameLogStore;
use crate::line_catalog::{self, LineEntry};
use crate::log_db;
use crate::output;

const DEMO_SEED: u64 = 2025;
const DEMO_PLAYERS: usize = 40;
const DEMO_GAMES: usize = 60;

/// Read both inputs, build cards, and write every configured output.
pub fn run(cfg: &RunConfig) -> Result<BuildReport> {
    let (records, lines) = load_inputs(cfg)?;
    let store = GameLogStore::from_records(records);
    info!(
        players = store.players(),
        rows = store.rows(),
        lines = lines.len(),
        "inputs ready"
    );

    let report = build_cards(&store, &lines);

    output::write_cards(&cfg.output_path, &report.cards)?;
    let meta = output::write_meta(&cfg.output_path, report.cards.len())?;
    info!(
        path = %meta.output,
        cards = meta.cards,
        generated_at = %meta.generated_at,
        "wrote cards"
    );

    if let Some(xlsx) = cfg.xlsx_path.as_deref() {
        let rows = card_export::export_cards_xlsx(xlsx, &report.cards)?;
        info!(path = %xlsx.display(), rows, "wrote workbook");
    }
    Ok(report)
}

fn load_inputs(cfg: &RunConfig) -> Result<(Vec<GameRecord>, Vec<LineEntry>)> {
    if cfg.demo {
        let data = fake_logs::demo_dataset(DEMO_SEED, DEMO_PLAYERS, DEMO_GAMES);
        return Ok((data.records, data.lines));
    }

    let records = match cfg.gamelogs_db.as_deref() {
        Some(db) => {
            let conn = log_db::open_db(db)?;
            log_db::load_game_records(&conn)
                .with_context(|| format!("load game logs from {}", db.display()))?
        }
        None => game_log::load_game_logs(&cfg.gamelogs_path)
            .with_context(|| format!("load game logs {}", cfg.gamelogs_path.display()))?,
    };
    let lines = line_catalog::load_lines(&cfg.lines_path)
        .with_context(|| format!("load line catalog {}", cfg.lines_path.display()))?;
    Ok((records, lines))
}
