use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use prop_cards::config::{self, arg_value};
use prop_cards::{game_log, init_tracing, log_db};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let logs_path = arg_value(&args, "--logs")
        .or_else(|| std::env::var("GAMELOGS_PATH").ok())
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("pass --logs <file> or set GAMELOGS_PATH"))?;

    let db_path = arg_value(&args, "--db")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("GAMELOGS_DB")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
        })
        .or_else(config::default_db_path)
        .context("unable to resolve sqlite path")?;

    let records = game_log::load_game_logs(&logs_path)
        .with_context(|| format!("load game logs {}", logs_path.display()))?;

    let mut conn = log_db::open_db(&db_path)?;
    let summary =
        log_db::ingest_records(&mut conn, &logs_path.display().to_string(), &records)?;

    println!("Game log ingest complete");
    println!("DB: {}", db_path.display());
    println!("Source: {}", summary.source);
    println!("Rows upserted: {}", summary.rows_upserted);
    println!("Players: {}", summary.players);
    println!(
        "Latest game: {}",
        summary.latest_game_date.as_deref().unwrap_or("n/a")
    );
    Ok(())
}
