use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::cards::PlayerCard;

#[derive(Debug, Clone, Serialize)]
pub struct CardsMeta {
    pub generated_at: String,
    pub cards: usize,
    pub output: String,
}

/// Pretty JSON, two-space indent. Same cards always give the same bytes.
pub fn render_cards_json(cards: &[PlayerCard]) -> Result<String> {
    serde_json::to_string_pretty(cards).context("serialize player cards")
}

pub fn write_cards(path: &Path, cards: &[PlayerCard]) -> Result<()> {
    let json = render_cards_json(cards)?;
    write_atomic(path, &json)
}

/// `<stem>.meta.json` beside the cards file.
pub fn meta_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cards");
    output.with_file_name(format!("{stem}.meta.json"))
}

pub fn write_meta(output: &Path, cards: usize) -> Result<CardsMeta> {
    let meta = CardsMeta {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        cards,
        output: output.display().to_string(),
    };
    let json = serde_json::to_string_pretty(&meta).context("serialize cards metadata")?;
    write_atomic(&meta_path(output), &json)?;
    Ok(meta)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

/// Console lines for the best last-10 hitters.
pub fn top_hitters_summary(cards: &[PlayerCard], top_n: usize) -> Vec<String> {
    cards
        .iter()
        .take(top_n)
        .map(|card| {
            format!(
                "{:25} {:14} {:>5} -> {:>6} ({:>5}%) vs {}",
                card.name, card.prop, card.line, card.last_10, card.last_10_pct, card.opponent
            )
        })
        .collect()
}
