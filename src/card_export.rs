use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::cards::PlayerCard;

const HEADERS: [&str; 17] = [
    "Player",
    "Team",
    "Opponent",
    "Prop",
    "Line",
    "Last 5",
    "Last 5 %",
    "Last 10",
    "Last 10 %",
    "Last 20",
    "Last 20 %",
    "Season",
    "Season %",
    "Avg",
    "Games",
    "Last 10 Values",
    "Projection",
];

enum Cell {
    Text(String),
    Number(f64),
}

pub fn export_cards_xlsx(path: &Path, cards: &[PlayerCard]) -> Result<usize> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Cards")?;
        for (col_idx, header) in HEADERS.iter().enumerate() {
            sheet
                .write_string(0, col_idx as u16, *header)
                .with_context(|| format!("write header {header}"))?;
        }
        for (idx, card) in cards.iter().enumerate() {
            write_row(sheet, (idx + 1) as u32, &card_row(card))?;
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(cards.len())
}

fn card_row(card: &PlayerCard) -> Vec<Cell> {
    let values = card
        .last_10_values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        Cell::Text(card.name.clone()),
        Cell::Text(card.team.clone()),
        Cell::Text(card.opponent.clone()),
        Cell::Text(card.prop.clone()),
        Cell::Number(card.line),
        Cell::Text(card.last_5.clone()),
        Cell::Number(card.last_5_pct),
        Cell::Text(card.last_10.clone()),
        Cell::Number(card.last_10_pct),
        Cell::Text(card.last_20.clone()),
        Cell::Number(card.last_20_pct),
        Cell::Text(card.season.clone()),
        Cell::Number(card.season_pct),
        Cell::Number(card.avg),
        Cell::Number(card.games as f64),
        Cell::Text(values),
        Cell::Number(card.projection),
    ]
}

fn write_row(worksheet: &mut Worksheet, row_idx: u32, row: &[Cell]) -> Result<()> {
    for (col_idx, cell) in row.iter().enumerate() {
        let col = col_idx as u16;
        match cell {
            Cell::Text(value) => worksheet.write_string(row_idx, col, value),
            Cell::Number(value) => worksheet.write_number(row_idx, col, *value),
        }
        .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
    }
    Ok(())
}
