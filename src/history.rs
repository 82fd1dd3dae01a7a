use std::collections::HashMap;

use crate::game_log::GameRecord;
use crate::stat_kind::StatColumn;

/// Fewer games than this and hit rates are not worth showing.
pub const MIN_GAMES: usize = 5;

/// Why a player's history could not back a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryGap {
    NoGames,
    TooFewGames(usize),
}

/// Game logs indexed by exact player name, each history most-recent-first.
///
/// Games sharing a date keep their relative input order.
#[derive(Debug, Clone, Default)]
pub struct GameLogStore {
    by_player: HashMap<String, Vec<GameRecord>>,
    rows: usize,
}

impl GameLogStore {
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let rows = records.len();
        let mut by_player: HashMap<String, Vec<GameRecord>> = HashMap::new();
        for record in records {
            by_player
                .entry(record.player.clone())
                .or_default()
                .push(record);
        }
        for games in by_player.values_mut() {
            // sort_by is stable, so same-day rows stay in file order.
            games.sort_by(|a, b| b.game_date.cmp(&a.game_date));
        }
        Self { by_player, rows }
    }

    pub fn players(&self) -> usize {
        self.by_player.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Everything recorded for `player`, most recent first. Empty when unknown.
    pub fn games(&self, player: &str) -> &[GameRecord] {
        self.by_player
            .get(player)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A history usable for a card, i.e. at least [`MIN_GAMES`] games.
    pub fn history(&self, player: &str) -> Result<&[GameRecord], HistoryGap> {
        let games = self.games(player);
        match games.len() {
            0 => Err(HistoryGap::NoGames),
            n if n < MIN_GAMES => Err(HistoryGap::TooFewGames(n)),
            _ => Ok(games),
        }
    }
}

/// Per-game values for a stat, summing the given columns, in history order.
pub fn player_series(games: &[GameRecord], columns: &[StatColumn]) -> Vec<f64> {
    games.iter().map(|g| g.stats.sum(columns)).collect()
}
