use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::history::{GameLogStore, HistoryGap, player_series};
use crate::line_catalog::LineEntry;
use crate::projection::{ProjectionCache, project};
use crate::stat_kind::{LineStat, StatKind};
use crate::window::{Window, aggregate, round_to};

/// One (player, line) summary handed to the renderer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub name: String,
    pub team: String,
    pub opponent: String,
    pub prop: String,
    pub line: f64,
    pub last_5: String,
    pub last_5_pct: f64,
    pub last_10: String,
    pub last_10_pct: f64,
    pub last_20: String,
    pub last_20_pct: f64,
    pub season: String,
    pub season_pct: f64,
    pub avg: f64,
    pub games: usize,
    pub last_10_values: Vec<f64>,
    pub projection: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedStat(String),
    NoHistory,
    InsufficientHistory(usize),
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub cards: Vec<PlayerCard>,
    pub unsupported_stat: usize,
    pub no_history: usize,
    pub insufficient_history: usize,
}

impl BuildReport {
    pub fn skipped(&self) -> usize {
        self.unsupported_stat + self.no_history + self.insufficient_history
    }

    fn count_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::UnsupportedStat(_) => self.unsupported_stat += 1,
            SkipReason::NoHistory => self.no_history += 1,
            SkipReason::InsufficientHistory(_) => self.insufficient_history += 1,
        }
    }
}

/// Build and rank cards for every catalog line.
///
/// Single-stat lines are processed before combo lines so combo projections can be
/// composed from the singles regardless of where they sit in the catalog. Output is
/// ordered by last-10 hit rate, descending, with catalog order breaking ties.
pub fn build_cards(store: &GameLogStore, catalog: &[LineEntry]) -> BuildReport {
    let mut cache = ProjectionCache::new();
    let mut slots: Vec<Option<PlayerCard>> = vec![None; catalog.len()];
    let mut report = BuildReport::default();

    let singles_first = catalog
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.kind().is_some_and(StatKind::is_combo))
        .chain(
            catalog
                .iter()
                .enumerate()
                .filter(|(_, e)| e.kind().is_some_and(StatKind::is_combo)),
        );

    for (idx, entry) in singles_first {
        match build_card(store, &mut cache, entry) {
            Ok(card) => slots[idx] = Some(card),
            Err(reason) => {
                debug!(player = %entry.player, ?reason, "skipping line");
                report.count_skip(&reason);
            }
        }
    }

    report.cards = slots.into_iter().flatten().collect();
    sort_by_last_10(&mut report.cards);

    info!(
        cards = report.cards.len(),
        skipped = report.skipped(),
        unsupported_stat = report.unsupported_stat,
        no_history = report.no_history,
        insufficient_history = report.insufficient_history,
        cached_projections = cache.len(),
        "built player cards"
    );
    report
}

/// Card for one line, using and feeding `cache`.
pub fn build_card(
    store: &GameLogStore,
    cache: &mut ProjectionCache,
    entry: &LineEntry,
) -> Result<PlayerCard, SkipReason> {
    let kind = match &entry.stat {
        LineStat::Known(kind) => *kind,
        LineStat::Unsupported(raw) => return Err(SkipReason::UnsupportedStat(raw.clone())),
    };
    let games = store.history(&entry.player).map_err(|gap| match gap {
        HistoryGap::NoGames => SkipReason::NoHistory,
        HistoryGap::TooFewGames(n) => SkipReason::InsufficientHistory(n),
    })?;

    let spec = kind.spec();
    let values = player_series(games, &spec.columns);

    let [l5, l10, l20, season] = Window::CARD_WINDOWS.map(|w| aggregate(&values, w, entry.line));
    let projection = project(cache, &entry.player, kind, &values);

    let last_10_values = values.iter().take(10).rev().copied().collect();

    Ok(PlayerCard {
        name: entry.player.clone(),
        team: entry.team.clone(),
        opponent: entry.opponent.clone(),
        prop: spec.display_name.to_string(),
        line: entry.line,
        last_5: l5.fraction(),
        last_5_pct: l5.pct(),
        last_10: l10.fraction(),
        last_10_pct: l10.pct(),
        last_20: l20.fraction(),
        last_20_pct: l20.pct(),
        season: season.fraction(),
        season_pct: season.pct(),
        avg: round_to(season.mean, 1),
        games: season.games,
        last_10_values,
        projection,
    })
}

/// Stable, descending by `last_10_pct`.
pub fn sort_by_last_10(cards: &mut [PlayerCard]) {
    cards.sort_by(|a, b| b.last_10_pct.total_cmp(&a.last_10_pct));
}
