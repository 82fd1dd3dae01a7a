use std::collections::BTreeMap;

use crate::stat_kind::{BaseStat, ComboStat, StatKind};
use crate::window::{Window, round_to, window_mean};

pub const WEIGHT_LAST_5: f64 = 0.30;
pub const WEIGHT_LAST_10: f64 = 0.40;
pub const WEIGHT_LAST_20: f64 = 0.20;
pub const WEIGHT_SEASON: f64 = 0.10;

/// Single-stat projections already computed this run, keyed by (player, stat).
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    entries: BTreeMap<(String, BaseStat), f64>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a projection. Stats that do not seed combos are ignored.
    pub fn record(&mut self, player: &str, stat: BaseStat, projection: f64) {
        if stat.seeds_projection_cache() {
            self.entries.insert((player.to_string(), stat), projection);
        }
    }

    pub fn get(&self, player: &str, stat: BaseStat) -> Option<f64> {
        self.entries.get(&(player.to_string(), stat)).copied()
    }

    /// Rounded sum of whichever components are cached, or `None` if none are.
    pub fn compose(&self, player: &str, combo: ComboStat) -> Option<f64> {
        let found: Vec<f64> = combo
            .components()
            .iter()
            .filter_map(|stat| self.get(player, *stat))
            .collect();
        if found.is_empty() {
            None
        } else {
            Some(round_to(found.iter().sum(), 2))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Weighted blend of the last-5/10/20 and season means, rounded to 2 decimals.
pub fn blended_projection(values: &[f64]) -> f64 {
    let raw = WEIGHT_LAST_5 * window_mean(values, Window::Last(5))
        + WEIGHT_LAST_10 * window_mean(values, Window::Last(10))
        + WEIGHT_LAST_20 * window_mean(values, Window::Last(20))
        + WEIGHT_SEASON * window_mean(values, Window::Season);
    round_to(raw, 2)
}

/// Projection for a player's stat series.
///
/// Singles blend their own series and seed the cache when eligible. Combos prefer
/// summing cached component projections and fall back to blending the combo series.
pub fn project(
    cache: &mut ProjectionCache,
    player: &str,
    kind: StatKind,
    values: &[f64],
) -> f64 {
    match kind {
        StatKind::Single(stat) => {
            let projection = blended_projection(values);
            cache.record(player, stat, projection);
            projection
        }
        StatKind::Combo(combo) => cache
            .compose(player, combo)
            .unwrap_or_else(|| blended_projection(values)),
    }
}
