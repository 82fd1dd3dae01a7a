use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_log::{GameRecord, StatLine};
use crate::line_catalog::LineEntry;
use crate::stat_kind::{StatColumn, StatKind};

const TEAMS: [&str; 10] = [
    "BOS", "NYK", "DEN", "LAL", "OKC", "MIL", "PHX", "DAL", "MIA", "GSW",
];

const DEMO_STATS: [&str; 8] = [
    "Points",
    "Rebounds",
    "Assists",
    "Threes Made",
    "Fantasy Score",
    "Pts+Rebs+Asts",
    "Pts+Rebs",
    "Steals + Blocks",
];

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub records: Vec<GameRecord>,
    pub lines: Vec<LineEntry>,
}

#[derive(Debug, Clone, Copy)]
struct PlayerProfile {
    pts: f64,
    reb: f64,
    ast: f64,
    fg3m: f64,
    stl: f64,
    blk: f64,
    tov: f64,
}

/// Synthetic season: `players` players with `games` games each, plus lines near each
/// player's true averages. The same seed always yields the same dataset.
pub fn demo_dataset(seed: u64, players: usize, games: usize) -> DemoDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let season_end = NaiveDate::from_ymd_opt(2025, 4, 13).unwrap_or_default();
    let mut records = Vec::with_capacity(players * games);
    let mut lines = Vec::new();

    for idx in 0..players {
        let name = format!("Demo Player {:03}", idx + 1);
        let team = TEAMS[idx % TEAMS.len()];
        let opponent = TEAMS[(idx + 3) % TEAMS.len()];
        let profile = PlayerProfile {
            pts: rng.gen_range(6.0..32.0),
            reb: rng.gen_range(2.0..13.0),
            ast: rng.gen_range(1.0..10.0),
            fg3m: rng.gen_range(0.2..4.5),
            stl: rng.gen_range(0.3..2.2),
            blk: rng.gen_range(0.1..2.5),
            tov: rng.gen_range(0.5..4.0),
        };

        for game in 0..games {
            let stats = sample_game(&mut rng, profile);
            records.push(GameRecord {
                player: name.clone(),
                game_date: season_end - ChronoDuration::days((game as i64) * 2),
                stats,
            });
        }

        // Singles first so the catalog itself respects composition order.
        for stat in DEMO_STATS {
            let Some(kind) = StatKind::parse(stat) else { continue };
            let center = kind
                .spec()
                .columns
                .iter()
                .map(|c| profile_value(profile, *c))
                .sum::<f64>();
            let line = (center * rng.gen_range(0.85..1.15) * 2.0).floor() / 2.0 + 0.5;
            lines.push(LineEntry::new(&name, team, stat, line, Some(opponent)));
        }
    }

    DemoDataset { records, lines }
}

fn sample_game(rng: &mut StdRng, p: PlayerProfile) -> StatLine {
    let mut draw = |mean: f64| (mean * rng.gen_range(0.4..1.6)).round().max(0.0);
    let pts = draw(p.pts);
    let reb = draw(p.reb);
    let ast = draw(p.ast);
    let fg3m = draw(p.fg3m);
    let stl = draw(p.stl);
    let blk = draw(p.blk);
    let tov = draw(p.tov);
    // PrizePicks-style fantasy scoring.
    let fp = pts + 1.2 * reb + 1.5 * ast + 3.0 * (stl + blk) - tov;
    StatLine {
        pts,
        reb,
        ast,
        fg3m,
        stl,
        blk,
        tov,
        fp,
    }
}

fn profile_value(p: PlayerProfile, column: StatColumn) -> f64 {
    match column {
        StatColumn::Pts => p.pts,
        StatColumn::Reb => p.reb,
        StatColumn::Ast => p.ast,
        StatColumn::Fg3m => p.fg3m,
        StatColumn::Stl => p.stl,
        StatColumn::Blk => p.blk,
        StatColumn::Tov => p.tov,
        StatColumn::Fp => p.pts + 1.2 * p.reb + 1.5 * p.ast + 3.0 * (p.stl + p.blk) - p.tov,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let a = demo_dataset(7, 3, 12);
        let b = demo_dataset(7, 3, 12);
        assert_eq!(a.records, b.records);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.records.len(), 36);
        assert_eq!(a.lines.len(), 3 * DEMO_STATS.len());
    }

    #[test]
    fn every_demo_stat_resolves() {
        let data = demo_dataset(1, 1, 5);
        assert!(data.lines.iter().all(|l| l.kind().is_some()));
    }
}
