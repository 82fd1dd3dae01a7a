/// A most-recent-first slice of a player's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Last(usize),
    Season,
}

impl Window {
    pub const CARD_WINDOWS: [Window; 4] = [
        Window::Last(5),
        Window::Last(10),
        Window::Last(20),
        Window::Season,
    ];

    fn len_for(self, available: usize) -> usize {
        match self {
            Window::Last(n) => n.min(available),
            Window::Season => available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub hits: usize,
    pub games: usize,
    pub mean: f64,
}

impl WindowStats {
    /// `"hits/games"`, the form cards display.
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.hits, self.games)
    }

    /// Hit percentage to one decimal. Zero games reads as 0.0.
    pub fn pct(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        round_to(self.hits as f64 / self.games as f64 * 100.0, 1)
    }
}

/// Hits (strictly above `line`), games considered and mean over the leading `window` values.
/// Short histories shrink the window instead of padding it.
pub fn aggregate(values: &[f64], window: Window, line: f64) -> WindowStats {
    let games = window.len_for(values.len());
    let slice = &values[..games];
    let hits = slice.iter().filter(|v| **v > line).count();
    WindowStats {
        hits,
        games,
        mean: mean(slice),
    }
}

/// Mean of the leading `window` values.
pub fn window_mean(values: &[f64], window: Window) -> f64 {
    mean(&values[..window.len_for(values.len())])
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round half away from zero at `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_shrinks_denominator() {
        let values = [10.0, 20.0, 30.0];
        let stats = aggregate(&values, Window::Last(10), 15.0);
        assert_eq!(stats.games, 3);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.fraction(), "2/3");
    }

    #[test]
    fn window_bounds_hold_for_every_size() {
        let values: Vec<f64> = (0..23).map(|v| v as f64).collect();
        for len in 0..values.len() {
            let series = &values[..len];
            for window in [Window::Last(0), Window::Last(5), Window::Last(20), Window::Season] {
                let stats = aggregate(series, window, 7.0);
                let expect = match window {
                    Window::Last(n) => n.min(len),
                    Window::Season => len,
                };
                assert_eq!(stats.games, expect);
                assert!(stats.hits <= stats.games);
            }
        }
    }

    #[test]
    fn tie_with_line_is_not_a_hit() {
        let stats = aggregate(&[18.0, 18.0, 18.5], Window::Season, 18.0);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn empty_window_mean_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        let stats = aggregate(&[], Window::Last(5), 1.0);
        assert_eq!(stats.games, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.pct(), 0.0);
    }

    #[test]
    fn pct_rounds_to_one_decimal() {
        let stats = WindowStats {
            hits: 2,
            games: 3,
            mean: 0.0,
        };
        assert_eq!(stats.pct(), 66.7);
        let stats = WindowStats {
            hits: 1,
            games: 3,
            mean: 0.0,
        };
        assert_eq!(stats.pct(), 33.3);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.125, 2), 0.13);
    }
}
