use std::env;
use std::path::PathBuf;

pub const DEFAULT_GAMELOGS_PATH: &str = "Full_Gamelogs25.csv";
pub const DEFAULT_LINES_PATH: &str = "NBA_PURE_STANDARD_SINGLE.json";
pub const DEFAULT_OUTPUT_PATH: &str = "PLAYER_UI_CARDS_PERFECT.json";
const DEFAULT_TOP_N: usize = 5;
const MAX_TOP_N: usize = 50;
const CACHE_DIR: &str = "prop_cards";

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub gamelogs_path: PathBuf,
    pub lines_path: PathBuf,
    pub output_path: PathBuf,
    pub xlsx_path: Option<PathBuf>,
    pub gamelogs_db: Option<PathBuf>,
    pub top_n: usize,
    pub demo: bool,
}

impl RunConfig {
    /// Load `.env.local`/`.env`, then resolve from the environment and process args.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        let args = env::args().skip(1).collect::<Vec<_>>();
        Self::resolve(&args, |key| env::var(key).ok())
    }

    /// CLI flags win over env vars, env vars win over defaults.
    pub fn resolve(args: &[String], env_var: impl Fn(&str) -> Option<String>) -> Self {
        let env_path = |key: &str| {
            env_var(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let gamelogs_path = arg_value(args, "--logs")
            .map(PathBuf::from)
            .or_else(|| env_path("GAMELOGS_PATH"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GAMELOGS_PATH));
        let lines_path = arg_value(args, "--lines")
            .map(PathBuf::from)
            .or_else(|| env_path("PP_LINES_PATH"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LINES_PATH));
        let output_path = arg_value(args, "--out")
            .map(PathBuf::from)
            .or_else(|| env_path("OUTPUT_PATH"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
        let xlsx_path = arg_value(args, "--xlsx")
            .map(PathBuf::from)
            .or_else(|| env_path("CARDS_XLSX_PATH"));
        let gamelogs_db = arg_value(args, "--db")
            .map(PathBuf::from)
            .or_else(|| env_path("GAMELOGS_DB"));
        let top_n = arg_value(args, "--top")
            .or_else(|| env_var("CARDS_TOP_N"))
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOP_N)
            .min(MAX_TOP_N);
        let demo = args.iter().any(|a| a == "--demo");

        Self {
            gamelogs_path,
            lines_path,
            output_path,
            xlsx_path,
            gamelogs_db,
            top_n,
            demo,
        }
    }
}

/// Value for `--flag value` or `--flag=value`; blank values are ignored.
pub fn arg_value(args: &[String], flag: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg
            .strip_prefix(flag)
            .and_then(|rest| rest.strip_prefix('='))
        {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
            && !next.starts_with("--")
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("game_logs.sqlite"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_env_or_args() {
        let cfg = RunConfig::resolve(&[], |_| None);
        assert_eq!(cfg.gamelogs_path, PathBuf::from(DEFAULT_GAMELOGS_PATH));
        assert_eq!(cfg.lines_path, PathBuf::from(DEFAULT_LINES_PATH));
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.xlsx_path, None);
        assert_eq!(cfg.top_n, 5);
        assert!(!cfg.demo);
    }

    #[test]
    fn args_override_env() {
        let env = HashMap::from([
            ("GAMELOGS_PATH", "env_logs.csv"),
            ("PP_LINES_PATH", "env_lines.json"),
            ("CARDS_TOP_N", "500"),
        ]);
        let cfg = RunConfig::resolve(&args(&["--logs=cli_logs.csv", "--demo"]), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(cfg.gamelogs_path, PathBuf::from("cli_logs.csv"));
        assert_eq!(cfg.lines_path, PathBuf::from("env_lines.json"));
        assert_eq!(cfg.top_n, 50);
        assert!(cfg.demo);
    }

    #[test]
    fn arg_value_forms() {
        let a = args(&["--out", "cards.json", "--xlsx=", "--db", "--top", "3"]);
        assert_eq!(arg_value(&a, "--out").as_deref(), Some("cards.json"));
        assert_eq!(arg_value(&a, "--xlsx"), None);
        assert_eq!(arg_value(&a, "--db"), None);
        assert_eq!(arg_value(&a, "--top").as_deref(), Some("3"));
        assert_eq!(arg_value(&a, "--lines"), None);
    }
}
