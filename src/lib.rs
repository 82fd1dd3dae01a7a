pub mod card_export;
pub mod cards;
pub mod config;
pub mod fake_logs;
pub mod game_log;
pub mod history;
pub mod line_catalog;
pub mod log_db;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod stat_kind;
pub mod window;

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
