use anyhow::Result;

use prop_cards::config::RunConfig;
use prop_cards::{init_tracing, output, pipeline};

fn main() -> Result<()> {
    let cfg = RunConfig::load();
    init_tracing();

    let report = pipeline::run(&cfg)?;

    println!(
        "Built {} player cards ({} lines skipped)",
        report.cards.len(),
        report.skipped()
    );
    println!("File: {}", cfg.output_path.display());
    if let Some(xlsx) = cfg.xlsx_path.as_deref() {
        println!("Workbook: {}", xlsx.display());
    }

    if cfg.top_n > 0 && !report.cards.is_empty() {
        println!();
        println!("Top {} hitters (last 10 games):", cfg.top_n.min(report.cards.len()));
        for line in output::top_hitters_summary(&report.cards, cfg.top_n) {
            println!("{line}");
        }
    }
    Ok(())
}
