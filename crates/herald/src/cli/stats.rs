//! History statistics report.

use herald::{HistoryLedger, HistoryStats, describe_entry};
use herald_error::HeraldResult;
use std::path::Path;
use std::process::ExitCode;

/// Print statistics for the history at `path`.
pub async fn show_stats(path: &Path, recent: usize) -> HeraldResult<ExitCode> {
    let ledger = HistoryLedger::new(path);
    let Some(history) = ledger.read().await? else {
        println!("No posts yet");
        return Ok(ExitCode::SUCCESS);
    };

    let stats = HistoryStats::from_history(&history);

    println!("Post history: {}", path.display());
    println!("Total posts:  {}", stats.total_posts());
    println!("Last updated: {}", stats.last_updated().to_rfc3339());
    println!();

    println!("By platform:");
    for (platform, counts) in stats.platforms() {
        println!(
            "  {:<8} {:>4} ok  {:>4} failed  {:>5.1}%",
            platform.as_ref(),
            counts.success(),
            counts.failed(),
            counts.rate()
        );
    }
    let overall = stats.overall();
    println!(
        "  {:<8} {:>4} ok  {:>4} failed  {:>5.1}%",
        "total",
        overall.success(),
        overall.failed(),
        overall.rate()
    );
    println!();

    println!("Recent posts:");
    for entry in history.recent(recent) {
        println!("  {}", describe_entry(entry));
    }
    println!();

    println!("Unique ideas used: {}", stats.unique_ideas());
    Ok(ExitCode::SUCCESS)
}
