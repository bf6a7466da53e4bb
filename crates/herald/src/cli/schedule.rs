//! Schedule listing.

use chrono::Local;
use herald::ScheduleTime;
use std::process::ExitCode;

/// Print each time with its cron expression and next local firing.
pub fn show_schedule(times: &[ScheduleTime]) -> ExitCode {
    let now = Local::now();
    for time in times {
        let next = time
            .next_after(&now)
            .map(|next| next.format("%Y-%m-%d %H:%M %Z").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!("{}  cron: {:<12}  next: {}", time, time.cron_expression(), next);
    }
    ExitCode::SUCCESS
}
