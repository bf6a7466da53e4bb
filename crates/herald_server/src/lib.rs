//! Scheduling for Herald post cycles.
//!
//! Operators configure wall-clock times of day (`HH:MM`). Each time becomes a
//! daily cron expression, and the [`CycleScheduler`] spawns one task per time
//! that fires the supplied job on the local clock.
//!
//! # Example
//!
//! ```
//! use herald_server::{ScheduleTime, parse_schedule_times};
//!
//! let times = parse_schedule_times("09:00, 15:30").unwrap();
//! assert_eq!(times[1], ScheduleTime::new(15, 30).unwrap());
//! assert_eq!(times[1].cron_expression(), "30 15 * * *");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod schedule;
mod scheduler;

pub use schedule::{ScheduleTime, parse_schedule_times};
pub use scheduler::CycleScheduler;
