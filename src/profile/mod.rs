//! Frame profiling module
//!
//! Collects per-frame timings into running statistics and writes session
//! reports.

mod collector;
mod report;

pub use collector::{MILLIS_PER_SECOND, Profiler};
pub use report::{ProfileSnapshot, ReportError};
