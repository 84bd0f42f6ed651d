//! Summarization pipeline
//!
//! - `artifacts`: typed stage outputs (`ScoreVector`, `Summary`, `SummaryOutcome`)
//! - `observer`: stage-boundary hooks and timing reports
//! - `traits`: stage traits with zero-cost defaults
//! - `runner`: the `Summarizer` that executes the stages in order

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod traits;
