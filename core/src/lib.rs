//! Enkai core: task splitting, cost estimation, bounded-concurrency dispatch
//! and batch reporting.

pub mod api;
pub mod config;
pub mod error;
pub mod estimate;
pub mod executor;
pub mod report;
pub mod task;
