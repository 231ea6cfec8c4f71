//! CLI commands for obs

pub mod dispatch;
pub mod report;
