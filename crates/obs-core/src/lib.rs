//! Obs Core Library
//!
//! Note mutation, backup, configuration, and generation logic for the `obs`
//! vault CLI.

pub mod backup;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generation;
pub mod logging;
pub mod note;
pub mod vault;
