//! idcloud CLI library
//!
//! The binary in main.rs only parses arguments and sets up logging; all
//! modules live here so integration tests can drive operations directly.

pub mod api;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod ops;
pub mod output;
