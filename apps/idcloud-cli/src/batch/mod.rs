//! Bulk operation support
//!
//! - `progress`: indicatif bars and spinners
//! - `result`: per-item outcome tracking

pub mod progress;
pub mod result;

pub use result::{BatchItemResult, BatchItemStatus, BatchResult};
