//! # harmony-core
//!
//! Foundational types shared across the Harmony schema engine:
//! - The schema/instance document model (`serde_json` trees) and `harmony:`
//!   identifier helpers
//! - The target-precedence merge used by mixin expansion, with per-path hints
//! - Instance lifecycle field constants and resubmission helpers
//! - The cross-crate error type

pub mod document;
pub mod error;
pub mod instance;
pub mod merge;

pub use document::Document;
pub use error::HarmonyError;
pub use merge::{Hints, MergeHint, hints_from_value, merge};
