//! # harmony-session
//!
//! Session orchestration for the Harmony schema engine: wires a collector,
//! the schema registry, and the pass pipeline into the standard load path,
//! and exposes instance construction (`instantiate`) and layered conformance
//! checking (`validate`) over the flattened schemas.
//!
//! Configuration is explicit: [`HarmonyConfig`] carries the schema search
//! paths used to build the default filesystem collector.

pub mod config;
pub mod session;

pub use config::{ConfigError, HarmonyConfig};
pub use session::{SchemaRef, Session};
