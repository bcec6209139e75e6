//! Cross-crate error types for the Harmony schema engine.
//!
//! Schema loading and resolution failures are errors: a malformed or
//! conflicting schema set is a developer-facing condition that aborts the
//! enclosing refresh. Instance nonconformance is deliberately NOT represented
//! here; instance validation returns structured fault collections as data.

use thiserror::Error;

/// Errors raised while loading, registering, or resolving schemas.
#[derive(Debug, Error)]
pub enum HarmonyError {
    /// A schema with the same id is already registered.
    #[error("A schema is already registered with id {id}")]
    SchemaConflict { id: String },

    /// Lookup by id returned no schema.
    #[error("No schema found with id {id}")]
    NotFound { id: String },

    /// A document submitted for registration has no string `id` field.
    #[error("Schema document does not declare a string 'id' field")]
    MissingId,

    /// A schema failed validation against the extended meta-schema.
    #[error("Schema {id} does not conform to the meta-schema: {detail}")]
    SchemaInvalid { id: String, detail: String },

    /// A mixin directive has no `$ref` entry.
    #[error("Mixin directive is missing a '$ref' entry")]
    MissingReference,

    /// An instance submitted for validation declares no `harmony_type`.
    #[error("Instance does not declare a harmony_type")]
    MissingType,

    /// The collector failed to produce schema documents.
    #[error("Schema collection failed: {detail}")]
    Collect { detail: String },
}
