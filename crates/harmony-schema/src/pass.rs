//! Registry pipeline passes.

use harmony_core::HarmonyError;

use crate::{SchemaRegistry, Validator};

/// One step of the registry pipeline. Passes mutate registered schemas in
/// place and run in a caller-defined order; any error aborts the pipeline.
pub trait Pass {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Process every schema currently registered.
    ///
    /// # Errors
    ///
    /// Any [`HarmonyError`]; the enclosing refresh fails fast.
    fn process(&self, registry: &mut SchemaRegistry) -> Result<(), HarmonyError>;
}

/// Checks every raw schema document against the extended meta-schema.
///
/// Runs before mixin expansion so composition directives must themselves be
/// well-formed before they are consumed. Fails fast on the first invalid
/// schema.
#[derive(Debug, Default)]
pub struct SchemaValidatorPass;

impl SchemaValidatorPass {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Pass for SchemaValidatorPass {
    fn name(&self) -> &'static str {
        "schema-validator"
    }

    fn process(&self, registry: &mut SchemaRegistry) -> Result<(), HarmonyError> {
        for (id, schema) in registry.iter() {
            tracing::debug!(schema = id, "checking schema against meta-schema");
            Validator::check_schema(schema)?;
        }
        Ok(())
    }
}
