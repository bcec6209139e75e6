//! Session orchestration.
//!
//! A session wires a collector, the schema registry, and an ordered pass
//! pipeline into the standard load path, then exposes `instantiate` and
//! `validate` over the flattened schemas.
//!
//! The session is synchronous and single-threaded: `refresh` fully replaces
//! registry state and must not be interleaved with concurrent reads or
//! another refresh. Callers serialize access or build a fresh session and
//! swap it in.

use serde_json::{Map, Value};

use harmony_collect::{Collect, FilesystemCollector};
use harmony_core::{Document, HarmonyError, instance};
use harmony_schema::{
    MixinResolver, Pass, SchemaRegistry, SchemaValidatorPass, ValidationFault, Validator,
};

use crate::config::HarmonyConfig;

/// A schema argument: either a registered id or an inline document.
#[derive(Debug, Clone, Copy)]
pub enum SchemaRef<'a> {
    Id(&'a str),
    Document(&'a Document),
}

impl<'a> From<&'a str> for SchemaRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a Document> for SchemaRef<'a> {
    fn from(document: &'a Document) -> Self {
        Self::Document(document)
    }
}

/// A configuration of the engine's components in the standard way.
pub struct Session {
    registry: SchemaRegistry,
    collector: Box<dyn Collect>,
    passes: Vec<Box<dyn Pass>>,
}

impl Session {
    /// Build a session with the default pipeline: meta-schema validation,
    /// then mixin expansion. Construction does not collect; call
    /// [`refresh`](Self::refresh) to load schemas.
    #[must_use]
    pub fn new(collector: impl Collect + 'static) -> Self {
        Self::with_passes(
            collector,
            vec![
                Box::new(SchemaValidatorPass::new()),
                Box::new(MixinResolver::new()),
            ],
        )
    }

    /// Build a session with an explicit pass pipeline, run in order.
    #[must_use]
    pub fn with_passes(collector: impl Collect + 'static, passes: Vec<Box<dyn Pass>>) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            collector: Box::new(collector),
            passes,
        }
    }

    /// Build a session over a filesystem collector configured from
    /// `config`'s search paths.
    #[must_use]
    pub fn from_config(config: &HarmonyConfig) -> Self {
        Self::new(FilesystemCollector::new(config.schema_paths()))
    }

    /// Read access to the registered (post-pipeline) schemas.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Discover schemas and rebuild the registry: clear, register every
    /// collected document, then run each pass in order.
    ///
    /// This is the only end-to-end mutation of registry contents; a failure
    /// leaves no partially-processed schema set behind the caller's back;
    /// the error propagates and the caller fixes the schema source and
    /// retries.
    ///
    /// # Errors
    ///
    /// `Collect` when discovery fails; `SchemaConflict` when two collected
    /// documents share an id; any pass error (`SchemaInvalid`, `NotFound`,
    /// `MissingReference`) unchanged.
    pub fn refresh(&mut self) -> Result<(), HarmonyError> {
        self.registry.clear();

        let documents = self.collector.collect().map_err(HarmonyError::from)?;
        tracing::debug!(count = documents.len(), "collected schema documents");
        for document in documents {
            self.registry.add(document)?;
        }

        for pass in &self.passes {
            tracing::debug!(pass = pass.name(), "running registry pass");
            pass.process(&mut self.registry)?;
        }
        Ok(())
    }

    /// Construct an instance of a schema, seeded with `seed` (an empty
    /// mapping when `None`). Only required properties with truthy default
    /// values are filled in; values already present in the seed take
    /// precedence over schema defaults.
    ///
    /// # Errors
    ///
    /// `NotFound` when `schema` is an unregistered id.
    pub fn instantiate<'a>(
        &'a self,
        schema: impl Into<SchemaRef<'a>>,
        seed: Option<Value>,
    ) -> Result<Value, HarmonyError> {
        let schema = self.resolve(schema.into())?;
        let mut data = seed.unwrap_or_else(|| Value::Object(Map::new()));
        fill(schema, &mut data);
        Ok(data)
    }

    /// Layered, fail-fast conformance check.
    ///
    /// 1. Validate against the base schema (`harmony:/base`); faults gate
    ///    everything deeper, so an instance that is not structurally
    ///    well-formed produces no cascade of type-specific noise.
    /// 2. Validate against the schema named by the instance's
    ///    `harmony_type`.
    /// 3. Validate against each of `additional_schemas`.
    ///
    /// Faults are data: the returned collection is empty for a conforming
    /// instance. Every fault is annotated with the schema it was raised
    /// against.
    ///
    /// # Errors
    ///
    /// `NotFound` for unregistered ids, `SchemaInvalid` for an uncompilable
    /// inline schema, `MissingType` when step 2 is reached but the instance
    /// declares no `harmony_type`.
    pub fn validate(
        &self,
        instance: &Value,
        additional_schemas: &[SchemaRef<'_>],
    ) -> Result<Vec<ValidationFault>, HarmonyError> {
        let faults = self.validate_against(instance, &[SchemaRef::Id(instance::BASE_SCHEMA_ID)])?;
        if !faults.is_empty() {
            return Ok(faults);
        }

        let type_id = instance
            .get(instance::HARMONY_TYPE)
            .and_then(Value::as_str)
            .ok_or(HarmonyError::MissingType)?;
        let faults = self.validate_against(instance, &[SchemaRef::Id(type_id)])?;
        if !faults.is_empty() {
            return Ok(faults);
        }

        self.validate_against(instance, additional_schemas)
    }

    fn validate_against(
        &self,
        instance: &Value,
        schemas: &[SchemaRef<'_>],
    ) -> Result<Vec<ValidationFault>, HarmonyError> {
        let mut faults = Vec::new();
        for reference in schemas {
            let schema = self.resolve(*reference)?;
            let validator = Validator::for_schema(schema)?;
            faults.extend(
                validator
                    .iter_errors(instance)
                    .into_iter()
                    .map(|fault| fault.with_schema(schema.clone())),
            );
        }
        Ok(faults)
    }

    fn resolve<'a>(&'a self, reference: SchemaRef<'a>) -> Result<&'a Document, HarmonyError> {
        match reference {
            SchemaRef::Id(id) => self.registry.get(id),
            SchemaRef::Document(document) => Ok(document),
        }
    }
}

/// Recursive default-fill over `schema.properties`.
///
/// Non-required leaf properties are never defaulted; non-required nested
/// objects are recursed into only when the seed already started them.
/// Falsy defaults (`0`, `false`, `""`, `null`, empty containers) are never
/// applied, a long-standing quirk preserved as observable behavior rather
/// than silently corrected.
fn fill(schema: &Value, data: &mut Value) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };
    if !data.is_object() {
        return;
    }
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, subschema) in properties {
        let is_required = required.contains(&name.as_str());
        let is_object = subschema.get("type").and_then(Value::as_str) == Some("object");
        let present = data.get(name).is_some();

        if !is_required && (!is_object || !present) {
            continue;
        }

        if is_object {
            if let Some(fields) = data.as_object_mut() {
                let entry = fields
                    .entry(name.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                fill(subschema, entry);
            }
        } else if let Some(default) = subschema.get("default") {
            if !present && is_truthy(default) {
                if let Some(fields) = data.as_object_mut() {
                    fields.insert(name.clone(), default.clone());
                }
            }
        }
    }
}

/// Truthiness in the sense the default-fill quirk relies on.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(elements) => !elements.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
