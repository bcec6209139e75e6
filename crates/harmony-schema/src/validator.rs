//! Draft-4 validator extension.
//!
//! Wraps the `jsonschema` crate with two deviations from stock behavior:
//!
//! 1. `required` faults are reshaped: the message is exactly
//!    `"<name> is a required property"` and the schema path gains the index
//!    of the missing name within the `required` array, so error trees built
//!    by presentation layers can map a fault back to the property it
//!    concerns. Non-object instances pass `required` untouched (stock
//!    Draft 4 already treats object keywords as vacuous there).
//! 2. Schemas are checked against an extended meta-schema that permits the
//!    `$mixin` composition directive (and its `hints`) on any fragment.
//!
//! Format validation is on by default.

use std::sync::OnceLock;

use jsonschema::{Draft, ValidationError, error::ValidationErrorKind};
use serde::Serialize;
use serde_json::Value;

use harmony_core::{Document, HarmonyError, document};

const META_SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/meta.json"));

static META_VALIDATOR: OnceLock<jsonschema::Validator> = OnceLock::new();

fn meta_validator() -> &'static jsonschema::Validator {
    META_VALIDATOR.get_or_init(|| {
        let meta: Value = serde_json::from_str(META_SCHEMA).expect("meta-schema json to parse");
        jsonschema::options()
            .with_draft(Draft::Draft4)
            .should_validate_formats(true)
            .build(&meta)
            .expect("meta-schema to compile")
    })
}

/// One structured instance-validation fault.
///
/// Faults are data, not errors: `iter_errors` always returns a (possibly
/// empty) collection so callers can render every diagnostic at once.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationFault {
    /// Human-readable description of the fault.
    pub message: String,
    /// JSON Pointer into the instance at which the fault was raised.
    pub instance_path: String,
    /// JSON Pointer into the schema naming the violated keyword. For
    /// `required` faults this includes the index of the missing property
    /// within the `required` array.
    pub schema_path: String,
    /// The schema the fault was raised against, annotated by the caller that
    /// ran the validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Document>,
}

impl ValidationFault {
    /// Annotate this fault with the schema it was raised against.
    #[must_use]
    pub fn with_schema(mut self, schema: Document) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Id of the annotated schema, when present.
    #[must_use]
    pub fn schema_id(&self) -> Option<&str> {
        self.schema.as_ref().and_then(document::schema_id)
    }
}

/// A compiled Draft-4 validator for one schema document.
pub struct Validator {
    compiled: jsonschema::Validator,
    schema: Document,
}

impl Validator {
    /// Compile `schema` into a validator.
    ///
    /// # Errors
    ///
    /// `SchemaInvalid` when the document cannot be compiled.
    pub fn for_schema(schema: &Document) -> Result<Self, HarmonyError> {
        let compiled = jsonschema::options()
            .with_draft(Draft::Draft4)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|error| HarmonyError::SchemaInvalid {
                id: document::schema_id(schema).unwrap_or("<unidentified>").to_owned(),
                detail: error.to_string(),
            })?;
        Ok(Self {
            compiled,
            schema: schema.clone(),
        })
    }

    /// Validate `schema` against the extended meta-schema.
    ///
    /// # Errors
    ///
    /// `SchemaInvalid` wrapping the first meta-schema violation.
    pub fn check_schema(schema: &Document) -> Result<(), HarmonyError> {
        meta_validator()
            .validate(schema)
            .map_err(|error| HarmonyError::SchemaInvalid {
                id: document::schema_id(schema).unwrap_or("<unidentified>").to_owned(),
                detail: error.to_string(),
            })
    }

    /// Collect every fault `instance` raises against this schema.
    #[must_use]
    pub fn iter_errors(&self, instance: &Value) -> Vec<ValidationFault> {
        self.compiled
            .iter_errors(instance)
            .map(|error| self.convert(&error))
            .collect()
    }

    /// The schema this validator was compiled from.
    #[must_use]
    pub fn schema(&self) -> &Document {
        &self.schema
    }

    fn convert(&self, error: &ValidationError<'_>) -> ValidationFault {
        let mut message = error.to_string();
        let mut schema_path = error.schema_path.to_string();

        if let ValidationErrorKind::Required { property } = &error.kind {
            if let Some(name) = property.as_str() {
                message = format!("{name} is a required property");
                if let Some(index) = self.required_index(&schema_path, name) {
                    schema_path = format!("{schema_path}/{index}");
                }
            }
        }

        ValidationFault {
            message,
            instance_path: error.instance_path.to_string(),
            schema_path,
            schema: None,
        }
    }

    /// Index of `name` within the `required` array the fault points at.
    fn required_index(&self, schema_path: &str, name: &str) -> Option<usize> {
        self.schema
            .pointer(schema_path)?
            .as_array()?
            .iter()
            .position(|entry| entry.as_str() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn required_faults_carry_message_and_indexed_path() {
        let schema = json!({
            "type": "object",
            "required": ["first", "second"],
            "properties": {
                "first": {"type": "string"},
                "second": {"type": "string"}
            }
        });
        let validator = Validator::for_schema(&schema).expect("schema compiles");
        let mut faults = validator.iter_errors(&json!({}));
        faults.sort_by(|a, b| a.schema_path.cmp(&b.schema_path));

        assert_eq!(faults.len(), 2);
        assert_eq!(faults[0].message, "first is a required property");
        assert_eq!(faults[0].schema_path, "/required/0");
        assert_eq!(faults[1].message, "second is a required property");
        assert_eq!(faults[1].schema_path, "/required/1");
    }

    #[test]
    fn nested_required_fault_paths_index_the_inner_array() {
        let schema = json!({
            "type": "object",
            "properties": {
                "inner": {
                    "type": "object",
                    "required": ["value"],
                    "properties": {"value": {"type": "integer"}}
                }
            }
        });
        let validator = Validator::for_schema(&schema).expect("schema compiles");
        let faults = validator.iter_errors(&json!({"inner": {}}));
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].instance_path, "/inner");
        assert_eq!(faults[0].schema_path, "/properties/inner/required/0");
    }

    #[test]
    fn non_object_instances_pass_required() {
        let schema = json!({"required": ["x"]});
        let validator = Validator::for_schema(&schema).expect("schema compiles");
        assert_eq!(validator.iter_errors(&json!(42)), vec![]);
        assert_eq!(validator.iter_errors(&json!("text")), vec![]);
    }

    #[test]
    fn formats_are_validated_by_default() {
        let schema = json!({"type": "string", "format": "date-time"});
        let validator = Validator::for_schema(&schema).expect("schema compiles");
        assert!(validator.iter_errors(&json!("2026-01-05T09:00:00Z")).is_empty());
        assert!(!validator.iter_errors(&json!("definitely not a date")).is_empty());
    }

    #[test]
    fn check_schema_permits_mixin_directives() {
        let schema = json!({
            "id": "harmony:/publish",
            "type": "object",
            "$mixin": [{"$ref": "harmony:/base", "hints": {"/required": "overwrite"}}],
            "properties": {
                "nested": {
                    "type": "object",
                    "$mixin": {"$ref": "harmony:/scope"}
                }
            }
        });
        Validator::check_schema(&schema).expect("extended meta-schema accepts $mixin");
    }

    #[test]
    fn check_schema_rejects_unknown_hint_keywords() {
        let schema = json!({
            "id": "harmony:/publish",
            "$mixin": {"$ref": "harmony:/base", "hints": {"/a": "banana"}}
        });
        let error = Validator::check_schema(&schema).expect_err("bad hint keyword");
        assert!(matches!(error, HarmonyError::SchemaInvalid { id, .. } if id == "harmony:/publish"));
    }

    #[test]
    fn check_schema_rejects_malformed_required() {
        let schema = json!({"id": "harmony:/bad", "required": "name"});
        assert!(Validator::check_schema(&schema).is_err());
    }

    #[test]
    fn fault_annotation_exposes_schema_id() {
        let schema = json!({"id": "harmony:/thing", "type": "object", "required": ["x"]});
        let validator = Validator::for_schema(&schema).expect("schema compiles");
        let faults = validator.iter_errors(&json!({}));
        let fault = faults[0].clone().with_schema(schema);
        assert_eq!(fault.schema_id(), Some("harmony:/thing"));
    }
}
