//! Instance lifecycle fields.
//!
//! Every instance submitted for validation names its schema through
//! [`HARMONY_TYPE`]. The remaining lifecycle fields are stamped by publishing
//! layers and must be stripped before a published document is reused as the
//! seed for a fresh instantiation.

use serde_json::Value;

/// Field naming the registered schema an instance conforms to.
pub const HARMONY_TYPE: &str = "harmony_type";

/// Identifier assigned to a published instance.
pub const ID: &str = "id";

/// Creation timestamp assigned to a published instance.
pub const CREATED: &str = "created";

/// Last-modification timestamp assigned to a published instance.
pub const MODIFIED: &str = "modified";

/// Id of the schema every instance must satisfy before type-specific checks.
pub const BASE_SCHEMA_ID: &str = "harmony:/base";

/// Strip publish-time lifecycle fields (`id`, `created`, `modified`) from
/// `instance` so it can seed a subsequent instantiation. `harmony_type` is
/// kept: the reseeded document still targets the same schema.
pub fn prepare_for_resubmission(instance: &mut Value) {
    if let Value::Object(fields) = instance {
        fields.remove(ID);
        fields.remove(CREATED);
        fields.remove(MODIFIED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn resubmission_strips_lifecycle_fields_only() {
        let mut instance = json!({
            "harmony_type": "harmony:/publish",
            "id": "7f3c",
            "created": "2026-01-05T09:00:00Z",
            "modified": "2026-01-06T10:30:00Z",
            "note": "keep me"
        });
        prepare_for_resubmission(&mut instance);
        assert_eq!(
            instance,
            json!({"harmony_type": "harmony:/publish", "note": "keep me"})
        );
    }

    #[test]
    fn resubmission_ignores_non_objects() {
        let mut instance = json!(["id", "created"]);
        prepare_for_resubmission(&mut instance);
        assert_eq!(instance, json!(["id", "created"]));
    }
}
