//! End-to-end pipeline over the bundled schema resources: collect from disk,
//! validate against the meta-schema, expand mixins, then instantiate and
//! validate instances.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;

use harmony_collect::FilesystemCollector;
use harmony_session::Session;

fn bundled_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("schema")
}

fn refreshed_session() -> Session {
    let mut session = Session::new(FilesystemCollector::new([bundled_schema_path()]));
    session.refresh().expect("bundled schemas load cleanly");
    session
}

#[test]
fn bundled_schemas_register_and_expand() {
    let session = refreshed_session();
    assert_eq!(session.registry().len(), 3);

    let publish = session
        .registry()
        .get("harmony:/publish")
        .expect("publish schema registered");

    // The mixin directive is consumed and its content folded in.
    assert_eq!(publish.get("$mixin"), None);
    assert_eq!(
        publish.pointer("/properties/harmony_type/type"),
        Some(&json!("string"))
    );
    assert_eq!(
        publish.pointer("/properties/scope/properties/project/default"),
        Some(&json!("untitled"))
    );
    // Sequence merge keeps the target's order and dedups the reference's.
    assert_eq!(
        publish.get("required"),
        Some(&json!(["version", "note", "harmony_type"]))
    );
}

#[test]
fn instantiate_publish_defaults() {
    let session = refreshed_session();

    // Required with truthy default -> filled; required without default and
    // non-required properties -> absent.
    let data = session
        .instantiate("harmony:/publish", None)
        .expect("instantiation succeeds");
    assert_eq!(data, json!({"note": "Initial publish"}));

    // A seeded optional object is recursed into.
    let data = session
        .instantiate("harmony:/publish", Some(json!({"scope": {}})))
        .expect("instantiation succeeds");
    assert_eq!(
        data,
        json!({"note": "Initial publish", "scope": {"project": "untitled"}})
    );
}

#[test]
fn conforming_publish_instance_validates_cleanly() {
    let session = refreshed_session();
    let instance = json!({
        "harmony_type": "harmony:/publish",
        "version": 1,
        "note": "first cut",
        "scope": {"project": "alpha", "asset": "hero"}
    });
    let faults = session.validate(&instance, &[]).expect("validation runs");
    assert_eq!(faults, vec![]);
}

#[test]
fn missing_harmony_type_faults_against_the_base_schema_only() {
    let session = refreshed_session();
    let faults = session
        .validate(&json!({"version": 0}), &[])
        .expect("validation runs");

    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].message, "harmony_type is a required property");
    assert_eq!(faults[0].schema_id(), Some("harmony:/base"));
    // Type-specific checks (version minimum) were gated off.
    assert_eq!(faults[0].schema_path, "/required/0");
}

#[test]
fn type_specific_faults_surface_once_base_passes() {
    let session = refreshed_session();
    let instance = json!({
        "harmony_type": "harmony:/publish",
        "version": 0,
        "note": "bad version"
    });
    let faults = session.validate(&instance, &[]).expect("validation runs");

    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].instance_path, "/version");
    assert_eq!(faults[0].schema_id(), Some("harmony:/publish"));
}

#[test]
fn additional_schemas_are_checked_last() {
    let session = refreshed_session();
    let instance = json!({
        "harmony_type": "harmony:/publish",
        "version": 2,
        "note": "with scope",
        "scope": {"project": "alpha"}
    });
    let faults = session
        .validate(&instance, &["harmony:/scope".into()])
        .expect("validation runs");
    assert_eq!(faults, vec![]);
}

#[test]
fn resubmission_seed_round_trip() {
    let session = refreshed_session();
    let mut published = json!({
        "harmony_type": "harmony:/publish",
        "id": "3adf",
        "created": "2026-01-05T09:00:00Z",
        "modified": "2026-01-06T10:00:00Z",
        "version": 3,
        "note": "third cut"
    });
    harmony_core::instance::prepare_for_resubmission(&mut published);
    let reseeded = session
        .instantiate("harmony:/publish", Some(published))
        .expect("instantiation succeeds");
    assert_eq!(
        reseeded,
        json!({
            "harmony_type": "harmony:/publish",
            "version": 3,
            "note": "third cut"
        })
    );
}
