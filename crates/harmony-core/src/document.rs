//! Schema and instance document model.
//!
//! Documents are plain `serde_json` trees. Schemas are mapping-rooted and
//! identified by a `harmony:` URI in their top-level `id` field; everything
//! else in the engine navigates these trees with JSON Pointers.

use serde_json::Value;

/// A schema or instance document.
pub type Document = Value;

/// URI scheme resolved by this engine. References with any other scheme are
/// left for external resolution mechanisms.
pub const SCHEME: &str = "harmony";

/// The top-level field holding a schema's registry identifier.
pub const ID: &str = "id";

/// Return the registry identifier of `document`, if it carries one.
#[must_use]
pub fn schema_id(document: &Document) -> Option<&str> {
    document.get(ID).and_then(Value::as_str)
}

/// Return the scheme of a URI-like reference, e.g. `"harmony"` for
/// `"harmony:/base"`. `None` when the reference has no scheme at all.
#[must_use]
pub fn scheme(reference: &str) -> Option<&str> {
    reference.split_once(':').map(|(scheme, _)| scheme)
}

/// Whether `reference` is resolvable by this engine.
#[must_use]
pub fn is_local_reference(reference: &str) -> bool {
    scheme(reference) == Some(SCHEME)
}

/// Escape a single key for use as a JSON Pointer token (RFC 6901).
#[must_use]
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
