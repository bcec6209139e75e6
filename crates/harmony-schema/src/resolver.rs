//! Mixin expansion.
//!
//! Flattens every `$mixin` directive reachable from a registered schema into
//! literal content, in place, exactly once per fragment.
//!
//! Cycle safety is structural: the directive is removed from the fragment
//! before its entries are resolved, so the absence of `$mixin` doubles as the
//! processed marker. When fragment B recursively triggers expansion of the
//! fragment A that mixed it in, A's directive is already consumed and the
//! recursion terminates without reprocessing it. There is no visited set and
//! no depth guard; the consumed directive is what terminates the walk.

use serde_json::Value;

use harmony_core::{Document, HarmonyError, document, merge};

use crate::SchemaRegistry;
use crate::pass::Pass;

/// Pipeline pass expanding `$mixin` directives across the whole registry.
#[derive(Debug, Default)]
pub struct MixinResolver;

impl MixinResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Expand every directive reachable from the schema registered as `id`.
    ///
    /// Re-invoking on an already-expanded schema is a no-op.
    ///
    /// # Errors
    ///
    /// `MissingReference` when a directive lacks `$ref`; `NotFound` when a
    /// `harmony:` reference names an unregistered schema.
    pub fn expand(registry: &mut SchemaRegistry, id: &str) -> Result<(), HarmonyError> {
        Self::expand_fragment(registry, id, "")
    }

    /// Expand the fragment of `id` addressed by `pointer`, children first.
    fn expand_fragment(
        registry: &mut SchemaRegistry,
        id: &str,
        pointer: &str,
    ) -> Result<(), HarmonyError> {
        // Children before the fragment's own directive. Pointers are
        // collected up front; a pointer invalidated by a sibling's expansion
        // simply no longer resolves and is skipped.
        let children = match registry.get(id)?.pointer(pointer) {
            Some(fragment) => child_pointers(fragment, pointer),
            None => return Ok(()),
        };
        for child in &children {
            Self::expand_fragment(registry, id, child)?;
        }

        // Consume the directive; absence marks this fragment processed.
        let directive = match registry.get_mut(id)?.pointer_mut(pointer) {
            Some(Value::Object(fragment)) => fragment.remove("$mixin"),
            _ => None,
        };
        let Some(directive) = directive else {
            return Ok(());
        };

        for entry in normalize(directive) {
            let Some(reference) = entry.get("$ref").and_then(Value::as_str) else {
                return Err(HarmonyError::MissingReference);
            };
            if !document::is_local_reference(reference) {
                // Other schemes are reserved for external resolution.
                tracing::debug!(schema = id, reference, "skipping non-harmony mixin reference");
                continue;
            }

            // The referenced schema must itself be fully expanded before its
            // content is folded in.
            registry.get(reference)?;
            Self::expand_fragment(registry, reference, "")?;

            let snapshot = registry.get(reference)?.clone();
            let hints = merge::hints_from_value(entry.get("hints"));
            if let Some(Value::Object(fragment)) = registry.get_mut(id)?.pointer_mut(pointer) {
                if let Value::Object(incoming) = &snapshot {
                    merge::merge(fragment, incoming, &hints);
                }
            }
        }
        Ok(())
    }
}

impl Pass for MixinResolver {
    fn name(&self) -> &'static str {
        "mixin-resolver"
    }

    fn process(&self, registry: &mut SchemaRegistry) -> Result<(), HarmonyError> {
        for id in registry.ids() {
            Self::expand(registry, &id)?;
        }
        Ok(())
    }
}

/// Sub-fragment pointers reachable from `fragment` via `properties`, `items`,
/// and `additionalItems`, rooted at `base`.
fn child_pointers(fragment: &Value, base: &str) -> Vec<String> {
    let mut pointers = Vec::new();
    if let Some(properties) = fragment.get("properties").and_then(Value::as_object) {
        for key in properties.keys() {
            pointers.push(format!(
                "{base}/properties/{}",
                document::escape_pointer_token(key)
            ));
        }
    }
    match fragment.get("items") {
        Some(Value::Object(_)) => pointers.push(format!("{base}/items")),
        Some(Value::Array(elements)) => {
            for (index, element) in elements.iter().enumerate() {
                if element.is_object() {
                    pointers.push(format!("{base}/items/{index}"));
                }
            }
        }
        _ => {}
    }
    if fragment.get("additionalItems").is_some_and(Value::is_object) {
        pointers.push(format!("{base}/additionalItems"));
    }
    pointers
}

/// Normalize a directive to a list of entries: a single object is a
/// one-element list, `null` is empty.
fn normalize(directive: Value) -> Vec<Document> {
    match directive {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        single => vec![single],
    }
}
