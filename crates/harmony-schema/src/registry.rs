//! In-memory schema registry.

use std::collections::HashMap;

use harmony_core::{Document, HarmonyError, document};

/// Store of schema documents keyed by their `harmony:` id.
///
/// Ids are unique at all times; registering a duplicate fails. Iteration
/// follows insertion order, relied on only for reproducibility and never for
/// correctness. No interior synchronization: single-writer use is assumed,
/// and callers serialize refreshes against readers.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Document>,
    order: Vec<String>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under its top-level `id`.
    ///
    /// # Errors
    ///
    /// `MissingId` when the document has no string `id` field;
    /// `SchemaConflict` when a schema with the same id is already registered.
    pub fn add(&mut self, schema: Document) -> Result<(), HarmonyError> {
        let id = document::schema_id(&schema)
            .ok_or(HarmonyError::MissingId)?
            .to_owned();
        if self.schemas.contains_key(&id) {
            return Err(HarmonyError::SchemaConflict { id });
        }
        self.order.push(id.clone());
        self.schemas.insert(id, schema);
        Ok(())
    }

    /// Remove and return the schema registered under `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no schema with `id` is registered.
    pub fn remove(&mut self, id: &str) -> Result<Document, HarmonyError> {
        let schema = self
            .schemas
            .remove(id)
            .ok_or_else(|| HarmonyError::NotFound { id: id.to_owned() })?;
        self.order.retain(|registered| registered != id);
        Ok(schema)
    }

    /// Look up the schema registered under `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no schema with `id` is registered.
    pub fn get(&self, id: &str) -> Result<&Document, HarmonyError> {
        self.schemas
            .get(id)
            .ok_or_else(|| HarmonyError::NotFound { id: id.to_owned() })
    }

    /// Mutable lookup, for pipeline passes that rewrite schemas in place.
    ///
    /// # Errors
    ///
    /// `NotFound` when no schema with `id` is registered.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut Document, HarmonyError> {
        self.schemas
            .get_mut(id)
            .ok_or_else(|| HarmonyError::NotFound { id: id.to_owned() })
    }

    /// Remove all registered schemas.
    pub fn clear(&mut self) {
        self.schemas.clear();
        self.order.clear();
    }

    /// Iterate `(id, schema)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.order
            .iter()
            .filter_map(|id| self.schemas.get(id).map(|schema| (id.as_str(), schema)))
    }

    /// Registered ids in insertion order. Owned so callers can mutate the
    /// registry while walking the id list.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn add_then_duplicate_add_conflicts() {
        let mut registry = SchemaRegistry::new();
        registry
            .add(json!({"id": "harmony:/base", "type": "object"}))
            .expect("first add succeeds");
        let error = registry
            .add(json!({"id": "harmony:/base", "type": "object"}))
            .expect_err("duplicate id must conflict");
        assert!(matches!(error, HarmonyError::SchemaConflict { id } if id == "harmony:/base"));
    }

    #[test]
    fn remove_then_get_reports_not_found() {
        let mut registry = SchemaRegistry::new();
        registry
            .add(json!({"id": "harmony:/base"}))
            .expect("add succeeds");
        registry.remove("harmony:/base").expect("remove succeeds");
        let error = registry.get("harmony:/base").expect_err("gone after remove");
        assert!(matches!(error, HarmonyError::NotFound { id } if id == "harmony:/base"));
    }

    #[test]
    fn remove_unknown_id_reports_not_found() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.remove("harmony:/missing"),
            Err(HarmonyError::NotFound { .. })
        ));
    }

    #[test]
    fn add_without_id_is_rejected() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.add(json!({"type": "object"})),
            Err(HarmonyError::MissingId)
        ));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut registry = SchemaRegistry::new();
        for name in ["harmony:/c", "harmony:/a", "harmony:/b"] {
            registry.add(json!({"id": name})).expect("add succeeds");
        }
        let ids: Vec<&str> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["harmony:/c", "harmony:/a", "harmony:/b"]);
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = SchemaRegistry::new();
        registry.add(json!({"id": "harmony:/a"})).expect("add succeeds");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.ids(), Vec::<String>::new());
    }
}
