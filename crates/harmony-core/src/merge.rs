//! Target-precedence document merge.
//!
//! Used by mixin expansion to fold a referenced schema into the fragment that
//! mixed it in. The target always wins on plain conflicts; hints override
//! that per path.
//!
//! Rules, per key in the reference:
//! - hint `preserve`: the key is skipped entirely. The target's value (or
//!   its absence) stands; a preserved key is never even added.
//! - key absent from the target, or hint `overwrite`: the reference value is
//!   deep-copied in.
//! - both values are mappings: recursive merge with hints re-scoped to the
//!   sub-paths under that key.
//! - both values are sequences: reference elements are appended unless an
//!   equal element already exists, keeping the target's order first.
//! - any other pairing: the target's value is left untouched. No implicit
//!   type coercion without an explicit hint.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Per-path merge override carried by a mixin directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeHint {
    /// The target's value (or absence) wins; the key is not touched.
    Preserve,
    /// The reference's value replaces the target's unconditionally.
    Overwrite,
}

impl MergeHint {
    /// Parse a hint keyword. Unknown keywords mean "no override".
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "preserve" => Some(Self::Preserve),
            "overwrite" => Some(Self::Overwrite),
            _ => None,
        }
    }
}

/// Map from a JSON-Pointer-style path (`"/key"`, `"/key/sub"`) to the hint
/// applying at that path.
pub type Hints = HashMap<String, MergeHint>;

/// Build a [`Hints`] map from the `hints` value of a mixin directive.
/// Non-mapping input and unrecognized hint keywords are ignored; the
/// meta-schema rejects them before expansion in the normal pipeline.
#[must_use]
pub fn hints_from_value(value: Option<&Value>) -> Hints {
    let mut hints = Hints::new();
    if let Some(Value::Object(entries)) = value {
        for (path, keyword) in entries {
            if let Some(hint) = keyword.as_str().and_then(MergeHint::parse) {
                hints.insert(path.clone(), hint);
            }
        }
    }
    hints
}

/// Merge `reference` into `target` under `hints`, target precedence.
pub fn merge(target: &mut Map<String, Value>, reference: &Map<String, Value>, hints: &Hints) {
    for (key, value) in reference {
        let hint = hints.get(&format!("/{key}")).copied();

        if hint == Some(MergeHint::Preserve) {
            continue;
        }

        if hint == Some(MergeHint::Overwrite) || !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
            continue;
        }

        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge(existing, incoming, &rescope(hints, key));
            }
            (Some(Value::Array(existing)), Value::Array(incoming)) => {
                for element in incoming {
                    if !existing.contains(element) {
                        existing.push(element.clone());
                    }
                }
            }
            // Present in both with differing shapes: target stands.
            _ => {}
        }
    }
}

/// Narrow `hints` to those under `/key/...`, rebased to `/...`.
fn rescope(hints: &Hints, key: &str) -> Hints {
    let prefix = format!("/{key}/");
    hints
        .iter()
        .filter_map(|(path, hint)| {
            path.strip_prefix(&prefix)
                .map(|rest| (format!("/{rest}"), *hint))
        })
        .collect()
}
