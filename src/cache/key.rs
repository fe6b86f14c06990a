//! Cache key derivation
//!
//! Keys namespace one logical query: an entity type, optionally scoped to a
//! parent record ("rooms of floor 7" vs. all rooms). Segments are joined with
//! `:` after escaping, so distinct `(entity, scope)` pairs can never collide,
//! even when an id itself contains the separator.

/// Separator between key segments
const SEPARATOR: char = ':';

/// Parent scope for a derived key, e.g. floors of one building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    /// Parent entity type, e.g. "building"
    pub parent_type: &'a str,
    /// Parent record id
    pub parent_id: &'a str,
}

impl<'a> Scope<'a> {
    pub fn new(parent_type: &'a str, parent_id: &'a str) -> Self {
        Self {
            parent_type,
            parent_id,
        }
    }
}

/// Derive a stable cache key for an entity type and optional parent scope.
///
/// Deterministic: same inputs always yield the same key. Injective: escaping
/// removes the separator from each segment before joining, so `("rooms",
/// floor "7")` and `("rooms", floor "70")` and bare `"rooms"` are all distinct
/// for every id, including ids containing `:` or `%`.
pub fn derive_key(entity: &str, scope: Option<Scope<'_>>) -> String {
    match scope {
        None => escape(entity),
        Some(s) => format!(
            "{}{sep}{}{sep}{}",
            escape(entity),
            escape(s.parent_type),
            escape(s.parent_id),
            sep = SEPARATOR
        ),
    }
}

/// Escape one key segment.
///
/// `%` must be escaped first so escaped output never re-escapes itself.
fn escape(segment: &str) -> String {
    segment.replace('%', "%25").replace(SEPARATOR, "%3A")
}
