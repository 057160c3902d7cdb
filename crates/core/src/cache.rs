//! Response-cache key and tag scheme.
//!
//! Cached responses are stored under deterministic keys and registered with
//! one or more invalidation tags. A write invalidates its entity tag (and,
//! for detail mutations, the id tag) instead of enumerating every key
//! variant that might have gone stale.
//!
//! Keys:  `hg:<entity>:detail:<id>` and `hg:<entity>:list:<k>=<v>&...`
//! Tags:  `<entity>` for all keys of an entity, `<entity>:<id>` for one row.

use crate::types::DbId;

/// Namespace prefix for every cache key, so a shared cache instance can be
/// flushed per-application.
const KEY_PREFIX: &str = "hg";

/// Key for a single entity's serialized detail response.
pub fn detail_key(entity: &str, id: DbId) -> String {
    format!("{KEY_PREFIX}:{entity}:detail:{id}")
}

/// Key for a list response, parameterized by its scope (filters, pagination).
///
/// Scope pairs are sorted by name so equivalent requests with differently
/// ordered query strings hit the same key. An empty scope yields the bare
/// list key.
pub fn list_key(entity: &str, scope: &[(&str, String)]) -> String {
    let mut pairs: Vec<(&str, &str)> = scope.iter().map(|(k, v)| (*k, v.as_str())).collect();
    pairs.sort();

    let scope_str = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    if scope_str.is_empty() {
        format!("{KEY_PREFIX}:{entity}:list")
    } else {
        format!("{KEY_PREFIX}:{entity}:list:{scope_str}")
    }
}

/// Tag covering every cached response for an entity type.
pub fn entity_tag(entity: &str) -> String {
    entity.to_string()
}

/// Tag covering every cached response for one row.
pub fn id_tag(entity: &str, id: DbId) -> String {
    format!("{entity}:{id}")
}

/// Tags to register when caching a detail response: invalidated by any write
/// to the entity type or to the specific row.
pub fn detail_tags(entity: &str, id: DbId) -> Vec<String> {
    vec![entity_tag(entity), id_tag(entity, id)]
}

/// Tags to register when caching a list response.
pub fn list_tags(entity: &str) -> Vec<String> {
    vec![entity_tag(entity)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_key_is_deterministic() {
        assert_eq!(detail_key("listing", 42), "hg:listing:detail:42");
        assert_eq!(detail_key("listing", 42), detail_key("listing", 42));
    }

    #[test]
    fn list_key_sorts_scope_pairs() {
        let a = list_key(
            "listing",
            &[("offset", "0".into()), ("limit", "20".into())],
        );
        let b = list_key(
            "listing",
            &[("limit", "20".into()), ("offset", "0".into())],
        );
        assert_eq!(a, b);
        assert_eq!(a, "hg:listing:list:limit=20&offset=0");
    }

    #[test]
    fn empty_scope_yields_bare_list_key() {
        assert_eq!(list_key("faq", &[]), "hg:faq:list");
    }

    #[test]
    fn detail_tags_cover_entity_and_row() {
        let tags = detail_tags("property", 7);
        assert_eq!(tags, vec!["property".to_string(), "property:7".to_string()]);
    }

    #[test]
    fn distinct_entities_never_share_keys_or_tags() {
        assert_ne!(detail_key("listing", 1), detail_key("property", 1));
        assert_ne!(id_tag("listing", 1), id_tag("property", 1));
    }
}
