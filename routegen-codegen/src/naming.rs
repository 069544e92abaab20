//! Identifier derivation for generated route groups and middleware hooks.
//!
//! Group variables and middleware functions share one package scope in the
//! generated router, so every name handed out while building a tree is
//! unique across the whole tree.

use indexmap::IndexSet;
use routegen_core::sanitize_identifier;

/// Return `candidate` if it is free, otherwise the candidate followed by the
/// smallest integer suffix `n >= 2` that is not in `taken`.
///
/// ```
/// use indexmap::IndexSet;
/// use routegen_codegen::naming::disambiguate;
///
/// let taken: IndexSet<String> = ["_users".to_string(), "_users2".to_string()].into();
/// assert_eq!(disambiguate("_id", &taken), "_id");
/// assert_eq!(disambiguate("_users", &taken), "_users3");
/// ```
pub fn disambiguate(candidate: &str, taken: &IndexSet<String>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    (2..)
        .map(|n| format!("{candidate}{n}"))
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| candidate.to_string())
}

/// Group name used when a segment has nothing left after its sigil.
pub const FALLBACK_GROUP_NAME: &str = "_group";

/// Derive the group variable name for a path segment.
///
/// Parameter sigils are dropped and the rest is lower-cased:
/// `/users` -> `_users`, `/:id` -> `_id`, `/v1.2` -> `_v1_2`.
/// A bare sigil such as `/*` falls back to [`FALLBACK_GROUP_NAME`], since a
/// lone `_` is Go's blank identifier.
pub fn group_name_for_segment(segment: &str) -> String {
    let raw = segment.trim_start_matches('/');
    let raw = raw.trim_start_matches([':', '*']);
    if raw.is_empty() {
        return FALLBACK_GROUP_NAME.to_string();
    }
    format!("_{}", sanitize_identifier(raw).to_lowercase())
}

/// Default middleware tag for a handler without an explicit tag.
pub fn handler_middleware_tag(handler: &str) -> String {
    format!("_{}", sanitize_identifier(handler).to_lowercase())
}

/// Hands out names that are unique across one route tree.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: IndexSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `candidate`, or its disambiguated form if it is already taken.
    pub fn claim(&mut self, candidate: &str) -> String {
        let name = disambiguate(candidate, &self.taken);
        self.taken.insert(name.clone());
        name
    }

    /// Reserve `name` exactly as written. Reserving a name twice is a no-op,
    /// so a shared explicit tag stays one name.
    pub fn reserve(&mut self, name: &str) {
        if !self.taken.contains(name) {
            self.taken.insert(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_disambiguate_free_name() {
        assert_eq!(disambiguate("_users", &taken(&[])), "_users");
        assert_eq!(disambiguate("_users", &taken(&["_id"])), "_users");
    }

    #[test]
    fn test_disambiguate_smallest_free_suffix() {
        assert_eq!(disambiguate("_users", &taken(&["_users"])), "_users2");
        assert_eq!(
            disambiguate("_users", &taken(&["_users", "_users2", "_users3"])),
            "_users4"
        );
        // A gap is filled before higher suffixes.
        assert_eq!(
            disambiguate("_users", &taken(&["_users", "_users3"])),
            "_users2"
        );
    }

    #[test]
    fn test_group_name_for_segment() {
        assert_eq!(group_name_for_segment("/users"), "_users");
        assert_eq!(group_name_for_segment("/:id"), "_id");
        assert_eq!(group_name_for_segment("/*filepath"), "_filepath");
        assert_eq!(group_name_for_segment("/API"), "_api");
        assert_eq!(group_name_for_segment("/v1.2"), "_v1_2");
        assert_eq!(group_name_for_segment("/user-info"), "_user_info");
    }

    #[test]
    fn test_bare_sigil_segment() {
        assert_eq!(group_name_for_segment("/*"), "_group");
        assert_eq!(group_name_for_segment("/:"), "_group");
    }

    #[test]
    fn test_handler_middleware_tag() {
        assert_eq!(handler_middleware_tag("GetUser"), "_getuser");
        assert_eq!(handler_middleware_tag("list_users"), "_list_users");
    }

    #[test]
    fn test_allocator_is_tree_wide() {
        let mut names = NameAllocator::new();
        assert_eq!(names.claim("_users"), "_users");
        assert_eq!(names.claim("_id"), "_id");
        assert_eq!(names.claim("_users"), "_users2");
        assert_eq!(names.claim("_users2"), "_users22");
    }

    #[test]
    fn test_reserved_names_are_shared() {
        let mut names = NameAllocator::new();
        names.reserve("auth");
        names.reserve("auth");
        assert_eq!(names.claim("auth"), "auth2");
        assert_eq!(names.claim("_users"), "_users");
    }
}
