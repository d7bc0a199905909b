//! Moniker identifier construction (§4.4.1) and package-information linking.

use rustc_hash::FxHashMap;

use crate::id::ElementId;

/// Strips a `.d.ts`, `.ts`, or `.js` suffix from a project-relative path and
/// normalizes separators to forward slashes, per §6's moniker identifier
/// grammar.
pub fn normalize_declaration_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    for suffix in [".d.ts", ".ts", ".tsx", ".js", ".jsx"] {
        if let Some(stripped) = forward.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    forward
}

/// Doubles literal colons in a path segment, per §6 ("literal colons
/// doubled").
fn escape_colons(segment: &str) -> String {
    segment.replace(':', "::")
}

/// Builds the primary-scheme moniker identifier `path:symbol` (§6).
///
/// `path` is `None` for declarations in the global scope, which yields the
/// empty-path form `:symbolName` (§8 scenario 6, "declare global").
pub fn primary_identifier(path: Option<&str>, symbol_path: &str) -> String {
    let escaped_path = path.map(escape_colons).unwrap_or_default();
    format!("{escaped_path}:{symbol_path}")
}

/// Dotted lexical-container chain for a declaration, from the nearest
/// emit-stop up to (but not including) the source file (§4.4.1).
///
/// Returns `None` when any enclosing container is anonymous or the
/// declaration sits inside a block, per §4.4.1 ("the identifier is
/// undefined and no export moniker is emitted").
pub fn container_chain_path(containers: &[Option<String>]) -> Option<String> {
    let mut names = Vec::with_capacity(containers.len());
    for container in containers {
        names.push(container.clone()?);
    }
    Some(names.join("."))
}

/// Caches `packageInformation` vertices keyed by `(scheme, package name)`,
/// the same dedup shape the Symbol Resolver already applies to monikers by
/// `(scheme, identifier)` (§14).
#[derive(Default)]
pub struct PackageInformationCache {
    by_key: FxHashMap<(String, String), ElementId>,
}

impl PackageInformationCache {
    pub fn get(&self, scheme: &str, package_name: &str) -> Option<ElementId> {
        self.by_key
            .get(&(scheme.to_string(), package_name.to_string()))
            .copied()
    }

    pub fn insert(&mut self, scheme: &str, package_name: &str, id: ElementId) {
        self.by_key
            .insert((scheme.to_string(), package_name.to_string()), id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_extensions() {
        assert_eq!(normalize_declaration_path("a/b.d.ts"), "a/b");
        assert_eq!(normalize_declaration_path("a/b.ts"), "a/b");
        assert_eq!(normalize_declaration_path("a\\b.js"), "a/b");
    }

    #[test]
    fn global_scope_has_empty_path() {
        assert_eq!(primary_identifier(None, "value"), ":value");
    }

    #[test]
    fn simple_export_identifier_matches_scenario_one() {
        assert_eq!(primary_identifier(Some("a"), "foo"), "a:foo");
    }

    #[test]
    fn container_chain_none_when_any_container_anonymous() {
        let containers = vec![Some("Foo".to_string()), None];
        assert_eq!(container_chain_path(&containers), None);
    }

    #[test]
    fn container_chain_joins_with_dots() {
        let containers = vec![Some("Foo".to_string()), Some("bar".to_string())];
        assert_eq!(
            container_chain_path(&containers).as_deref(),
            Some("Foo.bar")
        );
    }
}
