//! Maps a compiler symbol to a stable identity and a symbol-data variant
//! (§4.4 "Symbol Resolver").
//!
//! The resolver never touches the compiler's `Symbol` type directly — the
//! visitor extracts a `SymbolFacts` snapshot from it first. This keeps the
//! coupling to exactly the capabilities §6 promises ("enumerate
//! declarations, flags, parent symbol, exports, members, and aliased
//! target"), the same way `FileFeatures` in `tsz_binder::state` is a
//! bitflags snapshot rather than a live view into the AST.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

use crate::symbol_data::{ScopeKey, SymbolKey, SymbolVariant};

/// Flags relevant to variant selection (§4.4 table), snapshotted from the
/// compiler symbol's flag bitmask by the visitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelevantFlags(u32);

impl RelevantFlags {
    pub const NONE: Self = Self(0);
    pub const ALIAS: Self = Self(1 << 0);
    pub const CLASS: Self = Self(1 << 1);
    pub const INTERFACE: Self = Self(1 << 2);
    pub const METHOD: Self = Self(1 << 3);
    pub const FUNCTION: Self = Self(1 << 4);
    pub const TYPE_LITERAL: Self = Self(1 << 5);
    pub const TRANSIENT: Self = Self(1 << 6);

    #[inline]
    #[must_use]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    pub const fn set(&mut self, flag: Self) {
        self.0 |= flag.0;
    }
}

/// One declaration site, used both for the identity hash and for emit-scope
/// determination.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclarationSite {
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub kind: u16,
    /// Set when this declaration sits inside a designated emit-boundary
    /// node-kind (§4.4 "emission scope"): function, class, block-scoped
    /// let/const, parameter, type-parameter, arrow, ….
    pub enclosing_emit_boundary: Option<ScopeKey>,
}

/// A snapshot of the compiler-symbol facts the resolver needs (§6's
/// "enumerate declarations, flags, parent symbol, exports, members, and
/// aliased target").
#[derive(Clone, Debug, Default)]
pub struct SymbolFacts {
    pub flags: RelevantFlags,
    pub is_exported: bool,
    pub declarations: Vec<DeclarationSite>,
    pub aliased: Option<SymbolKey>,
    pub heritage_bases: Vec<SymbolKey>,
    pub overridden_methods: Vec<SymbolKey>,
}

/// Computes the symbol identity key (§4.4): the hash of the sorted
/// `(file, start, end, kind)` declaration tuples, salted if transient; the
/// sentinel keys for symbols with no declarations.
pub fn symbol_key(facts: &SymbolFacts) -> SymbolKey {
    if facts.declarations.is_empty() {
        return if facts.flags.has(RelevantFlags::TRANSIENT) {
            SymbolKey::Unknown
        } else {
            SymbolKey::Undefined
        };
    }

    let mut sorted: Vec<&DeclarationSite> = facts.declarations.iter().collect();
    sorted.sort_by(|a, b| (a.file.as_str(), a.start, a.end, a.kind).cmp(&(b.file.as_str(), b.start, b.end, b.kind)));

    let mut hasher = FxHasher::default();
    for site in &sorted {
        site.file.hash(&mut hasher);
        site.start.hash(&mut hasher);
        site.end.hash(&mut hasher);
        site.kind.hash(&mut hasher);
    }

    if facts.flags.has(RelevantFlags::TRANSIENT) {
        "transient".hash(&mut hasher);
        SymbolKey::Transient(hasher.finish())
    } else {
        SymbolKey::Declared(hasher.finish())
    }
}

/// Selects the symbol-data variant for a symbol's flags (§4.4 table).
/// Flag precedence follows the table's row order: Alias first, then
/// Class/Interface, then Method, else Standard.
pub fn select_variant(facts: &SymbolFacts) -> SymbolVariant {
    if facts.flags.has(RelevantFlags::TRANSIENT) && facts.declarations.is_empty() {
        return SymbolVariant::Transient;
    }
    if facts.flags.has(RelevantFlags::ALIAS) {
        return SymbolVariant::Alias {
            aliased: facts.aliased.clone().unwrap_or(SymbolKey::Unknown),
        };
    }
    if facts.flags.has(RelevantFlags::CLASS) || facts.flags.has(RelevantFlags::INTERFACE) {
        return SymbolVariant::MemberContainer {
            bases: facts.heritage_bases.clone(),
        };
    }
    if facts.flags.has(RelevantFlags::METHOD) {
        return SymbolVariant::Method {
            overrides: facts.overridden_methods.clone(),
        };
    }
    SymbolVariant::Standard
}

/// Determines the emission scope for a symbol (§4.4 "an emission scope"):
/// `Some(boundary)` when the symbol is not exported, has exactly one
/// declaration, and that declaration sits inside an emit-boundary; `None`
/// (project lifetime) otherwise.
pub fn select_emission_scope(facts: &SymbolFacts) -> Option<ScopeKey> {
    if facts.is_exported {
        return None;
    }
    match facts.declarations.as_slice() {
        [only] => only.enclosing_emit_boundary,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(file: &str, start: u32, end: u32, kind: u16) -> DeclarationSite {
        DeclarationSite {
            file: file.to_string(),
            start,
            end,
            kind,
            enclosing_emit_boundary: None,
        }
    }

    #[test]
    fn no_declarations_keys_as_undefined_sentinel() {
        let facts = SymbolFacts::default();
        assert_eq!(symbol_key(&facts), SymbolKey::Undefined);
    }

    #[test]
    fn transient_with_no_declarations_keys_as_unknown() {
        let mut facts = SymbolFacts::default();
        facts.flags.set(RelevantFlags::TRANSIENT);
        assert_eq!(symbol_key(&facts), SymbolKey::Unknown);
    }

    #[test]
    fn declaration_order_does_not_affect_key() {
        let mut a = SymbolFacts::default();
        a.declarations = vec![site("a.ts", 10, 20, 1), site("a.ts", 0, 5, 2)];
        let mut b = SymbolFacts::default();
        b.declarations = vec![site("a.ts", 0, 5, 2), site("a.ts", 10, 20, 1)];
        assert_eq!(symbol_key(&a), symbol_key(&b));
    }

    #[test]
    fn alias_flag_selects_alias_variant() {
        let mut facts = SymbolFacts::default();
        facts.flags.set(RelevantFlags::ALIAS);
        facts.aliased = Some(SymbolKey::Declared(7));
        match select_variant(&facts) {
            SymbolVariant::Alias { aliased } => assert_eq!(aliased, SymbolKey::Declared(7)),
            other => panic!("expected Alias, got {other:?}"),
        }
    }

    #[test]
    fn class_flag_selects_member_container() {
        let mut facts = SymbolFacts::default();
        facts.flags.set(RelevantFlags::CLASS);
        assert!(matches!(select_variant(&facts), SymbolVariant::MemberContainer { .. }));
    }

    #[test]
    fn exported_symbol_has_no_emission_scope() {
        let mut facts = SymbolFacts::default();
        facts.is_exported = true;
        facts.declarations = vec![{
            let mut s = site("a.ts", 0, 1, 1);
            s.enclosing_emit_boundary = Some(ScopeKey(5));
            s
        }];
        assert_eq!(select_emission_scope(&facts), None);
    }

    #[test]
    fn unexported_single_declaration_in_boundary_is_scoped() {
        let mut facts = SymbolFacts::default();
        facts.declarations = vec![{
            let mut s = site("a.ts", 0, 1, 1);
            s.enclosing_emit_boundary = Some(ScopeKey(5));
            s
        }];
        assert_eq!(select_emission_scope(&facts), Some(ScopeKey(5)));
    }

    #[test]
    fn unexported_multiple_declarations_has_no_scope() {
        let mut facts = SymbolFacts::default();
        facts.declarations = vec![site("a.ts", 0, 1, 1), site("a.ts", 2, 3, 1)];
        assert_eq!(select_emission_scope(&facts), None);
    }
}
