//! Broader resolver scenarios than the per-function unit tests in
//! `src/resolver.rs`: flag precedence when several flags are set at once,
//! and emission-scope decisions across multiple declarations.

use tsz_lsif::resolver::{select_emission_scope, select_variant, symbol_key, DeclarationSite, RelevantFlags, SymbolFacts};
use tsz_lsif::symbol_data::{ScopeKey, SymbolKey, SymbolVariant};

fn site(file: &str, start: u32, end: u32, kind: u16, boundary: Option<ScopeKey>) -> DeclarationSite {
    DeclarationSite {
        file: file.to_string(),
        start,
        end,
        kind,
        enclosing_emit_boundary: boundary,
    }
}

/// A symbol can carry more than one relevant flag (e.g. an exported alias to
/// a class). Alias must win (§4.4 table row order), independent of which
/// other flags are also set.
#[test]
fn alias_beats_class_and_method_when_flags_overlap() {
    let mut facts = SymbolFacts::default();
    facts.flags.set(RelevantFlags::ALIAS);
    facts.flags.set(RelevantFlags::CLASS);
    facts.flags.set(RelevantFlags::METHOD);
    facts.aliased = Some(SymbolKey::Declared(42));

    match select_variant(&facts) {
        SymbolVariant::Alias { aliased } => assert_eq!(aliased, SymbolKey::Declared(42)),
        other => panic!("alias should take precedence, got {other:?}"),
    }
}

/// Class/interface still beats method when both flags are present (e.g. an
/// abstract class member counted as both).
#[test]
fn class_beats_method_when_both_flags_set() {
    let mut facts = SymbolFacts::default();
    facts.flags.set(RelevantFlags::CLASS);
    facts.flags.set(RelevantFlags::METHOD);
    assert!(matches!(select_variant(&facts), SymbolVariant::MemberContainer { .. }));
}

#[test]
fn interface_also_selects_member_container() {
    let mut facts = SymbolFacts::default();
    facts.flags.set(RelevantFlags::INTERFACE);
    facts.heritage_bases = vec![SymbolKey::Declared(1), SymbolKey::Declared(2)];
    match select_variant(&facts) {
        SymbolVariant::MemberContainer { bases } => assert_eq!(bases.len(), 2),
        other => panic!("expected MemberContainer, got {other:?}"),
    }
}

#[test]
fn method_flag_alone_selects_method_variant_with_overrides() {
    let mut facts = SymbolFacts::default();
    facts.flags.set(RelevantFlags::METHOD);
    facts.overridden_methods = vec![SymbolKey::Declared(9)];
    match select_variant(&facts) {
        SymbolVariant::Method { overrides } => assert_eq!(overrides, vec![SymbolKey::Declared(9)]),
        other => panic!("expected Method, got {other:?}"),
    }
}

/// A transient symbol that does carry declarations (e.g. a synthesized
/// union member with a real backing site) is not the sentinel `Unknown` key
/// — only transient symbols with *no* declarations are.
#[test]
fn transient_with_declarations_is_not_the_unknown_sentinel() {
    let mut facts = SymbolFacts::default();
    facts.flags.set(RelevantFlags::TRANSIENT);
    facts.declarations = vec![site("a.ts", 0, 4, 1, None)];
    match symbol_key(&facts) {
        SymbolKey::Transient(_) => {}
        other => panic!("expected Transient(_), got {other:?}"),
    }
}

/// Two symbols with distinct declaration sites never collide on key, even
/// when one is a prefix of the other's hash input by coincidence of sort
/// order.
#[test]
fn distinct_declaration_sites_key_differently() {
    let mut a = SymbolFacts::default();
    a.declarations = vec![site("a.ts", 0, 5, 1, None)];
    let mut b = SymbolFacts::default();
    b.declarations = vec![site("a.ts", 0, 6, 1, None)];
    assert_ne!(symbol_key(&a), symbol_key(&b));
}

/// Emission scope looks only at the single declaration's boundary — a
/// symbol with one declaration but no enclosing boundary (e.g. a top-level
/// unexported `const`) keeps project lifetime.
#[test]
fn single_declaration_outside_any_boundary_has_no_scope() {
    let mut facts = SymbolFacts::default();
    facts.declarations = vec![site("a.ts", 0, 1, 1, None)];
    assert_eq!(select_emission_scope(&facts), None);
}

/// An exported symbol is never scoped even when its only declaration sits
/// inside a boundary — export always forces project lifetime so external
/// references elsewhere in the project can still resolve to it.
#[test]
fn exported_single_declaration_in_boundary_is_still_unscoped() {
    let mut facts = SymbolFacts::default();
    facts.is_exported = true;
    facts.declarations = vec![site("a.ts", 0, 1, 1, Some(ScopeKey(3)))];
    assert_eq!(select_emission_scope(&facts), None);
}
