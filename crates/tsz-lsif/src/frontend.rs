//! The compiler front-end contract the indexer consumes (§6).
//!
//! The visitor never touches `tsz_checker::state::CheckerState` or
//! `tsz_binder::BinderState` directly — those crates expose far more than an
//! indexer needs, and most of their surface is `pub(crate)` (see
//! `tsz_checker::scope_finder`, which walks `self.ctx.arena` through methods
//! private to the checker crate). Instead the indexer is written against
//! this trait, which names exactly the capabilities §6 promises: enumerate
//! source files, parse to an AST of kind/parent/offset/symbol-bearing nodes,
//! resolve a position to a symbol, enumerate a symbol's declarations, flags,
//! parent, exports, members, and aliased target, and answer quick-info /
//! outlining / diagnostics queries. A production embedding implements this
//! trait as a thin facade over `tsz-checker` and `tsz-binder`.

use tsz_common::position::Range;

use crate::elements::{DiagnosticPayload, FoldingRangePayload, HoverContents};

/// Opaque handle to a source file known to the front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceFileRef(pub u32);

/// Opaque handle to an AST node, back-referenced through `Frontend` rather
/// than dereferenced directly (§9 "back-reference identifiers, not
/// pointers").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: SourceFileRef,
    pub index: u32,
}

/// Opaque handle to a canonical compiler symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolRef(pub u64);

/// What kind of source-level construct a node represents, as far as the
/// visitor cares (§4.5 "classify by syntactic kind"). A production
/// implementation derives this from `tsz_parser::parser::syntax_kind_ext`
/// constants compared against the node's raw `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    SourceFile,
    /// module / class / interface / function / method / type-parameter / parameter.
    ContainerDeclaration,
    IdentifierReference,
    Transparent,
}

/// A declaration site as the front-end reports it, before the resolver
/// canonicalizes it into a `DeclarationSite` (§4.4).
#[derive(Clone, Debug)]
pub struct FrontendDeclaration {
    pub node: NodeRef,
    pub range: Range,
    pub kind: u16,
}

/// The symbol facts a front-end must be able to report (§6 "enumerate
/// declarations, flags, parent symbol, exports, members, and aliased
/// target").
#[derive(Clone, Debug, Default)]
pub struct FrontendSymbolInfo {
    pub declarations: Vec<FrontendDeclaration>,
    pub is_exported: bool,
    pub is_alias: bool,
    pub is_class_or_interface: bool,
    pub is_method: bool,
    pub is_transient: bool,
    /// `true` when the sole declaration sits inside a `declare global { … }`
    /// block (§8 scenario 6): the moniker path component is empty.
    pub is_global_scope: bool,
    pub aliased: Option<SymbolRef>,
    pub heritage_bases: Vec<SymbolRef>,
    pub overridden_methods: Vec<SymbolRef>,
    /// Non-overlapping constituent symbols of a union/intersection type that
    /// has no declaration of its own (§4.5 "composite symbols").
    pub composite_constituents: Vec<SymbolRef>,
}

/// The capabilities the indexer consumes from a compiled project (§6).
pub trait Frontend {
    fn source_files(&self) -> Vec<SourceFileRef>;
    fn file_name(&self, file: SourceFileRef) -> String;
    fn root_node(&self, file: SourceFileRef) -> NodeRef;

    fn node_class(&self, node: NodeRef) -> NodeClass;
    fn node_range(&self, node: NodeRef) -> Range;
    fn node_children(&self, node: NodeRef) -> Vec<NodeRef>;
    fn node_parent(&self, node: NodeRef) -> Option<NodeRef>;
    /// The node's own name, if it is a declaration with a source-level name
    /// (used for the `documentSymbol` tree and declaration-range text).
    fn node_name(&self, node: NodeRef) -> Option<String>;
    /// `true` for a syntactic node-kind that scopes or forbids moniker-path
    /// construction: function bodies, class bodies, block-scoped
    /// let/const, parameters, type-parameters, arrow functions, … (§4.4
    /// "designated emit-boundary node-kind", GLOSSARY "Emit-boundary").
    fn is_emit_boundary(&self, node: NodeRef) -> bool;
    /// A short lowercase label for the range-tag `kind` field, e.g.
    /// `"function"`, `"class"`, `"variable"`.
    fn declaration_kind_label(&self, node: NodeRef) -> String;
    /// The LSP `SymbolKind` numeric value for a `documentSymbol` entry.
    fn lsp_symbol_kind(&self, node: NodeRef) -> u32;

    /// Resolves a node to its canonical symbol, if any (§6 "for each `Node`
    /// position, resolve to a canonical `Symbol`").
    fn node_symbol(&self, node: NodeRef) -> Option<SymbolRef>;
    fn symbol_info(&self, symbol: SymbolRef) -> FrontendSymbolInfo;

    fn quick_info(&self, node: NodeRef) -> Option<HoverContents>;
    fn outlining_spans(&self, file: SourceFileRef) -> Vec<FoldingRangePayload>;
    fn diagnostics(&self, file: SourceFileRef) -> Vec<DiagnosticPayload>;

    /// Exported symbols reachable from the file symbol's `exports` map (§4.5
    /// step 2), transitively expanded through re-exports.
    fn exported_symbols(&self, file: SourceFileRef) -> Vec<SymbolRef>;
}
