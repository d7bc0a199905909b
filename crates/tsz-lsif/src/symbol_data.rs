//! The durable, non-emitted projection of a compiler symbol in the LSIF
//! graph (§3 "SymbolData", §9 "dynamic dispatch over symbol kinds").
//!
//! Modeled as a tagged variant rather than class-per-kind polymorphism, per
//! §9: `SymbolData = Standard | Alias | MemberContainer | Method`, plus a
//! `Transient` case for synthesized (compiler-internal) symbols that never
//! resolve to a declaration.

use rustc_hash::FxHashMap;

use crate::id::ElementId;

/// A document identifier, as handed out by the Data Manager when a document
/// is first visited.
pub type DocumentId = ElementId;

/// A stable identity key for a compiler symbol (§4.4 "symbol identity key"):
/// the hash of the sorted list of `(file, start, end, kind)` of its
/// declarations, salted with a marker if the symbol is synthesized.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKey {
    /// Hash of the sorted declaration-site tuples.
    Declared(u64),
    /// A synthesized (transient) symbol, additionally salted so it can never
    /// collide with a declared symbol's key.
    Transient(u64),
    /// Sentinel keys for symbols with no declarations (§4.4).
    Unknown,
    Undefined,
    NoneSymbol,
}

/// Per-document slice of a symbol-data's pending `item` edges (§3
/// "SymbolDataPartition", GLOSSARY "Partition").
#[derive(Default, Debug, Clone)]
pub struct SymbolDataPartition {
    pub definition_ranges: Vec<ElementId>,
    pub reference_ranges: Vec<ElementId>,
    pub type_definition_ranges: Vec<ElementId>,
    pub implementation_ranges: Vec<ElementId>,
}

impl SymbolDataPartition {
    pub fn is_empty(&self) -> bool {
        self.definition_ranges.is_empty()
            && self.reference_ranges.is_empty()
            && self.type_definition_ranges.is_empty()
            && self.implementation_ranges.is_empty()
    }
}

/// The result vertices a result-set may own at most one each of (§3
/// "ResultSet").
#[derive(Default, Debug, Clone)]
pub struct ResultVertices {
    pub hover_result: Option<ElementId>,
    pub definition_result: Option<ElementId>,
    pub reference_result: Option<ElementId>,
    pub type_definition_result: Option<ElementId>,
    pub implementation_result: Option<ElementId>,
    pub moniker: Option<ElementId>,
}

/// The syntactic boundary a scoped symbol-data is torn down at (§3 invariant
/// 7, §4.4 "emission scope"). Carried as a back-reference identifier — an
/// opaque node key — rather than a pointer into the AST, per §9 "Cyclic
/// graphs" (back-reference identifiers, not pointers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeKey(pub u64);

/// Specialisation selected by the symbol's flags (§4.4 table).
#[derive(Debug, Clone)]
pub enum SymbolVariant {
    /// Plain definition/reference/moniker bookkeeping: `TypeLiteral`,
    /// `Function`, and the default case.
    Standard,
    /// Forwards defs/refs to the aliased symbol's data; only attaches its
    /// own rename range (§4.4.2).
    Alias { aliased: SymbolKey },
    /// Resolves base symbols from heritage; member lookups walk the base
    /// chain. `Class` / `Interface`.
    MemberContainer { bases: Vec<SymbolKey> },
    /// Finds overridden methods in ancestor containers; shares reference
    /// results with them.
    Method { overrides: Vec<SymbolKey> },
    /// A compiler-synthesized symbol with no source declaration (composite
    /// leaf expansion, §4.5 "Composite symbols").
    Transient,
}

/// The durable projection of one compiler symbol (§3 "SymbolData").
#[derive(Debug, Clone)]
pub struct SymbolData {
    pub key: SymbolKey,
    pub variant: SymbolVariant,
    pub result_set_id: ElementId,
    pub results: ResultVertices,
    pub partitions: FxHashMap<DocumentId, SymbolDataPartition>,
    /// `Some` when this symbol-data is scoped (§3 invariant 7); `None` means
    /// it lives for the whole project.
    pub scope: Option<ScopeKey>,
    /// Set once the scope has closed or the project has ended; further
    /// mutation is a `StateAssertion` bug (§7).
    pub closed: bool,
}

impl SymbolData {
    pub fn new(key: SymbolKey, variant: SymbolVariant, result_set_id: ElementId, scope: Option<ScopeKey>) -> Self {
        SymbolData {
            key,
            variant,
            result_set_id,
            results: ResultVertices::default(),
            partitions: FxHashMap::default(),
            scope,
            closed: false,
        }
    }

    pub fn partition_mut(&mut self, document: DocumentId) -> &mut SymbolDataPartition {
        self.partitions.entry(document).or_default()
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;

    #[test]
    fn partition_starts_empty() {
        let mut sd = SymbolData::new(
            SymbolKey::Unknown,
            SymbolVariant::Standard,
            ElementId::Int(1),
            None,
        );
        let p = sd.partition_mut(ElementId::Int(2));
        assert!(p.is_empty());
        p.reference_ranges.push(ElementId::Int(3));
        assert!(!sd.partitions[&ElementId::Int(2)].is_empty());
    }

    #[test]
    fn unscoped_symbol_is_project_lifetime() {
        let sd = SymbolData::new(
            SymbolKey::Unknown,
            SymbolVariant::Standard,
            ElementId::Int(1),
            None,
        );
        assert!(!sd.is_scoped());
    }
}
