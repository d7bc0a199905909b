//! Pure factory for vertices and edges (§4.1 "Graph Builder").
//!
//! The builder never emits; callers hand its output to an `Emitter`. Grounded
//! on `alidn-universal-lsif`'s `Indexer` which keeps vertex/edge construction
//! (`ResultSet {}`, `edge!(Next, ...)`) entirely separate from the sink.

use crate::elements::{
    DiagnosticPayload, Edge, Element, EventKind, EventScope, FoldingRangePayload, HoverContents,
    DocumentSymbolNode, ItemProperty, LspRange, MonikerKind, MonikerUnique, RangeTagPayload, Vertex,
};
use crate::error::IndexError;
use crate::id::{ElementId, IdGenerator};

/// Stateless (beyond id generation) factory for graph elements.
pub struct GraphBuilder<'a> {
    ids: &'a IdGenerator,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(ids: &'a IdGenerator) -> Self {
        Self { ids }
    }

    fn vertex(&self, vertex: Vertex) -> (ElementId, Element) {
        let id = self.ids.fresh();
        (id, Element::vertex(id, vertex))
    }

    fn edge(&self, edge: Edge) -> (ElementId, Element) {
        let id = self.ids.fresh();
        (id, Element::edge(id, edge))
    }

    pub fn meta_data(&self, version: &str, project_root: &str) -> (ElementId, Element) {
        self.vertex(Vertex::MetaData {
            version: version.to_string(),
            position_encoding: "utf-16".to_string(),
            project_root: project_root.to_string(),
        })
    }

    pub fn project(&self, name: &str, kind: &str, contents: Option<String>) -> (ElementId, Element) {
        self.vertex(Vertex::Project {
            kind: kind.to_string(),
            name: name.to_string(),
            contents,
        })
    }

    pub fn document(&self, path: &str, language_id: &str, contents: Option<String>) -> (ElementId, Element) {
        self.vertex(Vertex::Document {
            uri: path.to_string(),
            language_id: language_id.to_string(),
            contents,
        })
    }

    pub fn result_set(&self) -> (ElementId, Element) {
        self.vertex(Vertex::ResultSet {})
    }

    pub fn range(&self, span: LspRange, tag: RangeTagPayload) -> (ElementId, Element) {
        self.vertex(Vertex::Range {
            start: span.start,
            end: span.end,
            tag,
        })
    }

    pub fn moniker(
        &self,
        scheme: &str,
        identifier: &str,
        unique: MonikerUnique,
        kind: Option<MonikerKind>,
    ) -> (ElementId, Element) {
        self.vertex(Vertex::Moniker {
            scheme: scheme.to_string(),
            identifier: identifier.to_string(),
            unique,
            kind,
        })
    }

    pub fn package_information(
        &self,
        name: &str,
        manager: &str,
        version: Option<String>,
    ) -> (ElementId, Element) {
        self.vertex(Vertex::PackageInformation {
            name: name.to_string(),
            manager: manager.to_string(),
            version,
            uri: None,
        })
    }

    pub fn hover_result(&self, contents: HoverContents) -> (ElementId, Element) {
        self.vertex(Vertex::HoverResult { result: contents })
    }

    pub fn definition_result(&self) -> (ElementId, Element) {
        self.vertex(Vertex::DefinitionResult {})
    }

    pub fn type_definition_result(&self) -> (ElementId, Element) {
        self.vertex(Vertex::TypeDefinitionResult {})
    }

    pub fn reference_result(&self) -> (ElementId, Element) {
        self.vertex(Vertex::ReferenceResult {})
    }

    pub fn implementation_result(&self) -> (ElementId, Element) {
        self.vertex(Vertex::ImplementationResult {})
    }

    pub fn diagnostic_result(&self, diagnostics: Vec<DiagnosticPayload>) -> (ElementId, Element) {
        self.vertex(Vertex::DiagnosticResult { result: diagnostics })
    }

    pub fn folding_range_result(&self, folding_ranges: Vec<FoldingRangePayload>) -> (ElementId, Element) {
        self.vertex(Vertex::FoldingRangeResult { result: folding_ranges })
    }

    pub fn document_symbol_result(&self, document_symbols: Vec<DocumentSymbolNode>) -> (ElementId, Element) {
        self.vertex(Vertex::DocumentSymbolResult { result: document_symbols })
    }

    pub fn event(&self, scope: EventScope, kind: EventKind, data: ElementId) -> (ElementId, Element) {
        self.vertex(Vertex::Event { scope, kind, data })
    }

    pub fn contains(&self, parent: ElementId, children: Vec<ElementId>) -> (ElementId, Element) {
        self.edge(Edge::Contains {
            out_v: parent,
            in_vs: children,
        })
    }

    pub fn next(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::Next {
            out_v: from,
            in_v: to,
        })
    }

    pub fn moniker_edge(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::Moniker {
            out_v: from,
            in_v: to,
        })
    }

    pub fn package_information_edge(&self, moniker: ElementId, pkg: ElementId) -> (ElementId, Element) {
        self.edge(Edge::PackageInformation {
            out_v: moniker,
            in_v: pkg,
        })
    }

    pub fn attach(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::Attach {
            out_v: from,
            in_v: to,
        })
    }

    /// Constructs an `item` edge, applying the §4.1 property-inference rules.
    ///
    /// - (a) empty `targets` with a reference-result `from` ⇒ `property = references`.
    /// - (b) a reference-result `from` with range targets requires an explicit `property`.
    /// - (c) reference-result → reference-result ⇒ `property = referenceResults`.
    /// - (d) reference-result → moniker ⇒ `property = referenceLinks`.
    /// - (e) implementation-result → moniker ⇒ `property = implementationLinks`.
    pub fn item(
        &self,
        source: ItemSource,
        from: ElementId,
        targets: Vec<ElementId>,
        shard: ElementId,
        property: Option<ItemProperty>,
    ) -> Result<(ElementId, Element), IndexError> {
        let resolved = match (source, targets.is_empty(), property) {
            (ItemSource::ReferenceResult, true, None) => Some(ItemProperty::References),
            (ItemSource::ReferenceResult, false, Some(p)) => Some(p),
            (ItemSource::ReferenceResult, false, None) => {
                return Err(IndexError::ProtocolViolation {
                    detail: "item edge from a reference-result to ranges requires an explicit property".into(),
                });
            }
            (ItemSource::ReferenceResultToReferenceResult, _, _) => Some(ItemProperty::ReferenceResults),
            (ItemSource::ReferenceResultToMoniker, _, _) => Some(ItemProperty::ReferenceLinks),
            (ItemSource::ImplementationResultToMoniker, _, _) => Some(ItemProperty::ImplementationLinks),
            (ItemSource::DefinitionResult, _, _) => Some(property.unwrap_or(ItemProperty::Definitions)),
        };
        Ok(self.edge(Edge::Item {
            out_v: from,
            in_vs: targets,
            shard,
            property: resolved,
        }))
    }

    pub fn text_document_hover(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentHover {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_definition(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentDefinition {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_type_definition(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentTypeDefinition {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_references(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentReferences {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_implementation(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentImplementation {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_document_symbol(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentDocumentSymbol {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_folding_range(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentFoldingRange {
            out_v: from,
            in_v: to,
        })
    }

    pub fn text_document_diagnostic(&self, from: ElementId, to: ElementId) -> (ElementId, Element) {
        self.edge(Edge::TextDocumentDiagnostic {
            out_v: from,
            in_v: to,
        })
    }
}

/// The kind of vertex an `item` edge originates from, used to pick the §4.1
/// property-inference rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemSource {
    DefinitionResult,
    ReferenceResult,
    ReferenceResultToReferenceResult,
    ReferenceResultToMoniker,
    ImplementationResultToMoniker,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdMode;

    #[test]
    fn empty_targets_from_reference_result_infers_references_property() {
        let ids = IdGenerator::new(IdMode::Monotonic);
        let builder = GraphBuilder::new(&ids);
        let (rr_id, _) = builder.reference_result();
        let (_, el) = builder
            .item(ItemSource::ReferenceResult, rr_id, vec![], rr_id, None)
            .unwrap();
        match el.body {
            crate::elements::ElementBody::Edge(Edge::Item { property, .. }) => {
                assert_eq!(property, Some(ItemProperty::References));
            }
            _ => panic!("expected item edge"),
        }
    }

    #[test]
    fn reference_result_with_ranges_requires_explicit_property() {
        let ids = IdGenerator::new(IdMode::Monotonic);
        let builder = GraphBuilder::new(&ids);
        let (rr_id, _) = builder.reference_result();
        let (range_id, _) = builder.range(
            LspRange {
                start: crate::elements::LspPosition { line: 0, character: 0 },
                end: crate::elements::LspPosition { line: 0, character: 1 },
            },
            RangeTagPayload::Unknown {},
        );
        let err = builder
            .item(ItemSource::ReferenceResult, rr_id, vec![range_id], rr_id, None)
            .unwrap_err();
        assert!(matches!(err, IndexError::ProtocolViolation { .. }));
    }
}
