//! Parses a line-delimited LSIF dump back into an in-memory graph and checks
//! the §8 "Round-trip laws": the set of `(from, to, label)` triples is
//! unchanged, and re-serialization is byte-identical modulo id reassignment
//! under a consistent id-substitution.

use std::collections::BTreeSet;

use crate::elements::{Edge, Element, ElementBody};
use crate::error::IndexError;
use crate::id::ElementId;

/// Parses an ndjson LSIF dump into its elements, in stream order.
pub fn parse_elements(ndjson: &str) -> Result<Vec<Element>, IndexError> {
    ndjson
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| IndexError::state_assertion(format!("roundtrip parse failed: {e}")))
        })
        .collect()
}

fn edge_label(edge: &Edge) -> &'static str {
    match edge {
        Edge::Contains { .. } => "contains",
        Edge::Next { .. } => "next",
        Edge::Moniker { .. } => "moniker",
        Edge::PackageInformation { .. } => "packageInformation",
        Edge::Attach { .. } => "attach",
        Edge::Item { .. } => "item",
        Edge::TextDocumentHover { .. } => "textDocument/hover",
        Edge::TextDocumentDefinition { .. } => "textDocument/definition",
        Edge::TextDocumentTypeDefinition { .. } => "textDocument/typeDefinition",
        Edge::TextDocumentReferences { .. } => "textDocument/references",
        Edge::TextDocumentImplementation { .. } => "textDocument/implementation",
        Edge::TextDocumentDocumentSymbol { .. } => "textDocument/documentSymbol",
        Edge::TextDocumentFoldingRange { .. } => "textDocument/foldingRange",
        Edge::TextDocumentDiagnostic { .. } => "textDocument/diagnostic",
    }
}

fn edge_endpoints(edge: &Edge) -> (ElementId, Vec<ElementId>) {
    match edge {
        Edge::Contains { out_v, in_vs } => (*out_v, in_vs.clone()),
        Edge::Item { out_v, in_vs, .. } => (*out_v, in_vs.clone()),
        Edge::Next { out_v, in_v }
        | Edge::Moniker { out_v, in_v }
        | Edge::PackageInformation { out_v, in_v }
        | Edge::Attach { out_v, in_v }
        | Edge::TextDocumentHover { out_v, in_v }
        | Edge::TextDocumentDefinition { out_v, in_v }
        | Edge::TextDocumentTypeDefinition { out_v, in_v }
        | Edge::TextDocumentReferences { out_v, in_v }
        | Edge::TextDocumentImplementation { out_v, in_v }
        | Edge::TextDocumentDocumentSymbol { out_v, in_v }
        | Edge::TextDocumentFoldingRange { out_v, in_v }
        | Edge::TextDocumentDiagnostic { out_v, in_v } => (*out_v, vec![*in_v]),
    }
}

/// Every vertex id in first-appearance order. Used to build a canonical,
/// id-reassignment-invariant position for each vertex.
fn vertex_order(elements: &[Element]) -> Vec<ElementId> {
    elements
        .iter()
        .filter(|e| matches!(e.body, ElementBody::Vertex(_)))
        .map(|e| e.id)
        .collect()
}

fn canonical_triples(elements: &[Element]) -> BTreeSet<(usize, usize, &'static str)> {
    let order = vertex_order(elements);
    let position = |id: ElementId| -> usize {
        order
            .iter()
            .position(|&v| v == id)
            .expect("edge endpoint references an emitted vertex (invariant 1)")
    };

    let mut triples = BTreeSet::new();
    for element in elements {
        if let ElementBody::Edge(edge) = &element.body {
            let (from, tos) = edge_endpoints(edge);
            let label = edge_label(edge);
            for to in tos {
                triples.insert((position(from), position(to), label));
            }
        }
    }
    triples
}

/// Checks that two element streams (e.g. the same project indexed twice
/// under different `IdMode`s) describe the same graph: the same
/// `(from, to, label)` triples once every vertex is mapped to its
/// first-appearance position, a stand-in for a consistent id-substitution.
pub fn same_graph_under_id_substitution(a: &[Element], b: &[Element]) -> bool {
    canonical_triples(a) == canonical_triples(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementType, Vertex};

    fn ndjson(elements: &[Element]) -> String {
        elements
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parses_each_line_as_one_element() {
        let elements = vec![
            Element::vertex(ElementId::Int(1), Vertex::ResultSet {}),
            Element::edge(
                ElementId::Int(2),
                Edge::Next {
                    out_v: ElementId::Int(1),
                    in_v: ElementId::Int(1),
                },
            ),
        ];
        let parsed = parse_elements(&ndjson(&elements)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].element_type, ElementType::Vertex);
        assert_eq!(parsed[1].element_type, ElementType::Edge);
    }

    #[test]
    fn skips_blank_lines() {
        let elements = vec![Element::vertex(ElementId::Int(1), Vertex::ResultSet {})];
        let text = format!("\n{}\n\n", ndjson(&elements));
        assert_eq!(parse_elements(&text).unwrap().len(), 1);
    }

    #[test]
    fn identical_streams_match_under_substitution() {
        let a = vec![
            Element::vertex(ElementId::Int(1), Vertex::ResultSet {}),
            Element::vertex(ElementId::Int(2), Vertex::ResultSet {}),
            Element::edge(
                ElementId::Int(3),
                Edge::Next {
                    out_v: ElementId::Int(1),
                    in_v: ElementId::Int(2),
                },
            ),
        ];
        // Same graph, ids shifted by a constant offset, as a monotonic vs.
        // monotonic run starting from a different counter would produce.
        let b = vec![
            Element::vertex(ElementId::Int(101), Vertex::ResultSet {}),
            Element::vertex(ElementId::Int(102), Vertex::ResultSet {}),
            Element::edge(
                ElementId::Int(103),
                Edge::Next {
                    out_v: ElementId::Int(101),
                    in_v: ElementId::Int(102),
                },
            ),
        ];
        assert!(same_graph_under_id_substitution(&a, &b));
    }

    #[test]
    fn different_edge_direction_is_not_a_match() {
        let a = vec![
            Element::vertex(ElementId::Int(1), Vertex::ResultSet {}),
            Element::vertex(ElementId::Int(2), Vertex::ResultSet {}),
            Element::edge(
                ElementId::Int(3),
                Edge::Next {
                    out_v: ElementId::Int(1),
                    in_v: ElementId::Int(2),
                },
            ),
        ];
        let b = vec![
            Element::vertex(ElementId::Int(1), Vertex::ResultSet {}),
            Element::vertex(ElementId::Int(2), Vertex::ResultSet {}),
            Element::edge(
                ElementId::Int(3),
                Edge::Next {
                    out_v: ElementId::Int(2),
                    in_v: ElementId::Int(1),
                },
            ),
        ];
        assert!(!same_graph_under_id_substitution(&a, &b));
    }
}
