//! Serializes elements to a sink, hiding format (§4.2).
//!
//! Grounded on `alidn-universal-lsif`'s `emitter::emitter::Emitter` trait
//! (`start`/`emit_vertex`/`emit_edge`/`end`) and `boil-ninjin-lsif-parser`'s
//! `ElementTrait`. The indexer is written entirely against the `Emitter`
//! trait here and never inspects which format is active, per §4.2.

use std::collections::HashMap;
use std::io::Write;

use serde_json::Value;

use crate::elements::{Element, ElementBody};
use crate::error::IndexError;
use crate::id::ElementId;

/// A sink for graph elements. `start`/`end` bracket the whole stream;
/// `flush` is called at document and project boundaries so a file sink
/// can checkpoint without waiting for the run to finish (§5 "the only
/// suspension point is the I/O-bound flush at the end").
pub trait Emitter {
    fn start(&mut self) -> Result<(), IndexError>;
    fn emit(&mut self, element: Element) -> Result<(), IndexError>;
    fn flush(&mut self) -> Result<(), IndexError>;
    fn end(&mut self) -> Result<(), IndexError>;
}

/// One element per line, newline-delimited JSON. The default LSIF wire
/// format.
pub struct LineDelimitedJsonEmitter<W: Write> {
    sink: W,
}

impl<W: Write> LineDelimitedJsonEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> Emitter for LineDelimitedJsonEmitter<W> {
    fn start(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn emit(&mut self, element: Element) -> Result<(), IndexError> {
        let line = serde_json::to_string(&element)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        writeln!(self.sink, "{line}")
            .map_err(|e| IndexError::state_assertion(format!("emitter write failed: {e}")))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IndexError> {
        self.sink
            .flush()
            .map_err(|e| IndexError::state_assertion(format!("emitter flush failed: {e}")))
    }

    fn end(&mut self) -> Result<(), IndexError> {
        self.flush()
    }
}

/// A single pretty-printed JSON array of every element, buffered in memory
/// until `end()`.
pub struct PrettyJsonEmitter<W: Write> {
    sink: W,
    buffer: Vec<Element>,
}

impl<W: Write> PrettyJsonEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: Vec::new(),
        }
    }
}

impl<W: Write> Emitter for PrettyJsonEmitter<W> {
    fn start(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn emit(&mut self, element: Element) -> Result<(), IndexError> {
        self.buffer.push(element);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn end(&mut self) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(&self.buffer)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        self.sink
            .write_all(json.as_bytes())
            .map_err(|e| IndexError::state_assertion(format!("emitter write failed: {e}")))?;
        self.sink
            .flush()
            .map_err(|e| IndexError::state_assertion(format!("emitter flush failed: {e}")))
    }
}

/// A graph-visualization aggregate: every vertex rendered once, with its
/// outgoing and incoming edges collapsed into embedded lists, rather than a
/// flat element stream. Grounded in `boil-ninjin-lsif-parser`'s modeling of
/// vertices and edges as a typed graph rather than a raw JSON stream.
pub struct GraphVizEmitter<W: Write> {
    sink: W,
    vertices: Vec<Value>,
    out_edges: HashMap<ElementId, Vec<Value>>,
    in_edges: HashMap<ElementId, Vec<Value>>,
}

impl<W: Write> GraphVizEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            vertices: Vec::new(),
            out_edges: HashMap::new(),
            in_edges: HashMap::new(),
        }
    }

    fn edge_endpoints(edge: &crate::elements::Edge) -> (Vec<ElementId>, Vec<ElementId>) {
        use crate::elements::Edge::*;
        match edge {
            Contains { out_v, in_vs } => (vec![*out_v], in_vs.clone()),
            Next { out_v, in_v }
            | Moniker { out_v, in_v }
            | PackageInformation { out_v, in_v }
            | Attach { out_v, in_v }
            | TextDocumentHover { out_v, in_v }
            | TextDocumentDefinition { out_v, in_v }
            | TextDocumentTypeDefinition { out_v, in_v }
            | TextDocumentReferences { out_v, in_v }
            | TextDocumentImplementation { out_v, in_v }
            | TextDocumentDocumentSymbol { out_v, in_v }
            | TextDocumentFoldingRange { out_v, in_v }
            | TextDocumentDiagnostic { out_v, in_v } => (vec![*out_v], vec![*in_v]),
            Item { out_v, in_vs, .. } => (vec![*out_v], in_vs.clone()),
        }
    }
}

impl<W: Write> Emitter for GraphVizEmitter<W> {
    fn start(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn emit(&mut self, element: Element) -> Result<(), IndexError> {
        let id = element.id;
        let value = serde_json::to_value(&element)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        match &element.body {
            ElementBody::Vertex(_) => self.vertices.push(value),
            ElementBody::Edge(e) => {
                let (outs, ins) = Self::edge_endpoints(e);
                for out_v in outs {
                    self.out_edges.entry(out_v).or_default().push(value.clone());
                }
                for in_v in ins {
                    self.in_edges.entry(in_v).or_default().push(value.clone());
                }
                let _ = id;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn end(&mut self) -> Result<(), IndexError> {
        let mut aggregates = Vec::with_capacity(self.vertices.len());
        for vertex in &self.vertices {
            let id_value = vertex.get("id").cloned().unwrap_or(Value::Null);
            let id = serde_json::from_value::<ElementId>(id_value).ok();
            let mut aggregate = vertex.clone();
            if let Some(obj) = aggregate.as_object_mut() {
                if let Some(id) = id {
                    obj.insert(
                        "out".to_string(),
                        Value::Array(self.out_edges.get(&id).cloned().unwrap_or_default()),
                    );
                    obj.insert(
                        "in".to_string(),
                        Value::Array(self.in_edges.get(&id).cloned().unwrap_or_default()),
                    );
                }
            }
            aggregates.push(aggregate);
        }
        let json = serde_json::to_string_pretty(&aggregates)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        self.sink
            .write_all(json.as_bytes())
            .map_err(|e| IndexError::state_assertion(format!("emitter write failed: {e}")))?;
        self.sink
            .flush()
            .map_err(|e| IndexError::state_assertion(format!("emitter flush failed: {e}")))
    }
}

/// A graph-database dialect: one record per vertex, each carrying reciprocal
/// `in`/`out` adjacency maps keyed by edge label, suited to bulk-loading into
/// a property graph store.
pub struct GraphDbEmitter<W: Write> {
    sink: W,
    records: HashMap<ElementId, GraphDbRecord>,
    order: Vec<ElementId>,
}

struct GraphDbRecord {
    vertex: Value,
    out: HashMap<String, Vec<ElementId>>,
    r#in: HashMap<String, Vec<ElementId>>,
}

impl<W: Write> GraphDbEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<W: Write> Emitter for GraphDbEmitter<W> {
    fn start(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn emit(&mut self, element: Element) -> Result<(), IndexError> {
        let value = serde_json::to_value(&element)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        match &element.body {
            ElementBody::Vertex(_) => {
                self.order.push(element.id);
                self.records.insert(
                    element.id,
                    GraphDbRecord {
                        vertex: value,
                        out: HashMap::new(),
                        r#in: HashMap::new(),
                    },
                );
            }
            ElementBody::Edge(e) => {
                let label = value
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                let (outs, ins) = GraphVizEmitter::<W>::edge_endpoints(e);
                for out_v in &outs {
                    if let Some(r) = self.records.get_mut(out_v) {
                        r.out.entry(label.clone()).or_default().extend(ins.iter().copied());
                    }
                }
                for in_v in &ins {
                    if let Some(r) = self.records.get_mut(in_v) {
                        r.r#in.entry(label.clone()).or_default().extend(outs.iter().copied());
                    }
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn end(&mut self) -> Result<(), IndexError> {
        let mut out = Vec::with_capacity(self.order.len());
        for id in &self.order {
            let record = self.records.get(id).expect("record tracked in order");
            let mut entry = record.vertex.clone();
            if let Some(obj) = entry.as_object_mut() {
                obj.insert(
                    "outEdges".to_string(),
                    serde_json::to_value(&record.out).unwrap_or(Value::Null),
                );
                obj.insert(
                    "inEdges".to_string(),
                    serde_json::to_value(&record.r#in).unwrap_or(Value::Null),
                );
            }
            out.push(entry);
        }
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| IndexError::state_assertion(format!("element serialization failed: {e}")))?;
        self.sink
            .write_all(json.as_bytes())
            .map_err(|e| IndexError::state_assertion(format!("emitter write failed: {e}")))?;
        self.sink
            .flush()
            .map_err(|e| IndexError::state_assertion(format!("emitter flush failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Edge, EventKind, EventScope, Vertex};
    use crate::id::ElementId;

    #[test]
    fn line_delimited_emits_one_json_object_per_line() {
        let mut buf = Vec::new();
        {
            let mut emitter = LineDelimitedJsonEmitter::new(&mut buf);
            emitter.start().unwrap();
            emitter
                .emit(Element::vertex(ElementId::Int(1), Vertex::ResultSet {}))
                .unwrap();
            emitter
                .emit(Element::edge(
                    ElementId::Int(2),
                    Edge::Next {
                        out_v: ElementId::Int(1),
                        in_v: ElementId::Int(1),
                    },
                ))
                .unwrap();
            emitter.end().unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().contains("resultSet"));
    }

    #[test]
    fn pretty_json_buffers_then_writes_array() {
        let mut buf = Vec::new();
        {
            let mut emitter = PrettyJsonEmitter::new(&mut buf);
            emitter.start().unwrap();
            emitter
                .emit(Element::vertex(
                    ElementId::Int(1),
                    Vertex::Event {
                        scope: EventScope::Project,
                        kind: EventKind::Begin,
                        data: ElementId::Int(1),
                    },
                ))
                .unwrap();
            emitter.end().unwrap();
        }
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn graph_viz_aggregates_edges_onto_vertices() {
        let mut buf = Vec::new();
        {
            let mut emitter = GraphVizEmitter::new(&mut buf);
            emitter.start().unwrap();
            emitter
                .emit(Element::vertex(ElementId::Int(1), Vertex::ResultSet {}))
                .unwrap();
            emitter
                .emit(Element::vertex(ElementId::Int(2), Vertex::ResultSet {}))
                .unwrap();
            emitter
                .emit(Element::edge(
                    ElementId::Int(3),
                    Edge::Next {
                        out_v: ElementId::Int(1),
                        in_v: ElementId::Int(2),
                    },
                ))
                .unwrap();
            emitter.end().unwrap();
        }
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr[0]["out"].as_array().unwrap().len(), 1);
        assert_eq!(arr[1]["in"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn graph_db_records_reciprocal_adjacency() {
        let mut buf = Vec::new();
        {
            let mut emitter = GraphDbEmitter::new(&mut buf);
            emitter.start().unwrap();
            emitter
                .emit(Element::vertex(ElementId::Int(1), Vertex::ResultSet {}))
                .unwrap();
            emitter
                .emit(Element::vertex(ElementId::Int(2), Vertex::ResultSet {}))
                .unwrap();
            emitter
                .emit(Element::edge(
                    ElementId::Int(3),
                    Edge::Next {
                        out_v: ElementId::Int(1),
                        in_v: ElementId::Int(2),
                    },
                ))
                .unwrap();
            emitter.end().unwrap();
        }
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert!(arr[0]["outEdges"]["next"].as_array().unwrap().contains(&serde_json::json!(2)));
        assert!(arr[1]["inEdges"]["next"].as_array().unwrap().contains(&serde_json::json!(1)));
    }
}
