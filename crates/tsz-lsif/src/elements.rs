//! Vertex and edge payloads of the LSIF graph (§3, §6).
//!
//! Modeled as tagged enums the way `boil-ninjin-lsif-parser`'s `Vertex`/`Edge`
//! enums are, rather than class-per-label polymorphism (§9 "dynamic dispatch
//! over symbol kinds" applies just as well here).

use serde::{Deserialize, Serialize};

use crate::id::ElementId;

/// A half-open `[start, end)` range over a document, in LSP line/character
/// coordinates. Grounded on `tsz_common::position::Range`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LspPosition {
    pub line: u32,
    pub character: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LspRange {
    pub start: LspPosition,
    pub end: LspPosition,
}

impl From<tsz_common::position::Range> for LspRange {
    fn from(r: tsz_common::position::Range) -> Self {
        LspRange {
            start: LspPosition {
                line: r.start.line,
                character: r.start.character,
            },
            end: LspPosition {
                line: r.end.line,
                character: r.end.character,
            },
        }
    }
}

/// Moniker uniqueness level (§3 "Moniker").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonikerUnique {
    Document,
    Project,
    Group,
    Scheme,
    Global,
}

/// Moniker kind (§3 "Moniker").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonikerKind {
    Local,
    Import,
    Export,
}

/// `event` vertex scope (§6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventScope {
    Project,
    Document,
    MonikerAttach,
}

/// `event` vertex kind (§6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Begin,
    End,
}

/// Diagnostic severity, mapped from the compiler's `DiagnosticCategory` in
/// `moniker.rs`'s sibling module `crate::reporter` per §7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> u8 {
        match s {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            other => Err(format!("{other} is not a valid LSIF diagnostic severity")),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarkedString {
    pub language: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HoverContents {
    pub contents: Vec<MarkedString>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosticPayload {
    pub range: LspRange,
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentSymbolNode {
    pub name: String,
    pub detail: Option<String>,
    pub kind: u32,
    pub range: LspRange,
    pub selection_range: LspRange,
    pub children: Vec<DocumentSymbolNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoldingRangePayload {
    pub start_line: u32,
    pub end_line: u32,
    pub kind: Option<String>,
}

/// Vertex payloads the core must emit (§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "label")]
#[serde(rename_all = "camelCase")]
pub enum Vertex {
    MetaData {
        version: String,
        #[serde(rename = "positionEncoding")]
        position_encoding: String,
        #[serde(rename = "projectRoot")]
        project_root: String,
    },
    Project {
        kind: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<String>,
    },
    Document {
        uri: String,
        #[serde(rename = "languageId")]
        language_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<String>,
    },
    Range {
        start: LspPosition,
        end: LspPosition,
        tag: RangeTagPayload,
    },
    ResultSet {},
    Moniker {
        scheme: String,
        identifier: String,
        unique: MonikerUnique,
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<MonikerKind>,
    },
    PackageInformation {
        name: String,
        manager: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        uri: Option<String>,
    },
    Event {
        scope: EventScope,
        kind: EventKind,
        data: ElementId,
    },
    HoverResult {
        result: HoverContents,
    },
    DefinitionResult {},
    TypeDefinitionResult {},
    ReferenceResult {},
    ImplementationResult {},
    DocumentSymbolResult {
        result: Vec<DocumentSymbolNode>,
    },
    FoldingRangeResult {
        result: Vec<FoldingRangePayload>,
    },
    DiagnosticResult {
        result: Vec<DiagnosticPayload>,
    },
}

/// The payload embedded in a `range` vertex's `tag` field (§3).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum RangeTagPayload {
    Declaration {
        text: String,
        kind: String,
        #[serde(rename = "fullRange")]
        full_range: LspRange,
    },
    Definition {
        text: String,
        kind: String,
        #[serde(rename = "fullRange")]
        full_range: LspRange,
    },
    Reference {
        text: String,
    },
    Unknown {},
}

/// The `property` carried by an `item` edge (§4.1, §6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemProperty {
    Definitions,
    References,
    ReferenceResults,
    ReferenceLinks,
    ImplementationLinks,
}

/// Edge labels the core must emit (§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "label")]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Contains {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inVs")]
        in_vs: Vec<ElementId>,
    },
    Next {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    Moniker {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    PackageInformation {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    Attach {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    Item {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inVs")]
        in_vs: Vec<ElementId>,
        shard: ElementId,
        #[serde(skip_serializing_if = "Option::is_none")]
        property: Option<ItemProperty>,
    },
    #[serde(rename = "textDocument/hover")]
    TextDocumentHover {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/definition")]
    TextDocumentDefinition {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/typeDefinition")]
    TextDocumentTypeDefinition {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/references")]
    TextDocumentReferences {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/implementation")]
    TextDocumentImplementation {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/documentSymbol")]
    TextDocumentDocumentSymbol {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/foldingRange")]
    TextDocumentFoldingRange {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
    #[serde(rename = "textDocument/diagnostic")]
    TextDocumentDiagnostic {
        #[serde(rename = "outV")]
        out_v: ElementId,
        #[serde(rename = "inV")]
        in_v: ElementId,
    },
}

/// The wire element: a numbered vertex or edge (§6 "Every element").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(flatten)]
    pub body: ElementBody,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Vertex,
    Edge,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementBody {
    Vertex(Vertex),
    Edge(Edge),
}

impl Element {
    pub fn vertex(id: ElementId, vertex: Vertex) -> Self {
        Element {
            id,
            element_type: ElementType::Vertex,
            body: ElementBody::Vertex(vertex),
        }
    }

    pub fn edge(id: ElementId, edge: Edge) -> Self {
        Element {
            id,
            element_type: ElementType::Edge,
            body: ElementBody::Edge(edge),
        }
    }
}
