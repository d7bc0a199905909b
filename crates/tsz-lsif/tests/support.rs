//! A hand-built `Frontend` implementation standing in for the compiler
//! front-end (§6), so scenario tests can drive the real `Visitor` +
//! `DataManager` pipeline without a parser/checker/binder pipeline.
//!
//! Mirrors the shape of `tsz-checker`'s test fixtures (a fully-built fixture
//! handed to the thing under test) rather than re-deriving an AST from
//! source text: each scenario builds its tiny node arena directly.

#![allow(dead_code)]

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use tsz_common::position::{Position, Range};

use tsz_lsif::elements::{DiagnosticPayload, Element, FoldingRangePayload, HoverContents};
use tsz_lsif::emitter::Emitter;
use tsz_lsif::error::IndexError;
use tsz_lsif::frontend::{
    Frontend, FrontendDeclaration, FrontendSymbolInfo, NodeClass, NodeRef, SourceFileRef, SymbolRef,
};

/// An in-memory `Emitter` that just keeps every element in emission order,
/// for tests to assert against directly instead of parsing serialized JSON.
#[derive(Default)]
pub struct CollectingEmitter {
    pub elements: Vec<Element>,
}

impl Emitter for CollectingEmitter {
    fn start(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn emit(&mut self, element: Element) -> Result<(), IndexError> {
        self.elements.push(element);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IndexError> {
        Ok(())
    }

    fn end(&mut self) -> Result<(), IndexError> {
        Ok(())
    }
}

pub fn pos(line: u32, character: u32) -> Position {
    Position::new(line, character)
}

pub fn range(start: (u32, u32), end: (u32, u32)) -> Range {
    Range::new(pos(start.0, start.1), pos(end.0, end.1))
}

#[derive(Clone)]
struct MockNode {
    class: NodeClass,
    range: Range,
    name: Option<String>,
    parent: Option<u32>,
    children: Vec<u32>,
    is_emit_boundary: bool,
    kind_label: String,
    lsp_kind: u32,
    symbol: Option<SymbolRef>,
}

struct MockFile {
    name: String,
    nodes: Vec<MockNode>,
    exported: Vec<SymbolRef>,
}

/// Builds one source file's node arena. Node 0 is always the source-file
/// root, created by `new`.
pub struct FileBuilder {
    name: String,
    nodes: Vec<MockNode>,
    exported: Vec<SymbolRef>,
}

impl FileBuilder {
    pub fn new(name: &str) -> Self {
        FileBuilder {
            name: name.to_string(),
            nodes: vec![MockNode {
                class: NodeClass::SourceFile,
                range: range((0, 0), (0, 0)),
                name: None,
                parent: None,
                children: Vec::new(),
                is_emit_boundary: false,
                kind_label: "sourceFile".to_string(),
                lsp_kind: 0,
                symbol: None,
            }],
            exported: Vec::new(),
        }
    }

    fn push(&mut self, parent: u32, node: MockNode) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(node);
        self.nodes[parent as usize].children.push(idx);
        idx
    }

    /// Adds a container declaration (function/class/etc.) under `parent`,
    /// touching its own declaration identifier in the same call (§4.5 step
    /// 3/4: container enter also visits the declaration name).
    pub fn container(
        &mut self,
        parent: u32,
        name: &str,
        kind_label: &str,
        r: Range,
        symbol: SymbolRef,
        emit_boundary: bool,
    ) -> u32 {
        self.push(
            parent,
            MockNode {
                class: NodeClass::ContainerDeclaration,
                range: r,
                name: Some(name.to_string()),
                parent: Some(parent),
                children: Vec::new(),
                is_emit_boundary: emit_boundary,
                kind_label: kind_label.to_string(),
                lsp_kind: 12,
                symbol: Some(symbol),
            },
        )
    }

    /// Adds a transparent wrapper node (e.g. a block or statement) under
    /// `parent`; may itself be an emit boundary (e.g. a block scope).
    pub fn transparent(&mut self, parent: u32, r: Range, emit_boundary: bool) -> u32 {
        self.push(
            parent,
            MockNode {
                class: NodeClass::Transparent,
                range: r,
                name: None,
                parent: Some(parent),
                children: Vec::new(),
                is_emit_boundary: emit_boundary,
                kind_label: "block".to_string(),
                lsp_kind: 0,
                symbol: None,
            },
        )
    }

    /// Adds an identifier reference (or declaration name) under `parent`.
    pub fn identifier(&mut self, parent: u32, name: &str, r: Range, symbol: SymbolRef) -> u32 {
        self.push(
            parent,
            MockNode {
                class: NodeClass::IdentifierReference,
                range: r,
                name: Some(name.to_string()),
                parent: Some(parent),
                children: Vec::new(),
                is_emit_boundary: false,
                kind_label: "identifier".to_string(),
                lsp_kind: 13,
                symbol: Some(symbol),
            },
        )
    }

    pub fn export(&mut self, symbol: SymbolRef) {
        self.exported.push(symbol);
    }

    fn build(self, file: SourceFileRef) -> MockFile {
        let _ = file;
        MockFile {
            name: self.name,
            nodes: self.nodes,
            exported: self.exported,
        }
    }
}

#[derive(Default)]
pub struct MockFrontend {
    files: Vec<MockFile>,
    symbols: FxHashMap<u64, FrontendSymbolInfo>,
    diagnostics: HashMap<u32, Vec<DiagnosticPayload>>,
    folding: HashMap<u32, Vec<FoldingRangePayload>>,
    hovers: FxHashMap<(u32, u32), HoverContents>,
}

impl MockFrontend {
    pub fn new() -> Self {
        MockFrontend::default()
    }

    pub fn add_file(&mut self, builder: FileBuilder) -> SourceFileRef {
        let file_ref = SourceFileRef(self.files.len() as u32);
        self.files.push(builder.build(file_ref));
        file_ref
    }

    pub fn set_symbol(&mut self, symbol: SymbolRef, info: FrontendSymbolInfo) {
        self.symbols.insert(symbol.0, info);
    }

    pub fn set_quick_info(&mut self, node: NodeRef, hover: HoverContents) {
        self.hovers.insert((node.file.0, node.index), hover);
    }

    fn node(&self, n: NodeRef) -> &MockNode {
        &self.files[n.file.0 as usize].nodes[n.index as usize]
    }
}

impl Frontend for MockFrontend {
    fn source_files(&self) -> Vec<SourceFileRef> {
        (0..self.files.len() as u32).map(SourceFileRef).collect()
    }

    fn file_name(&self, file: SourceFileRef) -> String {
        self.files[file.0 as usize].name.clone()
    }

    fn root_node(&self, file: SourceFileRef) -> NodeRef {
        NodeRef { file, index: 0 }
    }

    fn node_class(&self, node: NodeRef) -> NodeClass {
        self.node(node).class
    }

    fn node_range(&self, node: NodeRef) -> Range {
        self.node(node).range
    }

    fn node_children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.node(node)
            .children
            .iter()
            .map(|&idx| NodeRef { file: node.file, index: idx })
            .collect()
    }

    fn node_parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).parent.map(|idx| NodeRef { file: node.file, index: idx })
    }

    fn node_name(&self, node: NodeRef) -> Option<String> {
        self.node(node).name.clone()
    }

    fn is_emit_boundary(&self, node: NodeRef) -> bool {
        self.node(node).is_emit_boundary
    }

    fn declaration_kind_label(&self, node: NodeRef) -> String {
        self.node(node).kind_label.clone()
    }

    fn lsp_symbol_kind(&self, node: NodeRef) -> u32 {
        self.node(node).lsp_kind
    }

    fn node_symbol(&self, node: NodeRef) -> Option<SymbolRef> {
        self.node(node).symbol
    }

    fn symbol_info(&self, symbol: SymbolRef) -> FrontendSymbolInfo {
        self.symbols.get(&symbol.0).cloned().unwrap_or_default()
    }

    fn quick_info(&self, node: NodeRef) -> Option<HoverContents> {
        self.hovers.get(&(node.file.0, node.index)).cloned()
    }

    fn outlining_spans(&self, file: SourceFileRef) -> Vec<FoldingRangePayload> {
        self.folding.get(&file.0).cloned().unwrap_or_default()
    }

    fn diagnostics(&self, file: SourceFileRef) -> Vec<DiagnosticPayload> {
        self.diagnostics.get(&file.0).cloned().unwrap_or_default()
    }

    fn exported_symbols(&self, file: SourceFileRef) -> Vec<SymbolRef> {
        self.files[file.0 as usize].exported.clone()
    }
}

pub fn declaration(node: NodeRef, r: Range, kind: u16) -> FrontendDeclaration {
    FrontendDeclaration { node, range: r, kind }
}
