//! Depth-first AST walk driving the other components (§4.5 "Visitor").
//!
//! Grounded on `tsz-checker`'s `scope_finder` module for the general shape
//! of "walk toward an enclosing node-kind" (`find_enclosing_function`,
//! `find_enclosing_variable_statement`), generalized here into
//! `enclosing_emit_boundary` against the [`Frontend`] contract rather than
//! `CheckerState::ctx.arena` directly, since the indexer never depends on
//! the checker's internals (§9 "only the capabilities listed in §6 are
//! consumed").

use rustc_hash::FxHashSet;

use crate::data_manager::DataManager;
use crate::elements::{DocumentSymbolNode, LspRange, MonikerKind, MonikerUnique, RangeTagPayload};
use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::frontend::{Frontend, FrontendSymbolInfo, NodeClass, NodeRef, SourceFileRef, SymbolRef};
use crate::graph_builder::ItemSource;
use crate::id::ElementId;
use crate::moniker;
use crate::reporter::Reporter;
use crate::resolver::{self, DeclarationSite, RelevantFlags, SymbolFacts};
use crate::symbol_data::{ScopeKey, SymbolKey, SymbolVariant};

fn scope_key(node: NodeRef) -> ScopeKey {
    ScopeKey(((node.file.0 as u64) << 32) | node.index as u64)
}

fn encode_position(line: u32, character: u32) -> u32 {
    line.saturating_mul(1_000_000).wrapping_add(character)
}

/// A `documentSymbol` tree node under construction; finished and attached to
/// its parent (or the document root) on container exit.
struct DocumentSymbolFrame {
    name: String,
    kind: u32,
    range: LspRange,
    children: Vec<DocumentSymbolNode>,
}

pub struct Visitor<'f, F: Frontend, E: Emitter> {
    frontend: &'f F,
    data: DataManager<E>,
    reporter: Reporter,
    moniker_scheme: String,
    /// Composite symbol-keys already expanded into leaves, so a shared
    /// union/intersection type is only walked once (§4.5 "memoized by
    /// symbol-key").
    composite_seen: FxHashSet<SymbolKey>,
}

impl<'f, F: Frontend, E: Emitter> Visitor<'f, F, E> {
    pub fn new(frontend: &'f F, data: DataManager<E>, strict: bool, moniker_scheme: String) -> Self {
        Visitor {
            frontend,
            data,
            reporter: Reporter::new(strict),
            moniker_scheme,
            composite_seen: FxHashSet::default(),
        }
    }

    pub fn into_data_manager(self) -> DataManager<E> {
        self.data
    }

    pub fn data_manager_mut(&mut self) -> &mut DataManager<E> {
        &mut self.data
    }

    /// Runs `f` as the whole body of one project scope: emits the project
    /// vertex and `begin` event, runs `f` with the visitor still available
    /// for `visit_source_file` calls, then closes the project (flushing
    /// every still-open document/symbol-data) whether `f` returned `Ok`,
    /// `Err`, or panicked (§5, §11).
    ///
    /// Scoped at the visitor rather than the `DataManager` so the closure
    /// can drive `visit_source_file`, which needs both the frontend and the
    /// data manager together — a guard type borrowing only the manager
    /// would leave no way to call it.
    pub fn run_project<R>(
        &mut self,
        name: &str,
        kind: &str,
        f: impl FnOnce(&mut Self) -> Result<R, IndexError>,
    ) -> Result<R, IndexError> {
        self.data.begin_project(name, kind)?;
        crate::data_manager::run_scoped(self, f, |visitor| visitor.data.project_done())
    }

    /// Indexes one source file: document begin, depth-first walk, flush
    /// diagnostics/outlining/document-symbols, document end (§4.5 steps
    /// 1-6).
    pub fn visit_source_file(&mut self, file: SourceFileRef) -> Result<(), IndexError> {
        let file_name = self.frontend.file_name(file);
        let doc_id = self.data.get_or_create_document_data(&file_name, "typescript")?;

        let exported: FxHashSet<SymbolRef> = self.frontend.exported_symbols(file).into_iter().collect();

        let root = self.frontend.root_node(file);
        let mut containers: Vec<DocumentSymbolFrame> = Vec::new();
        self.walk(root, doc_id, &file_name, &exported, &mut containers)?;

        let diagnostics = self.frontend.diagnostics(file);
        let folding = self.frontend.outlining_spans(file);
        if let Some(doc) = self.data.document_mut(&file_name) {
            doc.diagnostics = diagnostics;
            doc.folding_ranges = folding;
        }

        self.data.document_done(&file_name)
    }

    fn walk(
        &mut self,
        node: NodeRef,
        doc_id: ElementId,
        file_name: &str,
        exported: &FxHashSet<SymbolRef>,
        containers: &mut Vec<DocumentSymbolFrame>,
    ) -> Result<(), IndexError> {
        match self.frontend.node_class(node) {
            NodeClass::SourceFile => {
                for child in self.frontend.node_children(node) {
                    self.walk(child, doc_id, file_name, exported, containers)?;
                }
            }
            NodeClass::ContainerDeclaration => {
                let range: LspRange = self.frontend.node_range(node).into();
                containers.push(DocumentSymbolFrame {
                    name: self.frontend.node_name(node).unwrap_or_default(),
                    kind: self.frontend.lsp_symbol_kind(node),
                    range,
                    children: Vec::new(),
                });

                self.visit_symbol_touch(node, doc_id, file_name, exported)?;

                for child in self.frontend.node_children(node) {
                    self.walk(child, doc_id, file_name, exported, containers)?;
                }

                let finished = containers.pop().expect("pushed at container enter");
                let symbol_node = DocumentSymbolNode {
                    name: finished.name,
                    detail: None,
                    kind: finished.kind,
                    range: finished.range,
                    selection_range: finished.range,
                    children: finished.children,
                };
                match containers.last_mut() {
                    Some(parent) => parent.children.push(symbol_node),
                    None => {
                        if let Some(doc) = self.data.document_mut(file_name) {
                            doc.document_symbols.push(symbol_node);
                        }
                    }
                }

                self.data.node_processed(scope_key(node))?;
            }
            NodeClass::IdentifierReference => {
                self.visit_symbol_touch(node, doc_id, file_name, exported)?;
            }
            NodeClass::Transparent => {
                for child in self.frontend.node_children(node) {
                    self.walk(child, doc_id, file_name, exported, containers)?;
                }
            }
        }
        Ok(())
    }

    fn enclosing_emit_boundary(&self, node: NodeRef) -> Option<ScopeKey> {
        let mut current = self.frontend.node_parent(node);
        while let Some(n) = current {
            if self.frontend.is_emit_boundary(n) {
                return Some(scope_key(n));
            }
            current = self.frontend.node_parent(n);
        }
        None
    }

    fn container_chain(&self, node: NodeRef) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.frontend.node_parent(node);
        while let Some(n) = current {
            if matches!(self.frontend.node_class(n), NodeClass::SourceFile) {
                break;
            }
            if self.frontend.is_emit_boundary(n) {
                break;
            }
            if matches!(self.frontend.node_class(n), NodeClass::ContainerDeclaration) {
                names.push(self.frontend.node_name(n));
            }
            current = self.frontend.node_parent(n);
        }
        names.reverse();
        let resolved: Vec<Option<String>> = names;
        moniker::container_chain_path(&resolved)
    }

    fn to_declaration_site(&self, node: NodeRef, kind: u16) -> DeclarationSite {
        let range = self.frontend.node_range(node);
        DeclarationSite {
            file: self.frontend.file_name(node.file),
            start: encode_position(range.start.line, range.start.character),
            end: encode_position(range.end.line, range.end.character),
            kind,
            enclosing_emit_boundary: self.enclosing_emit_boundary(node),
        }
    }

    fn symbol_key_for(&self, symbol: SymbolRef) -> SymbolKey {
        let info = self.frontend.symbol_info(symbol);
        let facts = self.symbol_info_to_facts(&info);
        resolver::symbol_key(&facts)
    }

    fn symbol_info_to_facts(&self, info: &FrontendSymbolInfo) -> SymbolFacts {
        let mut flags = RelevantFlags::NONE;
        if info.is_alias {
            flags.set(RelevantFlags::ALIAS);
        }
        if info.is_class_or_interface {
            flags.set(RelevantFlags::CLASS);
        }
        if info.is_method {
            flags.set(RelevantFlags::METHOD);
        }
        if info.is_transient {
            flags.set(RelevantFlags::TRANSIENT);
        }

        SymbolFacts {
            flags,
            is_exported: info.is_exported,
            declarations: info
                .declarations
                .iter()
                .map(|d| self.to_declaration_site(d.node, d.kind))
                .collect(),
            aliased: info.aliased.map(|s| self.symbol_key_for(s)),
            heritage_bases: info.heritage_bases.iter().map(|s| self.symbol_key_for(*s)).collect(),
            overridden_methods: info
                .overridden_methods
                .iter()
                .map(|s| self.symbol_key_for(*s))
                .collect(),
        }
    }

    /// Handles one identifier-bearing node: declaration or reference (§4.5
    /// steps 2 and 4).
    fn visit_symbol_touch(
        &mut self,
        node: NodeRef,
        doc_id: ElementId,
        file_name: &str,
        exported: &FxHashSet<SymbolRef>,
    ) -> Result<(), IndexError> {
        let Some(symbol) = self.frontend.node_symbol(node) else {
            return Ok(());
        };
        let info = self.frontend.symbol_info(symbol);

        if info.declarations.is_empty() && !info.composite_constituents.is_empty() {
            return self.expand_composite(node, &info, doc_id, file_name, exported);
        }

        let facts = self.symbol_info_to_facts(&info);
        let key = resolver::symbol_key(&facts);
        let scope = resolver::select_emission_scope(&facts);
        let is_exported = exported.contains(&symbol) || info.is_exported;
        let is_own_declaration = info.declarations.iter().any(|d| d.node == node);

        let facts_for_variant = facts.clone();
        let variant_kind = resolver::select_variant(&facts_for_variant);
        let is_new_symbol_data = !self.data.has_symbol_data(&key);
        let result_set_id = self
            .data
            .get_or_create_symbol_data(key.clone(), || resolver::select_variant(&facts_for_variant), scope)?;

        if is_new_symbol_data && is_own_declaration {
            if let SymbolVariant::Alias { .. } = &variant_kind {
                self.link_alias_to_aliased(&key, info.aliased)?;
            }
        }

        if is_new_symbol_data {
            if let Some(hover) = self.frontend.quick_info(node) {
                self.data.ensure_hover_result(&key, hover)?;
            }
        }

        if !is_own_declaration {
            self.check_internal_symbol_leak(node, &info, scope, file_name)?;
        }

        let range: LspRange = self.frontend.node_range(node).into();
        let tag = if is_own_declaration {
            RangeTagPayload::Definition {
                text: self.frontend.node_name(node).unwrap_or_default(),
                kind: self.frontend.declaration_kind_label(node),
                full_range: range,
            }
        } else {
            RangeTagPayload::Reference {
                text: self.frontend.node_name(node).unwrap_or_default(),
            }
        };

        let (range_id, range_el) = self.data.builder().range(range, tag);
        self.data.emitter_mut().emit(range_el)?;
        if let Some(doc) = self.data.document_mut(file_name) {
            doc.record_range(range_id);
        }

        let (_, next_el) = self.data.builder().next(range_id, result_set_id);
        self.data.emitter_mut().emit(next_el)?;

        if is_own_declaration {
            self.data.ensure_definition_result(&key)?;
        }
        self.data.ensure_reference_result(&key)?;
        if let Some(sd) = self.data.symbol_data_mut(&key) {
            let partition = sd.partition_mut(doc_id);
            if is_own_declaration {
                partition.definition_ranges.push(range_id);
            } else {
                partition.reference_ranges.push(range_id);
            }
        }

        if is_own_declaration && is_exported {
            self.emit_export_moniker(node, &info, result_set_id)?;
        }

        Ok(())
    }

    /// Resolves (creating if needed) the symbol-data for an arbitrary
    /// compiler symbol, independent of whether the visitor has walked to one
    /// of its declaration/reference sites yet. Used to reach the *aliased*
    /// symbol's data from an alias's declaration site (§4.4.2).
    fn ensure_symbol_data_for(&mut self, symbol: SymbolRef) -> Result<(SymbolKey, ElementId), IndexError> {
        let info = self.frontend.symbol_info(symbol);
        let facts = self.symbol_info_to_facts(&info);
        let key = resolver::symbol_key(&facts);
        let scope = resolver::select_emission_scope(&facts);
        let facts_for_variant = facts.clone();
        let result_set_id = self
            .data
            .get_or_create_symbol_data(key.clone(), || resolver::select_variant(&facts_for_variant), scope)?;
        Ok((key, result_set_id))
    }

    /// Wires an alias's result-set to the symbol it aliases (§4.4.2): "its
    /// result-set points to the *aliased* reference-result through a
    /// cross-reference edge", emitted as a `referenceResults`-property
    /// `item` edge from the aliased symbol's reference-result to the
    /// alias's own reference-result, so a query over the aliased symbol's
    /// references also walks in references made through the alias name
    /// (§8 scenario 2).
    fn link_alias_to_aliased(&mut self, alias_key: &SymbolKey, aliased: Option<SymbolRef>) -> Result<(), IndexError> {
        let Some(aliased_symbol) = aliased else {
            return Ok(());
        };
        let (aliased_key, _) = self.ensure_symbol_data_for(aliased_symbol)?;
        if aliased_key == *alias_key {
            return Ok(());
        }

        let aliased_reference_result = self.data.ensure_reference_result(&aliased_key)?;
        let alias_reference_result = self.data.ensure_reference_result(alias_key)?;
        let Some(project_id) = self.data.project_id() else {
            return Ok(());
        };

        let (_, item_el) = self.data.builder().item(
            ItemSource::ReferenceResultToReferenceResult,
            aliased_reference_result,
            vec![alias_reference_result],
            project_id,
            None,
        )?;
        self.data.emitter_mut().emit(item_el)?;
        Ok(())
    }

    fn check_internal_symbol_leak(
        &mut self,
        node: NodeRef,
        info: &FrontendSymbolInfo,
        scope: Option<ScopeKey>,
        file_name: &str,
    ) -> Result<(), IndexError> {
        let (Some(boundary), false) = (scope, info.is_exported) else {
            return Ok(());
        };
        if self.enclosing_emit_boundary(node) != Some(boundary) {
            let range = self.frontend.node_range(node);
            self.reporter.internal_symbol_leak(
                &format!("{boundary:?}"),
                file_name,
                encode_position(range.start.line, range.start.character),
            )?;
        }
        Ok(())
    }

    fn emit_export_moniker(
        &mut self,
        node: NodeRef,
        info: &FrontendSymbolInfo,
        result_set_id: ElementId,
    ) -> Result<(), IndexError> {
        let Some(own_name) = self.frontend.node_name(node) else {
            return Ok(());
        };
        let Some(symbol_path) = self.container_chain(node).map(|chain| {
            if chain.is_empty() {
                own_name.clone()
            } else {
                format!("{chain}.{own_name}")
            }
        }) else {
            return Ok(());
        };
        let path = if info.is_global_scope {
            None
        } else {
            Some(moniker::normalize_declaration_path(&self.frontend.file_name(node.file)))
        };
        let identifier = moniker::primary_identifier(path.as_deref(), &symbol_path);
        let moniker_id = self.data.ensure_moniker(
            &self.moniker_scheme,
            &identifier,
            MonikerUnique::Project,
            Some(MonikerKind::Export),
        )?;
        let (_, edge) = self.data.builder().moniker_edge(result_set_id, moniker_id);
        self.data.emitter_mut().emit(edge)?;
        Ok(())
    }

    /// Expands a union/intersection composite symbol into its leaves,
    /// memoized by symbol-key (§4.5 "Composite symbols").
    fn expand_composite(
        &mut self,
        node: NodeRef,
        info: &FrontendSymbolInfo,
        doc_id: ElementId,
        file_name: &str,
        exported: &FxHashSet<SymbolRef>,
    ) -> Result<(), IndexError> {
        let facts = self.symbol_info_to_facts(info);
        let composite_key = resolver::symbol_key(&facts);
        if !self.composite_seen.insert(composite_key.clone()) {
            let _ = node;
            return Ok(());
        }
        let composite_result_set = self
            .data
            .get_or_create_symbol_data(composite_key.clone(), || resolver::SymbolVariant::Transient, None)?;

        for leaf in &info.composite_constituents {
            let leaf_info = self.frontend.symbol_info(*leaf);
            let leaf_key = self.symbol_key_for(*leaf);
            let leaf_facts = self.symbol_info_to_facts(&leaf_info);
            let leaf_facts_for_variant = leaf_facts.clone();
            let leaf_result_set = self.data.get_or_create_symbol_data(
                leaf_key.clone(),
                || resolver::select_variant(&leaf_facts_for_variant),
                resolver::select_emission_scope(&leaf_facts),
            )?;

            if let Some(leaf_decl) = leaf_info.declarations.first() {
                self.visit_symbol_touch(leaf_decl.node, doc_id, file_name, exported)?;
            }

            let (_, attach_el) = self.data.builder().attach(composite_result_set, leaf_result_set);
            self.data.emitter_mut().emit(attach_el)?;
        }

        let _ = node;
        Ok(())
    }
}
