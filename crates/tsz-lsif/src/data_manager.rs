//! Single point of lifecycle truth (§4.3 "Data Manager").
//!
//! Owns the project/document/symbol lifecycles, orders begin/end events, and
//! routes elements into the active `Emitter`. Grounded on
//! `alidn-universal-lsif`'s `Indexer<E>`, which plays the same role —
//! `emit_metadata_and_project_vertex` / `emit_documents` / `emit_contains` —
//! but reshaped here around explicit scoped lifecycles (§5, §9) instead of a
//! single linear `index()` pass, since this spec's symbol-data can close
//! mid-project (§3 invariant 7).

use rustc_hash::FxHashMap;

use crate::document_data::DocumentData;
use crate::elements::{EventKind, EventScope, HoverContents, MonikerKind, MonikerUnique};
use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::graph_builder::{GraphBuilder, ItemSource};
use crate::id::{ElementId, IdGenerator};
use crate::moniker::PackageInformationCache;
use crate::project_data::{ProcessedProjects, ProjectData};
use crate::symbol_data::{ScopeKey, SymbolData, SymbolKey, SymbolVariant};

/// Runs `f` over `target`, guaranteeing `close` runs on every exit path —
/// normal return, an `Err` propagated out of `f`, or `f` panicking — per
/// §5/§11 ("a fault while processing a file must still emit the `end`
/// events for everything opened before the fault").
///
/// Generic over the borrowed type so both `DataManager::run_project` (target
/// is the manager itself) and `Visitor::run_project` (target is the whole
/// visitor, which needs both the manager and the frontend in scope) can
/// share it, instead of a scope-closing handle that would tie up a borrow of
/// `target` for the scope's whole duration.
pub(crate) fn run_scoped<T, R>(
    target: &mut T,
    f: impl FnOnce(&mut T) -> Result<R, IndexError>,
    close: impl FnOnce(&mut T) -> Result<(), IndexError>,
) -> Result<R, IndexError> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(target)));
    let close_result = close(target);
    match result {
        Ok(inner) => inner.and_then(|r| close_result.map(|()| r)),
        Err(payload) => {
            let _ = close_result;
            std::panic::resume_unwind(payload)
        }
    }
}

pub struct DataManager<E: Emitter> {
    emitter: E,
    ids: IdGenerator,
    strict: bool,

    project: Option<ProjectData>,

    documents: FxHashMap<String, DocumentData>,

    symbol_datas: FxHashMap<SymbolKey, SymbolData>,
    scope_to_symbols: FxHashMap<ScopeKey, Vec<SymbolKey>>,

    monikers: FxHashMap<(String, String), ElementId>,
    package_info: PackageInformationCache,

    pub processed_projects: ProcessedProjects,
}

impl<E: Emitter> DataManager<E> {
    pub fn new(emitter: E, ids: IdGenerator, strict: bool) -> Self {
        DataManager {
            emitter,
            ids,
            strict,
            project: None,
            documents: FxHashMap::default(),
            symbol_datas: FxHashMap::default(),
            scope_to_symbols: FxHashMap::default(),
            monikers: FxHashMap::default(),
            package_info: PackageInformationCache::default(),
            processed_projects: ProcessedProjects::default(),
        }
    }

    pub(crate) fn builder(&self) -> GraphBuilder<'_> {
        GraphBuilder::new(&self.ids)
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Emits the project vertex, then a `begin` event scoped to project
    /// (§4.3).
    pub(crate) fn begin_project(&mut self, name: &str, kind: &str) -> Result<ElementId, IndexError> {
        self.emitter.start()?;
        let (project_id, project_el) = self.builder().project(name, kind, None);
        self.emitter.emit(project_el)?;
        let (_, begin_el) = self
            .builder()
            .event(EventScope::Project, EventKind::Begin, project_id);
        self.emitter.emit(begin_el)?;

        self.project = Some(ProjectData::new(project_id, name.to_string()));
        Ok(project_id)
    }

    /// Runs `f` as the whole body of one project scope: emits the project
    /// vertex and `begin` event, runs `f`, then emits the project-end event
    /// (flushing every still-open document/symbol-data first) whether `f`
    /// returned `Ok`, `Err`, or panicked (§5, §11).
    pub fn run_project<R>(
        &mut self,
        name: &str,
        kind: &str,
        f: impl FnOnce(&mut Self) -> Result<R, IndexError>,
    ) -> Result<R, IndexError> {
        self.begin_project(name, kind)?;
        run_scoped(self, f, DataManager::project_done)
    }

    /// Returns the document's id, creating it (and emitting its vertex and
    /// `begin` event) on first call (§4.3).
    pub fn get_or_create_document_data(
        &mut self,
        file_name: &str,
        language_id: &str,
    ) -> Result<ElementId, IndexError> {
        if let Some(doc) = self.documents.get(file_name) {
            return Ok(doc.id);
        }

        let (doc_id, doc_el) = self.builder().document(file_name, language_id, None);
        self.emitter.emit(doc_el)?;
        let (_, begin_el) = self
            .builder()
            .event(EventScope::Document, EventKind::Begin, doc_id);
        self.emitter.emit(begin_el)?;

        self.documents
            .insert(file_name.to_string(), DocumentData::new(doc_id, file_name.to_string()));

        if let Some(project) = &mut self.project {
            project.record_document(doc_id);
        }

        Ok(doc_id)
    }

    pub fn document_mut(&mut self, file_name: &str) -> Option<&mut DocumentData> {
        self.documents.get_mut(file_name)
    }

    /// Returns existing symbol-data's result-set id, or constructs new via
    /// the given variant/scope and emits its `resultSet` vertex (§4.3). If
    /// `scope` is `Some`, the symbol-data is registered for teardown when
    /// that scope is processed (`manageLifecycle`).
    pub fn get_or_create_symbol_data(
        &mut self,
        key: SymbolKey,
        variant: impl FnOnce() -> SymbolVariant,
        scope: Option<ScopeKey>,
    ) -> Result<ElementId, IndexError> {
        if let Some(existing) = self.symbol_datas.get(&key) {
            return Ok(existing.result_set_id);
        }

        let (result_set_id, rs_el) = self.builder().result_set();
        self.emitter.emit(rs_el)?;

        let data = SymbolData::new(key.clone(), variant(), result_set_id, scope);
        self.symbol_datas.insert(key.clone(), data);

        if let Some(scope) = scope {
            self.scope_to_symbols.entry(scope).or_default().push(key);
        }

        Ok(result_set_id)
    }

    pub fn symbol_data_mut(&mut self, key: &SymbolKey) -> Option<&mut SymbolData> {
        self.symbol_datas.get_mut(key)
    }

    pub fn has_symbol_data(&self, key: &SymbolKey) -> bool {
        self.symbol_datas.contains_key(key)
    }

    /// The currently open project's vertex id, if a project is active.
    pub fn project_id(&self) -> Option<ElementId> {
        self.project.as_ref().map(|p| p.id)
    }

    /// Returns the symbol-data's `definitionResult` vertex, creating it (and
    /// the `textDocument/definition` edge from its result-set) the first
    /// time a definition range is recorded against this symbol (§3
    /// "ResultSet ... owns at most one ... definitionResult").
    pub fn ensure_definition_result(&mut self, key: &SymbolKey) -> Result<ElementId, IndexError> {
        if let Some(id) = self.symbol_datas.get(key).and_then(|d| d.results.definition_result) {
            return Ok(id);
        }
        let result_set_id = self.result_set_id(key)?;
        let (result_id, result_el) = self.builder().definition_result();
        self.emitter.emit(result_el)?;
        let (_, edge_el) = self.builder().text_document_definition(result_set_id, result_id);
        self.emitter.emit(edge_el)?;
        self.symbol_datas.get_mut(key).expect("checked above").results.definition_result = Some(result_id);
        Ok(result_id)
    }

    /// Returns the symbol-data's `hoverResult` vertex, creating it (and the
    /// `textDocument/hover` edge from its result-set) the first time the
    /// frontend has hover contents for this symbol (§3 "ResultSet ... owns
    /// at most one ... hoverResult").
    pub fn ensure_hover_result(&mut self, key: &SymbolKey, contents: HoverContents) -> Result<ElementId, IndexError> {
        if let Some(id) = self.symbol_datas.get(key).and_then(|d| d.results.hover_result) {
            return Ok(id);
        }
        let result_set_id = self.result_set_id(key)?;
        let (result_id, result_el) = self.builder().hover_result(contents);
        self.emitter.emit(result_el)?;
        let (_, edge_el) = self.builder().text_document_hover(result_set_id, result_id);
        self.emitter.emit(edge_el)?;
        self.symbol_datas.get_mut(key).expect("checked above").results.hover_result = Some(result_id);
        Ok(result_id)
    }

    /// Returns the symbol-data's `referenceResult` vertex, creating it (and
    /// the `textDocument/references` edge) on first use.
    pub fn ensure_reference_result(&mut self, key: &SymbolKey) -> Result<ElementId, IndexError> {
        if let Some(id) = self.symbol_datas.get(key).and_then(|d| d.results.reference_result) {
            return Ok(id);
        }
        let result_set_id = self.result_set_id(key)?;
        let (result_id, result_el) = self.builder().reference_result();
        self.emitter.emit(result_el)?;
        let (_, edge_el) = self.builder().text_document_references(result_set_id, result_id);
        self.emitter.emit(edge_el)?;
        self.symbol_datas.get_mut(key).expect("checked above").results.reference_result = Some(result_id);
        Ok(result_id)
    }

    fn result_set_id(&self, key: &SymbolKey) -> Result<ElementId, IndexError> {
        self.symbol_datas
            .get(key)
            .map(|d| d.result_set_id)
            .ok_or_else(|| IndexError::state_assertion(format!("no symbol-data for {key:?}")))
    }

    /// Deduplicates moniker vertices by `(scheme, identifier)` within the
    /// project (§3 invariant 4).
    pub fn ensure_moniker(
        &mut self,
        scheme: &str,
        identifier: &str,
        unique: MonikerUnique,
        kind: Option<MonikerKind>,
    ) -> Result<ElementId, IndexError> {
        let cache_key = (scheme.to_string(), identifier.to_string());
        if let Some(id) = self.monikers.get(&cache_key) {
            return Ok(*id);
        }
        let (id, el) = self.builder().moniker(scheme, identifier, unique, kind);
        self.emitter.emit(el)?;
        self.monikers.insert(cache_key, id);
        Ok(id)
    }

    pub fn ensure_package_information(
        &mut self,
        scheme: &str,
        name: &str,
        manager: &str,
        version: Option<String>,
    ) -> Result<ElementId, IndexError> {
        if let Some(id) = self.package_info.get(scheme, name) {
            return Ok(id);
        }
        let (id, el) = self.builder().package_information(name, manager, version);
        self.emitter.emit(el)?;
        self.package_info.insert(scheme, name, id);
        Ok(id)
    }

    /// Called by the visitor after each AST node end-visit (§4.3, §4.5
    /// "call `dataManager.nodeProcessed(node)`"). Closes every symbol-data
    /// registered at this scope.
    pub fn node_processed(&mut self, scope: ScopeKey) -> Result<(), IndexError> {
        let Some(keys) = self.scope_to_symbols.remove(&scope) else {
            return Ok(());
        };
        for key in keys {
            self.close_symbol_data(&key)?;
        }
        Ok(())
    }

    /// Emits, per document, an `item` edge from the `definitionResult` for
    /// definition ranges, and from the `referenceResult` both a
    /// `definitions`-property edge over the same ranges and a
    /// `references`-property edge over reference ranges. The
    /// reference-result aggregates a symbol's own declarations alongside its
    /// uses, the way microsoft/lsif-node's `referenceResult` does (§4.3
    /// "plus one item edge for definitions").
    fn close_symbol_data(&mut self, key: &SymbolKey) -> Result<(), IndexError> {
        let Some(data) = self.symbol_datas.get(key) else {
            return Ok(());
        };
        if data.closed {
            return Err(IndexError::state_assertion(format!(
                "symbol-data for {key:?} closed twice"
            )));
        }

        let builder = self.builder();
        let mut pending = Vec::new();

        for (&document_id, partition) in &data.partitions {
            if !partition.definition_ranges.is_empty() {
                if let Some(def_result) = data.results.definition_result {
                    let (_, el) = builder.item(
                        ItemSource::DefinitionResult,
                        def_result,
                        partition.definition_ranges.clone(),
                        document_id,
                        None,
                    )?;
                    pending.push(el);
                }
                if let Some(ref_result) = data.results.reference_result {
                    let (_, el) = builder.item(
                        ItemSource::ReferenceResult,
                        ref_result,
                        partition.definition_ranges.clone(),
                        document_id,
                        Some(crate::elements::ItemProperty::Definitions),
                    )?;
                    pending.push(el);
                }
            }
            if !partition.reference_ranges.is_empty() {
                if let Some(ref_result) = data.results.reference_result {
                    let (_, el) = builder.item(
                        ItemSource::ReferenceResult,
                        ref_result,
                        partition.reference_ranges.clone(),
                        document_id,
                        Some(crate::elements::ItemProperty::References),
                    )?;
                    pending.push(el);
                }
            }
        }

        for el in pending {
            self.emitter.emit(el)?;
        }

        let data = self.symbol_datas.get_mut(key).expect("checked above");
        data.closed = true;
        Ok(())
    }

    /// Flushes the document's pending ranges, diagnostics, folding ranges,
    /// and document-symbol tree; emits the corresponding result vertices and
    /// their `textDocument/*` edges; emits the document-end event (§4.3).
    ///
    /// Order of emission: `contains` → ranges first, then
    /// diagnostic/folding/document-symbol results, finally the
    /// document-end event (§4.3).
    pub fn document_done(&mut self, file_name: &str) -> Result<(), IndexError> {
        let Some(doc) = self.documents.get_mut(file_name) else {
            return Ok(());
        };
        if doc.is_done() {
            return Err(IndexError::state_assertion(format!(
                "document {file_name} closed twice"
            )));
        }

        let doc_id = doc.id;
        let ranges = doc.ranges.clone();
        let diagnostics = std::mem::take(&mut doc.diagnostics);
        let folding_ranges = std::mem::take(&mut doc.folding_ranges);
        let document_symbols = std::mem::take(&mut doc.document_symbols);

        let builder = self.builder();
        let mut pending = Vec::new();

        if !ranges.is_empty() {
            let (_, el) = builder.contains(doc_id, ranges);
            pending.push(el);
        }

        if !diagnostics.is_empty() {
            let (result_id, result_el) = builder.diagnostic_result(diagnostics);
            pending.push(result_el);
            let (_, edge_el) = builder.text_document_diagnostic(doc_id, result_id);
            pending.push(edge_el);
        }

        if !folding_ranges.is_empty() {
            let (result_id, result_el) = builder.folding_range_result(folding_ranges);
            pending.push(result_el);
            let (_, edge_el) = builder.text_document_folding_range(doc_id, result_id);
            pending.push(edge_el);
        }

        if !document_symbols.is_empty() {
            let (result_id, result_el) = builder.document_symbol_result(document_symbols);
            pending.push(result_el);
            let (_, edge_el) = builder.text_document_document_symbol(doc_id, result_id);
            pending.push(edge_el);
        }

        let (_, end_el) = builder.event(EventScope::Document, EventKind::End, doc_id);
        pending.push(end_el);

        for el in pending {
            self.emitter.emit(el)?;
        }

        self.documents.get_mut(file_name).expect("checked above").mark_done();
        Ok(())
    }

    pub fn open_document_file_names(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|(_, d)| !d.is_done())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Flushes every still-open symbol-data, then every open document, then
    /// emits the project-end event (§4.3).
    pub fn project_done(&mut self) -> Result<(), IndexError> {
        let remaining_symbols: Vec<SymbolKey> = self
            .symbol_datas
            .iter()
            .filter(|(_, d)| !d.closed)
            .map(|(k, _)| k.clone())
            .collect();
        for key in remaining_symbols {
            self.close_symbol_data(&key)?;
        }

        for file_name in self.open_document_file_names() {
            self.document_done(&file_name)?;
        }

        if let Some(project) = &self.project {
            let project_id = project.id;
            let (_, end_el) = self.builder().event(EventScope::Project, EventKind::End, project_id);
            self.emitter.emit(end_el)?;
        }

        self.emitter.flush()?;
        self.emitter.end()
    }

    /// Runs `f` as the whole body of one document scope, calling
    /// `document_done` on every exit path (mirrors `run_project` at the
    /// narrower document scope). The visitor does not need this today since
    /// it drives documents directly (`get_or_create_document_data` /
    /// `document_done`), but it is here for drivers that want the scope
    /// expressed as a closure instead.
    pub fn run_document<R>(
        &mut self,
        file_name: &str,
        f: impl FnOnce(&mut Self) -> Result<R, IndexError>,
    ) -> Result<R, IndexError> {
        let owned_name = file_name.to_string();
        run_scoped(self, f, move |mgr| mgr.document_done(&owned_name))
    }
}
