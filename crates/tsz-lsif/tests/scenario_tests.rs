//! Drives the real `Visitor` + `DataManager` pipeline over hand-built
//! `Frontend` fixtures for the §8 "Concrete scenarios".

#[path = "support.rs"]
mod support;

use tsz_lsif::data_manager::DataManager;
use tsz_lsif::elements::{Edge, ElementBody, HoverContents, ItemProperty, MarkedString, MonikerKind, RangeTagPayload, Vertex};
use tsz_lsif::frontend::{FrontendSymbolInfo, SymbolRef};
use tsz_lsif::id::{ElementId, IdGenerator, IdMode};
use tsz_lsif::visitor::Visitor;

use support::{range, CollectingEmitter, FileBuilder, MockFrontend};

fn moniker_vertices(elements: &[tsz_lsif::elements::Element]) -> Vec<(&str, &str, Option<MonikerKind>)> {
    elements
        .iter()
        .filter_map(|e| match &e.body {
            ElementBody::Vertex(Vertex::Moniker {
                scheme,
                identifier,
                kind,
                ..
            }) => Some((scheme.as_str(), identifier.as_str(), *kind)),
            _ => None,
        })
        .collect()
}

fn item_edges(elements: &[tsz_lsif::elements::Element]) -> Vec<&Edge> {
    elements
        .iter()
        .filter_map(|e| match &e.body {
            ElementBody::Edge(edge @ Edge::Item { .. }) => Some(edge),
            _ => None,
        })
        .collect()
}

fn count_vertices(elements: &[tsz_lsif::elements::Element], pred: impl Fn(&Vertex) -> bool) -> usize {
    elements
        .iter()
        .filter(|e| matches!(&e.body, ElementBody::Vertex(v) if pred(v)))
        .count()
}

/// Ids of every `range` vertex whose tag text is `wanted` (declaration or
/// reference tags both carry `text`).
fn range_ids_with_text(elements: &[tsz_lsif::elements::Element], wanted: &str) -> Vec<ElementId> {
    elements
        .iter()
        .filter_map(|e| match &e.body {
            ElementBody::Vertex(Vertex::Range { tag, .. }) => {
                let text = match tag {
                    RangeTagPayload::Definition { text, .. } => Some(text.as_str()),
                    RangeTagPayload::Reference { text } => Some(text.as_str()),
                    RangeTagPayload::Unknown {} => None,
                };
                if text == Some(wanted) {
                    Some(e.id)
                } else {
                    None
                }
            }
            _ => None,
        })
        .collect()
}

/// The result-set a range vertex `next`-links to.
fn result_set_for_range(elements: &[tsz_lsif::elements::Element], range_id: ElementId) -> ElementId {
    elements
        .iter()
        .find_map(|e| match &e.body {
            ElementBody::Edge(Edge::Next { out_v, in_v }) if *out_v == range_id => Some(*in_v),
            _ => None,
        })
        .expect("range is linked to a result-set via a next edge")
}

/// The reference-result a result-set owns, via its `textDocument/references`
/// edge.
fn reference_result_for(elements: &[tsz_lsif::elements::Element], result_set_id: ElementId) -> Option<ElementId> {
    elements.iter().find_map(|e| match &e.body {
        ElementBody::Edge(Edge::TextDocumentReferences { out_v, in_v }) if *out_v == result_set_id => Some(*in_v),
        _ => None,
    })
}

/// Every `item` edge whose `outV` is `from`.
fn item_edges_from(elements: &[tsz_lsif::elements::Element], from: ElementId) -> Vec<&Edge> {
    elements
        .iter()
        .filter_map(|e| match &e.body {
            ElementBody::Edge(edge @ Edge::Item { out_v, .. }) if *out_v == from => Some(edge),
            _ => None,
        })
        .collect()
}

/// Scenario 1: `export function foo(): void {}` in `a`, referenced from `b`.
/// One export moniker `a:foo`, one reference range in `b` linked to the same
/// result-set, and one `references`-property `item` edge covering both
/// ranges (§8 scenario 1).
#[test]
fn simple_export_links_declaration_and_reference_to_one_result_set() {
    let foo = SymbolRef(1);

    let mut frontend = MockFrontend::new();

    let mut a = FileBuilder::new("a.ts");
    a.container(0, "foo", "function", range((0, 16), (0, 19)), foo, true);
    a.export(foo);
    frontend.add_file(a);

    let mut b = FileBuilder::new("b.ts");
    b.identifier(0, "foo", range((1, 0), (1, 3)), foo);
    frontend.add_file(b);

    frontend.set_symbol(
        foo,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(
                tsz_lsif::frontend::NodeRef {
                    file: tsz_lsif::frontend::SourceFileRef(0),
                    index: 1,
                },
                range((0, 16), (0, 19)),
                1,
            )],
            is_exported: true,
            ..Default::default()
        },
    );

    let ids = IdGenerator::new(IdMode::Monotonic);
    let emitter = CollectingEmitter::default();
    let data = DataManager::new(emitter, ids, false);
    let mut visitor = Visitor::new(&frontend, data, false, "tsc".to_string());

    let files = frontend.source_files();
    visitor
        .run_project("proj", "typescript", |v| {
            for file in &files {
                v.visit_source_file(*file)?;
            }
            Ok(())
        })
        .unwrap();
    let mut data = visitor.into_data_manager();
    let elements = &data.emitter_mut().elements;

    assert_eq!(count_vertices(elements, |v| matches!(v, Vertex::ResultSet {})), 1);

    let monikers = moniker_vertices(elements);
    assert_eq!(monikers.len(), 1);
    assert_eq!(monikers[0], ("tsc", "a:foo", Some(MonikerKind::Export)));

    // foo's reference-result must aggregate both its own declaration and b's
    // use of it, split across a `definitions`- and a `references`-property
    // item edge (§4.3 "plus one item edge for definitions", §8 scenario 1).
    let foo_range_ids = range_ids_with_text(elements, "foo");
    assert_eq!(foo_range_ids.len(), 2, "foo's declaration plus b's reference");
    let result_set_id = result_set_for_range(elements, foo_range_ids[0]);
    let reference_result_id =
        reference_result_for(elements, result_set_id).expect("foo's result-set owns a reference-result");

    let from_reference_result = item_edges_from(elements, reference_result_id);
    assert_eq!(
        from_reference_result.len(),
        2,
        "one definitions edge and one references edge off the reference-result"
    );
    for edge in &from_reference_result {
        let Edge::Item { property, in_vs, .. } = edge else {
            panic!("expected item edge");
        };
        match property {
            Some(ItemProperty::Definitions) => {
                assert_eq!(in_vs.len(), 1, "foo's own declaration range");
            }
            Some(ItemProperty::References) => {
                assert_eq!(in_vs.len(), 1, "only b's reference is a non-declaration touch");
            }
            other => panic!("unexpected property {other:?} on reference-result item edge"),
        }
    }
}

/// Scenario 4: a function-local `const x = 1` is referenced once inside the
/// same function and nowhere else. Its symbol-data must close at the
/// function's end-visit with exactly two ranges (declaration + inner use)
/// and no export moniker (§8 scenario 4).
#[test]
fn scoped_local_symbol_closes_at_function_end_with_no_export_moniker() {
    let f = SymbolRef(1);
    let x = SymbolRef(2);

    let mut frontend = MockFrontend::new();
    let mut file = FileBuilder::new("a.ts");
    let func = file.container(0, "f", "function", range((0, 16), (0, 17)), f, true);
    let decl = file.identifier(func, "x", range((0, 25), (0, 26)), x);
    let usage = file.identifier(func, "x", range((0, 35), (0, 36)), x);
    file.export(f);
    frontend.add_file(file);

    frontend.set_symbol(
        f,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(
                tsz_lsif::frontend::NodeRef {
                    file: tsz_lsif::frontend::SourceFileRef(0),
                    index: 1,
                },
                range((0, 16), (0, 17)),
                1,
            )],
            is_exported: true,
            ..Default::default()
        },
    );
    frontend.set_symbol(
        x,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(
                tsz_lsif::frontend::NodeRef {
                    file: tsz_lsif::frontend::SourceFileRef(0),
                    index: decl,
                },
                range((0, 25), (0, 26)),
                2,
            )],
            is_exported: false,
            ..Default::default()
        },
    );
    let _ = usage;

    let ids = IdGenerator::new(IdMode::Monotonic);
    let emitter = CollectingEmitter::default();
    let data = DataManager::new(emitter, ids, false);
    let mut visitor = Visitor::new(&frontend, data, false, "tsc".to_string());

    let files = frontend.source_files();
    visitor
        .run_project("proj", "typescript", |v| {
            for file in &files {
                v.visit_source_file(*file)?;
            }
            Ok(())
        })
        .unwrap();
    let mut data = visitor.into_data_manager();
    let elements = &data.emitter_mut().elements;

    // "x" is unexported: its declaration is the sole source of a moniker
    // identifier, and it must never get an export moniker.
    let monikers = moniker_vertices(elements);
    assert_eq!(monikers.len(), 1, "only f's export moniker, not x's");
    assert_eq!(monikers[0].1, "a:f");

    // x's reference-result must aggregate exactly two ranges total: its own
    // declaration (via a definitions-property item edge) and its one inner
    // use (via a references-property item edge) (§8 scenario 4).
    let x_range_ids = range_ids_with_text(elements, "x");
    assert_eq!(x_range_ids.len(), 2, "x's declaration and its one inner use");
    let x_result_set = result_set_for_range(elements, x_range_ids[0]);
    let x_reference_result =
        reference_result_for(elements, x_result_set).expect("x's result-set owns a reference-result");

    let from_x_reference_result = item_edges_from(elements, x_reference_result);
    let total_x_ranges: usize = from_x_reference_result
        .iter()
        .map(|e| match e {
            Edge::Item { in_vs, .. } => in_vs.len(),
            _ => 0,
        })
        .sum();
    assert_eq!(
        total_x_ranges, 2,
        "x's reference-result aggregates its declaration and its one inner use"
    );
    assert!(
        from_x_reference_result
            .iter()
            .any(|e| matches!(e, Edge::Item { property: Some(ItemProperty::Definitions), .. })),
        "x's own declaration is reachable off its reference-result"
    );
    assert!(
        from_x_reference_result
            .iter()
            .any(|e| matches!(e, Edge::Item { property: Some(ItemProperty::References), .. })),
        "x's inner use is reachable off its reference-result"
    );
}

/// Scenario 2: `function _foo() {}` is not itself exported, but re-exported
/// under a different name via `export { _foo as foo }`. The alias gets its
/// own result-set and export moniker `a:foo`, and its result-set is wired
/// back to `_foo`'s reference-result through a `referenceResults`-property
/// `item` edge, so a references query over `_foo` also surfaces uses of the
/// alias from other files (§8 scenario 2).
#[test]
fn renamed_reexport_links_alias_reference_result_to_aliased_symbol() {
    let underlying = SymbolRef(1);
    let alias = SymbolRef(2);

    let mut frontend = MockFrontend::new();

    let mut a = FileBuilder::new("a.ts");
    a.container(0, "_foo", "function", range((0, 17), (0, 21)), underlying, true);
    a.identifier(0, "foo", range((1, 16), (1, 19)), alias);
    a.export(alias);
    frontend.add_file(a);

    let mut b = FileBuilder::new("b.ts");
    b.identifier(0, "foo", range((2, 0), (2, 3)), alias);
    frontend.add_file(b);

    frontend.set_symbol(
        underlying,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(
                tsz_lsif::frontend::NodeRef {
                    file: tsz_lsif::frontend::SourceFileRef(0),
                    index: 1,
                },
                range((0, 17), (0, 21)),
                1,
            )],
            is_exported: false,
            ..Default::default()
        },
    );
    frontend.set_symbol(
        alias,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(
                tsz_lsif::frontend::NodeRef {
                    file: tsz_lsif::frontend::SourceFileRef(0),
                    index: 2,
                },
                range((1, 16), (1, 19)),
                3,
            )],
            is_exported: true,
            is_alias: true,
            aliased: Some(underlying),
            ..Default::default()
        },
    );

    let ids = IdGenerator::new(IdMode::Monotonic);
    let emitter = CollectingEmitter::default();
    let data = DataManager::new(emitter, ids, false);
    let mut visitor = Visitor::new(&frontend, data, false, "tsc".to_string());

    let files = frontend.source_files();
    visitor
        .run_project("proj", "typescript", |v| {
            for file in &files {
                v.visit_source_file(*file)?;
            }
            Ok(())
        })
        .unwrap();
    let mut data = visitor.into_data_manager();
    let elements = &data.emitter_mut().elements;

    assert_eq!(
        count_vertices(elements, |v| matches!(v, Vertex::ResultSet {})),
        2,
        "_foo and its alias each own a result-set"
    );

    let monikers = moniker_vertices(elements);
    assert_eq!(monikers.len(), 1, "only the alias is exported");
    assert_eq!(monikers[0], ("tsc", "a:foo", Some(MonikerKind::Export)));

    let cross_link = item_edges(elements)
        .into_iter()
        .find(|e| matches!(e, Edge::Item { property: Some(ItemProperty::ReferenceResults), .. }))
        .expect("alias's reference-result is cross-linked to _foo's reference-result");
    if let Edge::Item { in_vs, .. } = cross_link {
        assert_eq!(in_vs.len(), 1);
    }
}

/// A symbol touched at its declaration site with quick-info available gets
/// a `hoverResult` vertex and a `textDocument/hover` edge off its result-set
/// (§1, §3 "ResultSet ... owns at most one ... hoverResult").
#[test]
fn hover_result_is_emitted_on_first_symbol_touch() {
    let foo = SymbolRef(1);

    let mut frontend = MockFrontend::new();

    let mut a = FileBuilder::new("a.ts");
    a.container(0, "foo", "function", range((0, 16), (0, 19)), foo, true);
    a.export(foo);
    frontend.add_file(a);

    let decl_node = tsz_lsif::frontend::NodeRef {
        file: tsz_lsif::frontend::SourceFileRef(0),
        index: 1,
    };
    frontend.set_symbol(
        foo,
        FrontendSymbolInfo {
            declarations: vec![support::declaration(decl_node, range((0, 16), (0, 19)), 1)],
            is_exported: true,
            ..Default::default()
        },
    );
    frontend.set_quick_info(
        decl_node,
        HoverContents {
            contents: vec![MarkedString {
                language: "typescript".to_string(),
                value: "function foo(): void".to_string(),
            }],
        },
    );

    let ids = IdGenerator::new(IdMode::Monotonic);
    let emitter = CollectingEmitter::default();
    let data = DataManager::new(emitter, ids, false);
    let mut visitor = Visitor::new(&frontend, data, false, "tsc".to_string());

    let files = frontend.source_files();
    visitor
        .run_project("proj", "typescript", |v| {
            for file in &files {
                v.visit_source_file(*file)?;
            }
            Ok(())
        })
        .unwrap();
    let mut data = visitor.into_data_manager();
    let elements = &data.emitter_mut().elements;

    let hover_vertex_id = elements
        .iter()
        .find_map(|e| match &e.body {
            ElementBody::Vertex(Vertex::HoverResult { result }) => {
                assert_eq!(result.contents[0].value, "function foo(): void");
                Some(e.id)
            }
            _ => None,
        })
        .expect("hoverResult vertex emitted for foo's first touch");

    let foo_range_ids = range_ids_with_text(elements, "foo");
    let result_set_id = result_set_for_range(elements, foo_range_ids[0]);
    let hover_edge_target = elements
        .iter()
        .find_map(|e| match &e.body {
            ElementBody::Edge(Edge::TextDocumentHover { out_v, in_v }) if *out_v == result_set_id => Some(*in_v),
            _ => None,
        })
        .expect("textDocument/hover edge from foo's result-set");
    assert_eq!(hover_edge_target, hover_vertex_id);
}
