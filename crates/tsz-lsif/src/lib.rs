//! LSIF (Language Server Index Format) producer for the tsz compiler.
//!
//! Walks a compiled project's symbol graph and emits a directed, labeled
//! graph of vertices (projects, documents, ranges, result sets, monikers,
//! hovers, definitions, references) and edges (`contains`, `next`,
//! `moniker`, `item`, `textDocument/*`) that downstream tools consume for
//! cross-repository hover, go-to-definition, find-references, and
//! document-symbol queries without re-running the compiler.
//!
//! The crate is organized the way the spec's component table lays out the
//! pipeline: [`graph_builder`] is the pure vertex/edge factory, [`emitter`]
//! hides the wire format, [`data_manager`] owns lifecycle ordering,
//! [`resolver`] canonicalizes compiler symbols, and [`visitor`] drives the
//! traversal. [`frontend`] is the trait boundary to the compiler front-end;
//! production embeddings implement it over `tsz-checker` and `tsz-binder`.

pub mod config;
pub mod data_manager;
pub mod document_data;
pub mod elements;
pub mod emitter;
pub mod error;
pub mod frontend;
pub mod graph_builder;
pub mod id;
pub mod moniker;
pub mod project_data;
pub mod reporter;
pub mod resolver;
pub mod symbol_data;
pub mod testing;
pub mod visitor;

pub use config::{EmitFormat, IndexerConfig};
pub use error::IndexError;
