//! Indexer configuration (§12).
//!
//! A plain struct in the style of `tsz_common::checker_options::CheckerOptions`:
//! every field has a sensible default, and the struct is constructed once per
//! run rather than read from global state (§9 "global mutable state").

use std::path::PathBuf;

use crate::id::IdMode;

/// Output format for the emitter (§4.2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitFormat {
    /// One element per line (ndjson).
    #[default]
    LineDelimitedJson,
    /// A single pretty-printed JSON array of all elements.
    PrettyJson,
    /// A graph-visualization aggregate: edges collapsed into embedded in/out
    /// lists on their endpoint vertices.
    GraphViz,
    /// A graph-database dialect: reciprocal in/out maps per vertex.
    GraphDb,
}

/// Library-level configuration for a single indexing run.
#[derive(Clone, Debug)]
pub struct IndexerConfig {
    /// How element ids are generated (§4.1).
    pub id_mode: IdMode,
    /// Which emitter format backs the sink (§4.2).
    pub emit_format: EmitFormat,
    /// Strict mode for `InternalSymbolLeak` (§7): fatal instead of a warning.
    pub strict: bool,
    /// Optional named group the emitted projects belong to.
    pub group_name: Option<String>,
    /// Root used to compute project-relative moniker paths (§4.4.1).
    pub repository_root: Option<PathBuf>,
    /// Moniker scheme name for the primary (non-npm) scheme. Defaults to
    /// `"tsc"`, matching the scenarios in §8.
    pub moniker_scheme: String,
    /// Tool name/version recorded on the `metaData` vertex.
    pub tool_name: String,
    pub tool_version: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            id_mode: IdMode::Monotonic,
            emit_format: EmitFormat::LineDelimitedJson,
            strict: false,
            group_name: None,
            repository_root: None,
            moniker_scheme: "tsc".to_string(),
            tool_name: "tsz-lsif".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
