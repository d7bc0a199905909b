//! Per-project accumulator (§3 "ProjectData") and diamond-dependency memo
//! (§5 "processed table memoizes by tsconfig path").

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::elements::DiagnosticPayload;
use crate::id::ElementId;

pub struct ProjectData {
    pub id: ElementId,
    pub name: String,
    pub documents: Vec<ElementId>,
    pub diagnostics: Vec<DiagnosticPayload>,
}

impl ProjectData {
    pub fn new(id: ElementId, name: String) -> Self {
        ProjectData {
            id,
            name,
            documents: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn record_document(&mut self, document_id: ElementId) {
        self.documents.push(document_id);
    }
}

/// Memoizes processed project-reference tsconfig paths so a diamond
/// dependency graph (§5, §8 scenario 5) produces each project exactly once.
#[derive(Default)]
pub struct ProcessedProjects {
    seen: FxHashSet<PathBuf>,
}

impl ProcessedProjects {
    /// Returns `true` if this is the first time `tsconfig_path` has been
    /// seen, marking it processed as a side effect.
    pub fn mark_processed(&mut self, tsconfig_path: &Path) -> bool {
        self.seen.insert(tsconfig_path.to_path_buf())
    }

    pub fn is_processed(&self, tsconfig_path: &Path) -> bool {
        self.seen.contains(tsconfig_path)
    }
}
