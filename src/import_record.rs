//! `ImportRecord`: a resolved or unresolved dependency edge (spec.md §3).
//!
//! Grounded on the teacher's own `types::ImportEntry`/`ImportKind`
//! (`src/types.rs`), generalized from "report what kind of import this is"
//! to "carry the resolved target so the Binder and Printer can act on it."

use crate::source::SourceIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportRecordKind {
    StaticImport,
    DynamicImport,
    Require,
    ExportFrom,
    ExportStar,
}

#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub kind: ImportRecordKind,
    pub raw_path: String,
    pub resolved_source_index: Option<SourceIndex>,
    pub is_disabled: bool,
}

impl ImportRecord {
    pub fn new(kind: ImportRecordKind, raw_path: impl Into<String>) -> Self {
        Self {
            kind,
            raw_path: raw_path.into(),
            resolved_source_index: None,
            is_disabled: false,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        !self.is_disabled && self.resolved_source_index.is_none()
    }
}
