//! Phase error types for the bundling pipeline.
//!
//! Each phase gets its own `thiserror` enum (the workspace already declares
//! `thiserror` at `workspace.dependencies` level; this crate uses it the way
//! `raya-compiler/src/error.rs` structures `CompileError`). A `BundleError`
//! aggregates them for callers that just want one `Result` type, the way the
//! teacher's CLI edge leans on `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// A byte range inside a `Source`'s contents, used to attribute diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: u32,
    pub len: u32,
}

impl Range {
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not resolve {raw_path:?} from {importer}")]
    ResolveFailed { importer: PathBuf, raw_path: String },

    #[error("could not read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: file extension not supported")]
    UnsupportedExtension { path: PathBuf },

    #[error("{path}: {0}", path = .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{path}: {0}", path = .path.display())]
    Lower { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("module graph references unknown source index {0}")]
    DanglingSourceIndex(u32),
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("no matching export for import {alias:?} from module {target}")]
    NoMatchingExport { alias: String, target: u32 },

    #[error("ambiguous export * for {name:?}: found in more than one star target")]
    AmbiguousStarExport { name: String },
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("unsupported syntax while printing: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("output path {0} equals an input path")]
    OutputEqualsInput(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Print(#[from] PrintError),
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("{count} error(s) encountered during scan/bind, aborting build")]
    BuildAborted { count: usize },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// A single diagnostic, range-attributed when possible (spec.md §7).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub pretty_path: String,
    pub range: Option<Range>,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn error(pretty_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pretty_path: pretty_path.into(),
            range: None,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(pretty_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pretty_path: pretty_path.into(),
            range: None,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}
