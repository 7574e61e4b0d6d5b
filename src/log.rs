//! Shared diagnostic log (spec.md §7).
//!
//! Errors and warnings from any phase are collected into one
//! `parking_lot`-guarded list rather than aborting the phase that found them;
//! the pipeline checks the error count between phases and aborts the build
//! if it is non-zero. Rendering follows the teacher's own CLI conventions
//! (`colored` for TTY output, see `progress.rs`).

use std::sync::atomic::{AtomicUsize, Ordering};

use colored::Colorize;
use parking_lot::Mutex;

use crate::error::{Diagnostic, Severity};

/// Default error-limit threshold (spec.md §7): stop accepting new errors
/// past this count so a broken build doesn't produce unbounded output.
pub const DEFAULT_ERROR_LIMIT: usize = 10;

pub struct Log {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    warning_count: AtomicUsize,
    error_limit: usize,
}

impl Log {
    pub fn new(error_limit: usize) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
            warning_count: AtomicUsize::new(0),
            error_limit,
        }
    }

    /// Record a diagnostic. Returns `false` once the error limit has been
    /// reached and the caller should stop doing further work that would
    /// only produce more errors.
    pub fn push(&self, diagnostic: Diagnostic) -> bool {
        match diagnostic.severity {
            Severity::Error => {
                let prior = self.error_count.fetch_add(1, Ordering::SeqCst);
                if prior >= self.error_limit {
                    return false;
                }
            }
            Severity::Warning => {
                self.warning_count.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.diagnostics.lock().push(diagnostic);
        true
    }

    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::SeqCst)
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count.load(Ordering::SeqCst)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Render every diagnostic to a string, one line (plus an optional caret
    /// span) per entry, colored when `use_color` is set (stdout is a TTY).
    pub fn render(&self, use_color: bool) -> String {
        let mut out = String::new();
        for d in self.diagnostics.lock().iter() {
            let kind = match d.severity {
                Severity::Error => {
                    if use_color {
                        "error".red().bold().to_string()
                    } else {
                        "error".to_string()
                    }
                }
                Severity::Warning => {
                    if use_color {
                        "warning".yellow().bold().to_string()
                    } else {
                        "warning".to_string()
                    }
                }
            };
            out.push_str(&format!("{}: {}: {}\n", d.pretty_path, kind, d.message));
        }
        out
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_limit_stops_accepting_new_errors() {
        let log = Log::new(2);
        assert!(log.push(Diagnostic::error("a.js", "one")));
        assert!(log.push(Diagnostic::error("a.js", "two")));
        assert!(!log.push(Diagnostic::error("a.js", "three")));
        assert_eq!(log.error_count(), 3);
    }

    #[test]
    fn warnings_never_abort() {
        let log = Log::new(1);
        assert!(log.push(Diagnostic::warning("a.js", "heads up")));
        assert!(log.push(Diagnostic::warning("a.js", "heads up 2")));
        assert!(!log.has_errors());
    }
}
