//! Output format and feature-gating types shared by the Printer and Linker
//! (spec.md §4.4 "Feature-gated output", §6 "Output file format").

/// Which wrapper shape the Linker assembles the bundle into (spec.md §6);
/// the Printer only needs to know this to decide whether a dynamic
/// `import()` stays literal or becomes a synchronous `require()` wrapped in
/// a settled promise (spec.md §4.4 "Require / import emission").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `((modules, entry) => {...})({...}, E)` — the default, documented in
    /// spec.md §6 "Bundled".
    #[default]
    Bundle,
    /// `(() => { ... })();`.
    Iife,
    /// Leave `require(...)`/`module.exports` as-is.
    Cjs,
    /// Preserve `import`/`export` syntax.
    Esm,
}

impl OutputFormat {
    /// Whether this format preserves a dynamic `import(...)` expression
    /// literally rather than lowering it to a wrapped `require()` call
    /// (spec.md §4.4, Scenario D).
    pub fn preserves_dynamic_import(self) -> bool {
        matches!(self, OutputFormat::Esm)
    }
}

/// Bit flags the Printer consults when emitting syntax that not every target
/// engine supports (spec.md §4.4 "Feature-gated output").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsupportedFeatures {
    /// Force `{a}` shorthand properties out to `{a: a}`.
    pub object_extensions: bool,
    /// Force template literals out to string concatenation.
    pub template_literal: bool,
    /// Force arrow functions out to `function` expressions.
    pub arrow: bool,
}

/// The quote character the printer should prefer, or `Auto` to run
/// `best_quote_char_for_string` per literal (spec.md §4.4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    #[default]
    Auto,
    Single,
    Double,
}
