//! Ties the five phases together into one build (spec.md §2 "Control flow
//! for a build"): Scan -> Classify -> Bind -> Print -> Link, with a
//! `wait-all` barrier between each (spec.md §5) and an abort if the
//! accumulated error count is non-zero once a phase finishes (spec.md §7
//! "the pipeline checks the count and exits non-zero if any").
//!
//! The Printer itself has no standalone phase module here: [`crate::linker`]
//! calls [`crate::printer::print_module`] per module as part of assembling
//! each entry's bundle, rather than the pipeline materializing a
//! `Vec<PrintChunk>` up front and handing it to the Linker (see
//! `linker.rs`'s module docs, and DESIGN.md, for why).

use std::path::PathBuf;

use crate::classify::classify;
use crate::error::BundleError;
use crate::format::{OutputFormat, QuoteStyle, UnsupportedFeatures};
use crate::linker::{link_all, EntryBundle, LinkOptions, SourceMapMode};
use crate::log::{Log, DEFAULT_ERROR_LIMIT};
use crate::resolver::Resolver;
use crate::scanner::scan;
use crate::source::Source;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub entry_paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub quote_style: QuoteStyle,
    pub unsupported_features: UnsupportedFeatures,
    pub minify_whitespace: bool,
    pub source_map: SourceMapMode,
    pub worker_count: usize,
    pub error_limit: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            entry_paths: Vec::new(),
            format: OutputFormat::default(),
            quote_style: QuoteStyle::default(),
            unsupported_features: UnsupportedFeatures::default(),
            minify_whitespace: false,
            source_map: SourceMapMode::None,
            worker_count: num_cpus::get(),
            error_limit: DEFAULT_ERROR_LIMIT,
        }
    }
}

pub struct BuildOutput {
    pub sources: Vec<Source>,
    pub bundles: Vec<EntryBundle>,
    pub log: Log,
}

/// Runs one full build. Returns `Err(BundleError::BuildAborted)` if the scan
/// or bind phase reported any error (spec.md §7); a genuinely fatal mid-phase
/// failure (e.g. a link I/O error) surfaces as its own `BundleError` variant.
pub fn build(options: &BuildOptions, resolver: &dyn Resolver) -> Result<BuildOutput, BundleError> {
    let log = Log::new(options.error_limit);

    let mut scan_out = scan(&options.entry_paths, resolver, &log, options.worker_count.max(1));
    if log.has_errors() {
        return Err(BundleError::BuildAborted { count: log.error_count() });
    }

    let classify_out = classify(&scan_out.modules, &scan_out.entry_indices);

    crate::binder::bind(
        &mut scan_out.modules,
        &classify_out,
        &mut scan_out.symbols,
        &scan_out.sources.iter().map(|s| s.pretty_path.clone()).collect::<Vec<_>>(),
        &log,
    );
    if log.has_errors() {
        return Err(BundleError::BuildAborted { count: log.error_count() });
    }

    let link_options = LinkOptions {
        format: options.format,
        quote_style: options.quote_style,
        unsupported_features: options.unsupported_features,
        minify_whitespace: options.minify_whitespace,
        source_map: options.source_map,
    };

    let bundles = link_all(
        &scan_out.entry_indices,
        &scan_out.sources,
        &scan_out.modules,
        &classify_out,
        &scan_out.symbols,
        &scan_out.source_index_to_output_index,
        &link_options,
    )?;

    Ok(BuildOutput { sources: scan_out.sources, bundles, log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FsResolver;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn builds_a_two_module_es_graph_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "entry.js", "import {x} from './m.js';\nconsole.log(x);\n");
        write_file(dir.path(), "m.js", "export const x = 7;\n");

        let resolver = FsResolver::new(dir.path());
        let options = BuildOptions {
            entry_paths: vec![dir.path().join("entry.js")],
            worker_count: 2,
            ..BuildOptions::default()
        };

        let output = build(&options, &resolver).expect("build succeeds");
        assert_eq!(output.bundles.len(), 1);
        assert!(!output.log.has_errors());
        let text = String::from_utf8(output.bundles[0].js.clone()).unwrap();
        assert!(text.contains("console.log"));
        assert!(text.contains('7'));
    }

    #[test]
    fn aborts_between_phases_when_scan_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "entry.js", "import {x} from './missing.js';\n");

        let resolver = FsResolver::new(dir.path());
        let options = BuildOptions {
            entry_paths: vec![dir.path().join("entry.js")],
            worker_count: 2,
            ..BuildOptions::default()
        };

        let err = build(&options, &resolver).unwrap_err();
        assert!(matches!(err, BundleError::BuildAborted { .. }));
    }
}
