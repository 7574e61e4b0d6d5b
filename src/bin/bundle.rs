//! CLI front-end (spec.md §1 "out of scope, treated as an external
//! collaborator" for the core pipeline, but still the thing an operator
//! actually runs): flag parsing via `clap`, wiring into
//! [`bundler_core::build`], diagnostic rendering, and the process exit code
//! (spec.md §6, §7 "0 on success, 1 on any error").
//!
//! Grounded on the teacher's own CLI edge (`src/main.rs`'s `clap::Parser`
//! derive plus `progress::Spinner` feedback around long-running phases),
//! generalized from "one fixed operation" to the bundler's flag surface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bundler_core::build::{build, BuildOptions};
use bundler_core::format::{OutputFormat, QuoteStyle, UnsupportedFeatures};
use bundler_core::linker::{write_bundle, SourceMapMode};
use bundler_core::log::DEFAULT_ERROR_LIMIT;
use bundler_core::progress::Spinner;
use bundler_core::resolver::FsResolver;

/// Bundle JavaScript/TypeScript/JSX entry points into one or more output files.
#[derive(Debug, Parser)]
#[command(name = "bundle", version, about)]
struct Cli {
    /// Entry point file(s) to bundle.
    entries: Vec<PathBuf>,

    /// Produce a single bundled output containing every reachable module.
    #[arg(long)]
    bundle: bool,

    /// Write the bundle to this file (mutually exclusive with --outdir).
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Write one bundle per entry point into this directory.
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// `none` (default), `inline`, `external`, or `both`.
    #[arg(long, default_value = "none")]
    sourcemap: String,

    /// Omit whitespace from the generated output.
    #[arg(long = "minify-whitespace")]
    minify_whitespace: bool,

    /// `iife`, `cjs`, `esm`, or the default bundled module-map format.
    #[arg(long, default_value = "bundle")]
    format: String,

    /// Quote style for string literals: `auto` (default), `single`, `double`.
    #[arg(long, default_value = "auto")]
    quote_style: String,

    /// Root directory imports are resolved relative to (defaults to the
    /// first entry's parent directory).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Number of worker threads for the scan/link phases (defaults to the
    /// number of logical CPUs).
    #[arg(long)]
    workers: Option<usize>,

    /// Stop collecting new errors past this count.
    #[arg(long, default_value_t = DEFAULT_ERROR_LIMIT)]
    error_limit: usize,
}

fn parse_source_map_mode(s: &str) -> SourceMapMode {
    match s {
        "inline" => SourceMapMode::Inline,
        "external" => SourceMapMode::External,
        "both" => SourceMapMode::Both,
        _ => SourceMapMode::None,
    }
}

fn parse_format(s: &str) -> OutputFormat {
    match s {
        "iife" => OutputFormat::Iife,
        "cjs" => OutputFormat::Cjs,
        "esm" => OutputFormat::Esm,
        _ => OutputFormat::Bundle,
    }
}

fn parse_quote_style(s: &str) -> QuoteStyle {
    match s {
        "single" => QuoteStyle::Single,
        "double" => QuoteStyle::Double,
        _ => QuoteStyle::Auto,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.entries.is_empty() {
        eprintln!("error: at least one entry point is required");
        return ExitCode::FAILURE;
    }
    if cli.outfile.is_some() && cli.outdir.is_some() {
        eprintln!("error: --outfile and --outdir are mutually exclusive");
        return ExitCode::FAILURE;
    }

    let entry_paths: Vec<PathBuf> = cli
        .entries
        .iter()
        .map(|p| std::env::current_dir().map(|cwd| cwd.join(p)).unwrap_or_else(|_| p.clone()))
        .collect();

    let root = cli
        .root
        .clone()
        .or_else(|| entry_paths[0].parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let resolver = FsResolver::new(root);

    let options = BuildOptions {
        entry_paths: entry_paths.clone(),
        format: parse_format(&cli.format),
        quote_style: parse_quote_style(&cli.quote_style),
        unsupported_features: UnsupportedFeatures::default(),
        minify_whitespace: cli.minify_whitespace,
        source_map: parse_source_map_mode(&cli.sourcemap),
        worker_count: cli.workers.unwrap_or_else(num_cpus::get),
        error_limit: cli.error_limit,
    };

    let spinner = Spinner::new("bundling...");
    let output = match build(&options, &resolver) {
        Ok(output) => output,
        Err(err) => {
            spinner.finish_error(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    if output.log.has_errors() {
        spinner.finish_clear();
        eprint!("{}", output.log.render(console::Term::stderr().is_term()));
        return ExitCode::FAILURE;
    }
    if output.log.warning_count() > 0 {
        eprint!("{}", output.log.render(console::Term::stderr().is_term()));
    }

    let input_paths: std::collections::HashSet<PathBuf> = entry_paths.iter().flat_map(|p| p.canonicalize()).collect();

    for bundle in &output.bundles {
        let out_path = match (&cli.outfile, &cli.outdir) {
            (Some(outfile), _) => outfile.clone(),
            (_, Some(outdir)) => {
                let pretty = &output.sources[bundle.entry_index as usize].pretty_path;
                let stem = PathBuf::from(pretty).file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_else(|| "bundle".to_string());
                outdir.join(format!("{stem}.js"))
            }
            (None, None) => PathBuf::from("out.js"),
        };

        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }

        if let Err(err) = write_bundle(bundle, &out_path, options.source_map, &input_paths) {
            spinner.finish_error(&err.to_string());
            return ExitCode::FAILURE;
        }
    }

    spinner.finish_success(&format!("wrote {} bundle(s)", output.bundles.len()));
    ExitCode::SUCCESS
}
