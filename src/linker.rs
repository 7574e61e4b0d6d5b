//! Linker / emitter (spec.md §4.8): per entry point, walks the dependency
//! graph in a deterministic topological order, partitions it into group
//! runs, wraps each run in a closure keyed by its root's output index,
//! concatenates the Printer's per-module chunks, and joins their VLQ
//! source-map streams into one delta stream for the whole bundle.
//!
//! Grounded on the Scanner's own worker-per-unit-of-work shape
//! (`scanner.rs`): one task per entry point (spec.md §5 "Linker: one task
//! per entry point; they only read the printed chunks"), `std::thread::scope`
//! rather than a channel since there's no fixed point to reach — every
//! entry's reachable set is already known once Scan/Classify/Bind have run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::ast::Module as InternalModule;
use crate::classify::ClassifyOutput;
use crate::error::LinkError;
use crate::format::{OutputFormat, QuoteStyle, UnsupportedFeatures};
use crate::joiner::Joiner;
use crate::printer::{print_module, PrintContext, PrintOptions};
use crate::source::{Source, SourceIndex};
use crate::sourcemap::{append_source_map_chunk, SourceMapState};
use crate::symbol::SymbolMap;

/// Runtime helpers the printed modules call by name (spec.md §4.8 step 3:
/// "a fixed bootstrap snippet that provides `require`, `__toModule`,
/// `__export`, ..."). Kept as a literal string rather than round-tripped
/// through the lowering pass — it never needs binding identities of its own,
/// only to sit in front of the module closures byte-for-byte (see
/// DESIGN.md).
const BOOTSTRAP_HEADER: &str = "(function(modules, entryId) {\n  var cache = {};\n  function require(id) {\n    var cached = cache[id];\n    if (cached) return cached.exports;\n    var module = cache[id] = { exports: {} };\n    modules[id](require, module.exports, module);\n    return module.exports;\n  }\n  function __export(target, all) {\n    for (var name in all) Object.defineProperty(target, name, { get: all[name], enumerable: true });\n  }\n  function __toModule(mod) {\n    return mod && mod.__esModule ? mod : Object.assign({ default: mod }, mod);\n  }\n  require(entryId);\n})({\n";

const BOOTSTRAP_FOOTER_PREFIX: &str = "}, ";
const BOOTSTRAP_FOOTER_SUFFIX: &str = ");\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapMode {
    None,
    Inline,
    External,
    Both,
}

#[derive(Debug, Clone)]
pub struct LinkOptions {
    pub format: OutputFormat,
    pub quote_style: QuoteStyle,
    pub unsupported_features: UnsupportedFeatures,
    pub minify_whitespace: bool,
    pub source_map: SourceMapMode,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quote_style: QuoteStyle::default(),
            unsupported_features: UnsupportedFeatures::default(),
            minify_whitespace: false,
            source_map: SourceMapMode::None,
        }
    }
}

impl LinkOptions {
    fn print_options(&self) -> PrintOptions {
        PrintOptions {
            format: self.format,
            quote_style: self.quote_style,
            unsupported_features: self.unsupported_features,
            minify_whitespace: self.minify_whitespace,
        }
    }
}

/// One entry point's finished output (spec.md §6): `js` always present,
/// `map_json` present whenever `LinkOptions::source_map` asked for one.
pub struct EntryBundle {
    pub entry_index: SourceIndex,
    pub js: Vec<u8>,
    pub map_json: Option<String>,
}

/// Iterates the dependency edges the Linker's topological walk follows:
/// every resolved, non-disabled import record, in AST declaration order
/// (spec.md §4.8 step 1 "iteration order over a module's imports follows the
/// declaration order in the AST, never hash-map iteration"). A disabled
/// module still gets a (numeric) edge so its empty closure lands in the
/// assembly at the right place and the graph still terminates there (spec.md
/// §4.5 step 3).
fn dependency_targets(module: &InternalModule) -> impl Iterator<Item = SourceIndex> + '_ {
    module.import_records.iter().filter_map(|r| r.resolved_source_index)
}

/// Iterative post-order DFS from `entry`: a source is pushed to `order`
/// only after every one of its dependencies has been (spec.md §4.8 step 1
/// "visiting dependencies before dependents"). Iterative rather than
/// recursive so a deep import chain can't blow the stack.
fn post_order(entry: SourceIndex, modules: &[InternalModule]) -> Vec<SourceIndex> {
    let mut visited = vec![false; modules.len()];
    let mut order = Vec::new();
    // (source, next dependency index to examine)
    let mut stack: Vec<(SourceIndex, usize)> = Vec::new();
    visited[entry as usize] = true;
    stack.push((entry, 0));

    while let Some(&mut (src, ref mut next)) = stack.last_mut() {
        let deps: Vec<SourceIndex> = dependency_targets(&modules[src as usize]).collect();
        if *next < deps.len() {
            let dep = deps[*next];
            *next += 1;
            if !visited[dep as usize] {
                visited[dep as usize] = true;
                stack.push((dep, 0));
            }
        } else {
            order.push(src);
            stack.pop();
        }
    }
    order
}

/// Partitions `entry`'s reachable set into contiguous group runs, ordered by
/// each group's first appearance in the dependency-respecting walk (spec.md
/// §4.8 step 2). Within a run, members keep their post-order position, so
/// the member "other members of the run don't depend on" (spec.md §3
/// `Group`) — the one nothing else in the group imports — lands last, which
/// is also the member the group's own wrapper is keyed on.
///
/// Groups formed purely by static ES-import edges are always contiguous in a
/// single straight-line post-order walk; a module imported from two
/// unrelated branches of the graph can in principle scatter its group across
/// more than one first-occurrence position. This implementation folds every
/// occurrence of a group into its single run (recorded in DESIGN.md as a
/// known simplification relative to a full reachability-based chunk
/// computation) rather than leaving a group split across the assembly.
fn assembly_order(entry: SourceIndex, modules: &[InternalModule], classify: &ClassifyOutput) -> Vec<SourceIndex> {
    let post = post_order(entry, modules);

    let mut group_members: FxHashMap<u32, Vec<SourceIndex>> = FxHashMap::default();
    for &src in &post {
        let label = classify.module_infos[src as usize].group_label;
        group_members.entry(label).or_default().push(src);
    }

    let mut first_seen: HashSet<u32> = HashSet::new();
    let mut group_order: Vec<u32> = Vec::new();
    for &src in &post {
        let label = classify.module_infos[src as usize].group_label;
        if first_seen.insert(label) {
            group_order.push(label);
        }
    }

    let mut order = Vec::with_capacity(post.len());
    for label in group_order {
        order.extend(group_members[&label].iter().copied());
    }
    order
}

/// `wrapper_key[source]` is the numeric key `source`'s group is registered
/// under in the bundle's `modules` map: the *root's* output index, shared by
/// every member of the group (spec.md §4.8 step 4 "emit an opening
/// `output_index(`" — one opening per run, not per member). A cross-group
/// `require()`/`export ... from` can target any member of another group, not
/// only its root, so the Printer's `require(N)` must resolve to the key the
/// *group* is registered under rather than that member's own output index;
/// this is the open question "which index does a non-root group member's
/// import resolve to" recorded in DESIGN.md, resolved here by aliasing every
/// member's wrapper key to its root's.
fn group_runs(assembly: &[SourceIndex], classify: &ClassifyOutput) -> Vec<Vec<SourceIndex>> {
    let mut by_group: FxHashMap<u32, Vec<SourceIndex>> = FxHashMap::default();
    for &src in assembly {
        by_group.entry(classify.module_infos[src as usize].group_label).or_default().push(src);
    }
    let mut order: Vec<u32> = Vec::new();
    let mut seen = HashSet::new();
    for &src in assembly {
        let label = classify.module_infos[src as usize].group_label;
        if seen.insert(label) {
            order.push(label);
        }
    }
    order.into_iter().map(|label| by_group.remove(&label).expect("label came from assembly")).collect()
}

fn wrapper_keys(runs: &[Vec<SourceIndex>], source_index_to_output_index: &[u32]) -> FxHashMap<SourceIndex, u32> {
    let mut keys = FxHashMap::default();
    for members in runs {
        let root = *members.last().expect("a group always has at least one member");
        let key = source_index_to_output_index[root as usize];
        for &member in members {
            keys.insert(member, key);
        }
    }
    keys
}

fn write_raw(js: &mut Joiner, text: &str, pending_lines: &mut i32) {
    js.add_string(text);
    *pending_lines += text.bytes().filter(|&b| b == b'\n').count() as i32;
}

/// Links one entry point (spec.md §4.8). Prints every reachable module
/// itself (the Printer phase is meant to run once per module for the whole
/// build and be shared across entries that reach the same module; here each
/// entry's link task reprints its own reachable set independently, trading
/// some duplicate work for not needing a cross-thread chunk cache — see
/// DESIGN.md).
pub fn link_entry(
    entry: SourceIndex,
    sources: &[Source],
    modules: &[InternalModule],
    classify: &ClassifyOutput,
    symbols: &SymbolMap,
    source_index_to_output_index: &[u32],
    options: &LinkOptions,
) -> Result<EntryBundle, LinkError> {
    let assembly = assembly_order(entry, modules, classify);
    let runs = group_runs(&assembly, classify);
    let keys = wrapper_keys(&runs, source_index_to_output_index);
    let print_options = options.print_options();

    // spec.md §3 "Output index": the source-map `sources` array is ordered
    // by the globally-sorted output index, not by assembly/emission order —
    // sort this entry's reachable set by `source_index_to_output_index` and
    // use each module's rank in that order as its position in `sources`.
    let mut by_output_index = assembly.clone();
    by_output_index.sort_by_key(|&src| source_index_to_output_index[src as usize]);
    let source_position: FxHashMap<SourceIndex, i32> =
        by_output_index.iter().enumerate().map(|(pos, &src)| (src, pos as i32)).collect();

    let mut js = Joiner::new();
    let mut mappings: Vec<u8> = Vec::new();
    let mut pending_lines: i32 = 0;
    let mut prev_end_state = SourceMapState::default();
    let mut source_list: Vec<(String, String)> = by_output_index
        .iter()
        .map(|&src| (sources[src as usize].pretty_path.clone(), sources[src as usize].contents.clone()))
        .collect();

    let bundled = matches!(options.format, OutputFormat::Bundle);
    if bundled {
        write_raw(&mut js, BOOTSTRAP_HEADER, &mut pending_lines);
    } else if matches!(options.format, OutputFormat::Iife) {
        write_raw(&mut js, "(() => {\n", &mut pending_lines);
    }

    // `wrapper_keys` holds the key the printer should emit for each
    // require() target; `PrintContext` wants a plain slice indexed by
    // source index, built once up front rather than per module.
    let key_slice = keys_as_slice(&keys, modules.len());

    for members in &runs {
        let root = *members.last().expect("group has a member");
        let key = source_index_to_output_index[root as usize];

        if bundled {
            write_raw(&mut js, &format!("  {key}: function(require, exports, module) {{\n"), &mut pending_lines);
        }

        for &src in members {
            let module = &modules[src as usize];
            let source = &sources[src as usize];
            let ctx = PrintContext {
                symbols,
                import_records: &module.import_records,
                source_index_to_output_index: &key_slice,
                own_source_index: src,
                source_text: &source.contents,
                options: &print_options,
            };
            let chunk = print_module(module, &ctx)?;

            let position = source_position[&src];

            let start_state = SourceMapState {
                generated_line: 0,
                generated_column: 0,
                source_index: position - src as i32,
                original_line: 0,
                original_column: 0,
            };
            prev_end_state.generated_line = pending_lines;
            pending_lines = 0;
            append_source_map_chunk(&mut mappings, &mut prev_end_state, start_state, chunk.end_state, &chunk.mappings);

            js.add_bytes(&chunk.js);
            if js.last_byte() != Some(b'\n') {
                js.add_byte(b'\n');
                pending_lines += 1;
            }
        }

        if bundled {
            write_raw(&mut js, "  },\n", &mut pending_lines);
        }
    }

    if bundled {
        // Drop the trailing `,\n` of the last member before closing the map.
        if js.ends_with(b",\n") {
            js.truncate(js.length() - 2);
            js.add_byte(b'\n');
        }
        write_raw(&mut js, BOOTSTRAP_FOOTER_PREFIX, &mut pending_lines);
        let entry_key = source_index_to_output_index[entry as usize];
        write_raw(&mut js, &entry_key.to_string(), &mut pending_lines);
        write_raw(&mut js, BOOTSTRAP_FOOTER_SUFFIX, &mut pending_lines);
    } else if matches!(options.format, OutputFormat::Iife) {
        write_raw(&mut js, "})();\n", &mut pending_lines);
    }

    let map_json = match options.source_map {
        SourceMapMode::None => None,
        _ => Some(render_source_map_json(&source_list, &mappings)),
    };

    Ok(EntryBundle { entry_index: entry, js: js.done(), map_json })
}

/// `PrintContext::source_index_to_output_index` is read by module-global
/// index; build the full-length slice once so every module's print context
/// this entry prints can borrow the same backing storage.
fn keys_as_slice(keys: &FxHashMap<SourceIndex, u32>, len: usize) -> Vec<u32> {
    let mut out = vec![0u32; len];
    for (&src, &key) in keys {
        out[src as usize] = key;
    }
    out
}

fn render_source_map_json(source_list: &[(String, String)], mappings: &[u8]) -> String {
    let sources: Vec<String> = source_list.iter().map(|(path, _)| json_quote(path)).collect();
    let sources_content: Vec<String> = source_list.iter().map(|(_, contents)| json_quote(contents)).collect();
    let mappings_str = String::from_utf8_lossy(mappings);
    format!(
        "{{\"version\":3,\"sources\":[{}],\"sourcesContent\":[{}],\"names\":[],\"mappings\":\"{}\"}}",
        sources.join(","),
        sources_content.join(","),
        mappings_str,
    )
}

fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Runs [`link_entry`] once per entry point, in parallel (spec.md §5
/// "Linker: one task per entry point; they only read the printed chunks").
pub fn link_all(
    entry_indices: &[SourceIndex],
    sources: &[Source],
    modules: &[InternalModule],
    classify: &ClassifyOutput,
    symbols: &SymbolMap,
    source_index_to_output_index: &[u32],
    options: &LinkOptions,
) -> Result<Vec<EntryBundle>, LinkError> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = entry_indices
            .iter()
            .map(|&entry| {
                scope.spawn(move || link_entry(entry, sources, modules, classify, symbols, source_index_to_output_index, options))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("link task panicked")).collect()
    })
}

/// Writes one entry's bundle to disk, refusing if `out_path` names a file
/// that was also read as input (spec.md §4.8 "Refusal policy").
pub fn write_bundle(
    bundle: &EntryBundle,
    out_path: &Path,
    map_mode: SourceMapMode,
    input_paths: &HashSet<PathBuf>,
) -> Result<(), LinkError> {
    let canonical_out = out_path.to_path_buf();
    if input_paths.contains(&canonical_out) {
        return Err(LinkError::OutputEqualsInput(canonical_out));
    }

    let mut js = bundle.js.clone();
    if let Some(map_json) = &bundle.map_json {
        match map_mode {
            SourceMapMode::Inline => {
                let encoded = base64_encode(map_json.as_bytes());
                js.extend_from_slice(format!("//# sourceMappingURL=data:application/json;base64,{encoded}\n").as_bytes());
            }
            SourceMapMode::External | SourceMapMode::Both => {
                let map_path = sibling_map_path(out_path);
                let basename = map_path.file_name().and_then(|n| n.to_str()).unwrap_or("bundle.js.map");
                js.extend_from_slice(format!("//# sourceMappingURL={basename}\n").as_bytes());
                std::fs::write(&map_path, map_json).map_err(|source| LinkError::Write { path: map_path, source })?;
                if matches!(map_mode, SourceMapMode::Both) {
                    let encoded = base64_encode(map_json.as_bytes());
                    js.extend_from_slice(format!("//# sourceMappingURL=data:application/json;base64,{encoded}\n").as_bytes());
                }
            }
            SourceMapMode::None => {}
        }
    }

    std::fs::write(out_path, js).map_err(|source| LinkError::Write { path: out_path.to_path_buf(), source })
}

fn sibling_map_path(out_path: &Path) -> PathBuf {
    let mut name = out_path.file_name().and_then(|n| n.to_str()).unwrap_or("bundle.js").to_string();
    name.push_str(".map");
    out_path.with_file_name(name)
}

fn base64_encode(data: &[u8]) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity((data.len() + 2) / 3 * 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0];
        let b1 = *chunk.get(1).unwrap_or(&0);
        let b2 = *chunk.get(2).unwrap_or(&0);
        let n = ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32);
        out.push(CHARS[((n >> 18) & 0x3F) as usize] as char);
        out.push(CHARS[((n >> 12) & 0x3F) as usize] as char);
        out.push(if chunk.len() > 1 { CHARS[((n >> 6) & 0x3F) as usize] as char } else { '=' });
        out.push(if chunk.len() > 2 { CHARS[(n & 0x3F) as usize] as char } else { '=' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::{ArrowBody, Expr, NumericLiteral};
    use crate::ast::stmt::{Stmt, VarDeclarator, VarKind};
    use crate::ast::{Part, Pattern};
    use crate::classify::ModuleInfo;
    use crate::import_record::{ImportRecord, ImportRecordKind};
    use crate::symbol::SymbolKind;
    use std::path::PathBuf;

    fn src(index: SourceIndex, path: &str, contents: &str) -> Source {
        Source::new(index, PathBuf::from(path), path.to_string(), contents.to_string())
    }

    /// Scenario A (spec.md §8): entry.js statically imports default + named
    /// from m.js; both land in one group, m.js's body is emitted before
    /// entry.js's, and there is exactly one wrapper closure in the bundle
    /// (keyed on entry.js, the run's root).
    #[test]
    fn scenario_a_single_group_closure_with_dependency_first_ordering() {
        let mut symbols = SymbolMap::new();
        let default_ref = symbols.new_symbol(1, "default", SymbolKind::Other);
        let x_ref = symbols.new_symbol(1, "x", SymbolKind::Other);
        let fn_local = symbols.new_symbol(0, "fn", SymbolKind::Import);
        let x_local = symbols.new_symbol(0, "x", SymbolKind::Import);
        symbols.merge(fn_local, default_ref);
        symbols.merge(x_local, x_ref);
        symbols.follow_all_symbols();

        let mut import_record = ImportRecord::new(ImportRecordKind::StaticImport, "./m");
        import_record.resolved_source_index = Some(1);

        let mut entry = InternalModule::default();
        entry.import_records.push(import_record);
        entry.parts.push(Part {
            stmts: vec![Stmt::Expr(Expr::Call {
                callee: Box::new(Expr::Raw("console.log".to_string())),
                arguments: vec![Expr::Call {
                    callee: Box::new(Expr::Identifier(fn_local)),
                    arguments: vec![Expr::Identifier(x_local)],
                    optional: false,
                    is_chain_continuation: false,
                }],
                optional: false,
                is_chain_continuation: false,
            })],
            starts: vec![0],
        });

        let mut m = InternalModule::default();
        m.parts.push(Part {
            stmts: vec![
                Stmt::VarDecl { kind: VarKind::Const, declarators: vec![VarDeclarator { pattern: Pattern::Identifier(default_ref), init: Some(Expr::Numeric(NumericLiteral(42.0))) }] },
                Stmt::VarDecl { kind: VarKind::Const, declarators: vec![VarDeclarator { pattern: Pattern::Identifier(x_ref), init: Some(Expr::Numeric(NumericLiteral(7.0))) }] },
            ],
            starts: vec![0, 0],
        });

        let modules = vec![entry, m];
        let sources = vec![src(0, "entry.js", ""), src(1, "m.js", "")];
        let classify = ClassifyOutput {
            module_infos: vec![
                ModuleInfo { is_entry: true, is_commonjs: false, group_label: 0, is_target_of_import_star: false },
                ModuleInfo { is_entry: false, is_commonjs: false, group_label: 0, is_target_of_import_star: false },
            ],
            groups: vec![vec![0, 1]],
        };
        let output_index = vec![0u32, 1u32];

        let options = LinkOptions::default();
        let bundle = link_entry(0, &sources, &modules, &classify, &symbols, &output_index, &options).unwrap();
        let text = String::from_utf8(bundle.js).unwrap();

        assert_eq!(text.matches("function(require, exports, module)").count(), 1, "one closure for the whole group");
        let m_pos = text.find("42").unwrap();
        let entry_pos = text.find("console.log").unwrap();
        assert!(m_pos < entry_pos, "m.js body must come before entry.js body");
        assert!(text.contains("}, 0);"), "suffix closes with entry's output index, got {text:?}");
    }

    /// Scenario C (spec.md §8): two `export *` targets land as two entries
    /// in the re-exporter's exports-setup call.
    #[test]
    fn scenario_c_export_star_union_is_visible_in_output() {
        let mut symbols = SymbolMap::new();
        let x_ref = symbols.new_symbol(1, "x", SymbolKind::Other);
        let y_ref = symbols.new_symbol(2, "y", SymbolKind::Other);
        symbols.follow_all_symbols();

        let mut star_a = ImportRecord::new(ImportRecordKind::ExportStar, "./a");
        star_a.resolved_source_index = Some(1);
        let mut star_b = ImportRecord::new(ImportRecordKind::ExportStar, "./b");
        star_b.resolved_source_index = Some(2);

        let mut entry = InternalModule::default();
        entry.import_records = vec![star_a, star_b];
        entry.parts.push(Part {
            stmts: vec![
                Stmt::Expr(Expr::Object(vec![crate::ast::expr::ObjectProperty {
                    key: crate::ast::PropertyKey::Identifier("x".to_string()),
                    value: Expr::Arrow { params: vec![], body: ArrowBody::Expr(Box::new(Expr::Identifier(x_ref))), is_async: false },
                    shorthand: false,
                    computed: false,
                    is_method: false,
                    is_spread: false,
                }])),
                Stmt::Expr(Expr::Object(vec![crate::ast::expr::ObjectProperty {
                    key: crate::ast::PropertyKey::Identifier("y".to_string()),
                    value: Expr::Arrow { params: vec![], body: ArrowBody::Expr(Box::new(Expr::Identifier(y_ref))), is_async: false },
                    shorthand: false,
                    computed: false,
                    is_method: false,
                    is_spread: false,
                }])),
            ],
            starts: vec![0, 0],
        });
        let a = InternalModule::default();
        let b = InternalModule::default();

        let modules = vec![entry, a, b];
        let sources = vec![src(0, "entry.js", ""), src(1, "a.js", ""), src(2, "b.js", "")];
        let classify = ClassifyOutput {
            module_infos: vec![
                ModuleInfo { is_entry: true, is_commonjs: false, group_label: 0, is_target_of_import_star: false },
                ModuleInfo { is_entry: false, is_commonjs: false, group_label: 1, is_target_of_import_star: true },
                ModuleInfo { is_entry: false, is_commonjs: false, group_label: 2, is_target_of_import_star: true },
            ],
            groups: vec![vec![0], vec![1], vec![2]],
        };
        let output_index = vec![0u32, 1u32, 2u32];
        let options = LinkOptions::default();
        let bundle = link_entry(0, &sources, &modules, &classify, &symbols, &output_index, &options).unwrap();
        let text = String::from_utf8(bundle.js).unwrap();
        assert!(text.contains("x:"));
        assert!(text.contains("y:"));
    }

    #[test]
    fn non_bundle_iife_format_has_no_numeric_module_map() {
        let symbols = SymbolMap::new();
        let mut entry = InternalModule::default();
        entry.parts.push(Part { stmts: vec![Stmt::Expr(Expr::Numeric(NumericLiteral(1.0)))], starts: vec![0] });
        let modules = vec![entry];
        let sources = vec![src(0, "entry.js", "")];
        let classify = ClassifyOutput {
            module_infos: vec![ModuleInfo { is_entry: true, is_commonjs: false, group_label: 0, is_target_of_import_star: false }],
            groups: vec![vec![0]],
        };
        let output_index = vec![0u32];
        let options = LinkOptions { format: OutputFormat::Iife, ..LinkOptions::default() };
        let bundle = link_entry(0, &sources, &modules, &classify, &symbols, &output_index, &options).unwrap();
        let text = String::from_utf8(bundle.js).unwrap();
        assert!(text.starts_with("(() => {"));
        assert!(!text.contains("require("));
    }

    #[test]
    fn refuses_to_overwrite_an_input_path() {
        let bundle = EntryBundle { entry_index: 0, js: b"1;".to_vec(), map_json: None };
        let mut inputs = HashSet::new();
        inputs.insert(PathBuf::from("/tmp/entry.js"));
        let err = write_bundle(&bundle, Path::new("/tmp/entry.js"), SourceMapMode::None, &inputs).unwrap_err();
        assert!(matches!(err, LinkError::OutputEqualsInput(_)));
    }
}
