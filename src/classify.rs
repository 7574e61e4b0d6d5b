//! Module classifier and group computation (spec.md §4.6).
//!
//! Two passes over the same dependency graph: CommonJS-ness propagation
//! (DFS from every directly-CommonJS module), then union-find over the
//! remaining ES-to-ES static-import edges to compute connected-component
//! "groups" the Binder treats as a unit (spec.md §4.7 "runs once per
//! group"). Grounded on the teacher's own Tarjan-SCC cycle detector
//! (`analyzer/cycles.rs` in the pre-transform tree) for the general shape of
//! "graph algorithm over a `Vec<Vec<SourceIndex>>` adjacency", generalized
//! from "find all cycles" to "find connected components."

use rustc_hash::FxHashMap;

use crate::ast::Module as InternalModule;
use crate::import_record::ImportRecordKind;
use crate::source::SourceIndex;

#[derive(Debug, Clone, Default)]
pub struct ModuleInfo {
    pub is_entry: bool,
    pub is_commonjs: bool,
    pub group_label: u32,
    pub is_target_of_import_star: bool,
}

pub struct ClassifyOutput {
    pub module_infos: Vec<ModuleInfo>,
    /// Groups, each a list of source indices, sorted internally by output
    /// index (spec.md §4.6 "Groups are sorted internally by `output_index`").
    pub groups: Vec<Vec<SourceIndex>>,
}

/// Rule 3 of spec.md §4.6 ("transitively, one of its dependencies is
/// CommonJS and it depends on them via a non-ES-import edge") read literally
/// would mark the *requirer* as CommonJS whenever it calls `require()`/
/// dynamic `import()` on a target that is itself CommonJS — which rule 2
/// already guarantees for exactly that edge kind. We implement it exactly as
/// written (see DESIGN.md): a module gains CommonJS status if it holds a
/// `Require`/`DynamicImport` edge to a module already in the CommonJS set.
/// Static ES-import edges never propagate CommonJS-ness onto the importer,
/// which keeps Scenario B (spec.md §8) intact — `entry.js` statically
/// imports a CommonJS module and stays an ES module.
pub fn classify(modules: &[InternalModule], entry_indices: &[SourceIndex]) -> ClassifyOutput {
    let n = modules.len();
    let mut is_commonjs = vec![false; n];

    for (i, module) in modules.iter().enumerate() {
        if module.has_commonjs_exports {
            is_commonjs[i] = true;
        }
    }
    for module in modules {
        for record in &module.import_records {
            if matches!(record.kind, ImportRecordKind::Require | ImportRecordKind::DynamicImport) {
                if let Some(target) = record.resolved_source_index {
                    is_commonjs[target as usize] = true;
                }
            }
        }
    }

    loop {
        let mut changed = false;
        for (i, module) in modules.iter().enumerate() {
            if is_commonjs[i] {
                continue;
            }
            for record in &module.import_records {
                if matches!(record.kind, ImportRecordKind::Require | ImportRecordKind::DynamicImport) {
                    if let Some(target) = record.resolved_source_index {
                        if is_commonjs[target as usize] {
                            is_commonjs[i] = true;
                            changed = true;
                            break;
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut is_target_of_import_star = vec![false; n];
    for module in modules {
        for record in &module.import_records {
            if matches!(record.kind, ImportRecordKind::ExportStar) {
                if let Some(target) = record.resolved_source_index {
                    is_target_of_import_star[target as usize] = true;
                }
            }
        }
    }

    // spec.md §4.6: union-find runs only over *static ES import* edges.
    // `export {a} from`/`export * from` targets that aren't otherwise joined
    // by a static import are handled cross-group by the Binder's
    // require-style re-export path (spec.md §4.7), which reads the target's
    // live exports object through a `require()` reference rather than
    // needing a shared Binder pass.
    let mut uf = UnionFind::new(n);
    for (i, module) in modules.iter().enumerate() {
        if is_commonjs[i] {
            continue;
        }
        for record in &module.import_records {
            if !matches!(record.kind, ImportRecordKind::StaticImport) {
                continue;
            }
            if let Some(target) = record.resolved_source_index {
                if !is_commonjs[target as usize] {
                    uf.union(i, target as usize);
                }
            }
        }
    }

    let mut group_of_root: FxHashMap<usize, u32> = FxHashMap::default();
    let mut group_label = vec![0u32; n];
    let mut groups: Vec<Vec<SourceIndex>> = Vec::new();
    for i in 0..n {
        let root = uf.find(i);
        let label = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            (groups.len() - 1) as u32
        });
        group_label[i] = label;
        groups[label as usize].push(i as SourceIndex);
    }

    let entry_set: std::collections::HashSet<SourceIndex> = entry_indices.iter().copied().collect();
    let module_infos = (0..n)
        .map(|i| ModuleInfo {
            is_entry: entry_set.contains(&(i as SourceIndex)),
            is_commonjs: is_commonjs[i],
            group_label: group_label[i],
            is_target_of_import_star: is_target_of_import_star[i],
        })
        .collect();

    ClassifyOutput { module_infos, groups }
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_record::ImportRecord;

    fn module_with(records: Vec<ImportRecord>, has_commonjs_exports: bool) -> InternalModule {
        InternalModule { import_records: records, has_commonjs_exports, ..Default::default() }
    }

    #[test]
    fn static_import_from_commonjs_keeps_importer_as_es() {
        // entry.js statically imports m.js which has `module.exports = ...` (Scenario B).
        let mut import_to_m = ImportRecord::new(ImportRecordKind::StaticImport, "./m");
        import_to_m.resolved_source_index = Some(1);
        let entry = module_with(vec![import_to_m], false);
        let m = module_with(vec![], true);

        let out = classify(&[entry, m], &[0]);
        assert!(!out.module_infos[0].is_commonjs);
        assert!(out.module_infos[1].is_commonjs);
        assert_ne!(out.module_infos[0].group_label, out.module_infos[1].group_label);
    }

    #[test]
    fn requiring_a_commonjs_module_marks_the_requirer_commonjs_too() {
        let mut require_m = ImportRecord::new(ImportRecordKind::Require, "./m");
        require_m.resolved_source_index = Some(1);
        let entry = module_with(vec![require_m], false);
        let m = module_with(vec![], false);

        let out = classify(&[entry, m], &[0]);
        assert!(out.module_infos[1].is_commonjs, "require target always becomes commonjs");
        assert!(out.module_infos[0].is_commonjs, "requirer needs `require` in scope too");
    }

    #[test]
    fn two_es_modules_joined_by_static_import_share_a_group() {
        let mut import_to_b = ImportRecord::new(ImportRecordKind::StaticImport, "./b");
        import_to_b.resolved_source_index = Some(1);
        let a = module_with(vec![import_to_b], false);
        let b = module_with(vec![], false);

        let out = classify(&[a, b], &[0]);
        assert_eq!(out.module_infos[0].group_label, out.module_infos[1].group_label);
        assert_eq!(out.groups.len(), 1);
        assert_eq!(out.groups[0].len(), 2);
    }

    #[test]
    fn export_star_target_is_flagged() {
        let mut star = ImportRecord::new(ImportRecordKind::ExportStar, "./a");
        star.resolved_source_index = Some(1);
        let entry = module_with(vec![star], false);
        let a = module_with(vec![], false);

        let out = classify(&[entry, a], &[0]);
        assert!(out.module_infos[1].is_target_of_import_star);
    }
}
