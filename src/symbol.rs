//! Symbol table and `Ref` resolution (spec.md §4.2).
//!
//! `SymbolMap` is a two-level `outer: Vec<Vec<Symbol>>`, cloned per build so
//! the parsed ASTs stay read-only and reusable. Union-find merging follows
//! `link` pointers; `follow_all_symbols` collapses every chain to length <= 1
//! in one single-threaded pass so the printer can read from many threads
//! afterward without racing (spec.md §5).

use rustc_hash::FxHashMap;

use crate::source::SourceIndex;

/// A pointer into a two-level symbol map: `outer` is the owning source index
/// *at creation time* (refs are never renumbered as the graph grows),
/// `inner` is the per-source symbol slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ref {
    pub outer_index: SourceIndex,
    pub inner_index: u32,
}

impl Ref {
    pub fn new(outer_index: SourceIndex, inner_index: u32) -> Self {
        Self {
            outer_index,
            inner_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Unbound,
    Hoisted,
    Constant,
    Class,
    Import,
    CommonJsRef,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportItemStatus {
    None,
    Missing,
    Found,
}

#[derive(Debug, Clone)]
pub struct NamespaceAlias {
    pub namespace_ref: Ref,
    pub alias_string: String,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub link: Option<Ref>,
    pub use_count_estimate: u32,
    pub namespace_alias: Option<NamespaceAlias>,
    pub import_item_status: ImportItemStatus,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            link: None,
            use_count_estimate: 0,
            namespace_alias: None,
            import_item_status: ImportItemStatus::None,
        }
    }
}

/// `outer: Vec<Vec<Symbol>>`, indexed by `Ref::outer_index`/`Ref::inner_index`.
///
/// Sparse on the outer dimension: a source that has never had `new_symbol`
/// called for it simply has no row yet, so out-of-order creation across
/// parallel scan tasks doesn't require pre-sizing.
#[derive(Debug, Default)]
pub struct SymbolMap {
    outer: FxHashMap<SourceIndex, Vec<Symbol>>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_symbol(&mut self, source_index: SourceIndex, name: impl Into<String>, kind: SymbolKind) -> Ref {
        let row = self.outer.entry(source_index).or_default();
        let inner_index = row.len() as u32;
        row.push(Symbol::new(name, kind));
        Ref::new(source_index, inner_index)
    }

    pub fn get(&self, r: Ref) -> &Symbol {
        &self.outer[&r.outer_index][r.inner_index as usize]
    }

    pub fn get_mut(&mut self, r: Ref) -> &mut Symbol {
        self.outer
            .get_mut(&r.outer_index)
            .expect("ref outer index must exist")
            .get_mut(r.inner_index as usize)
            .expect("ref inner index must exist")
    }

    pub fn set(&mut self, r: Ref, symbol: Symbol) {
        *self.get_mut(r) = symbol;
    }

    /// Walk `link` chain until a symbol with `link = None` is found.
    /// Compresses the path it walked before returning.
    pub fn follow(&mut self, r: Ref) -> Ref {
        let mut cur = r;
        loop {
            let next = self.get(cur).link;
            match next {
                Some(next_ref) if next_ref != cur => cur = next_ref,
                _ => break,
            }
        }
        // Path compression: point every visited ref directly at `cur`.
        let mut walker = r;
        while walker != cur {
            let next = self.get(walker).link.unwrap();
            self.get_mut(walker).link = Some(cur);
            walker = next;
        }
        cur
    }

    /// Unite two symbols: the survivor keeps the larger `use_count_estimate`
    /// and its own `name`; uses are summed. Only valid before
    /// `follow_all_symbols` has run (spec.md §4.2 invariant).
    pub fn merge(&mut self, a: Ref, b: Ref) -> Ref {
        let ra = self.follow(a);
        let rb = self.follow(b);
        if ra == rb {
            return ra;
        }
        let (survivor, loser) = if self.get(ra).use_count_estimate >= self.get(rb).use_count_estimate {
            (ra, rb)
        } else {
            (rb, ra)
        };
        let loser_uses = self.get(loser).use_count_estimate;
        self.get_mut(survivor).use_count_estimate += loser_uses;
        self.get_mut(loser).link = Some(survivor);
        survivor
    }

    /// Read-only chain walk: does not compress path, so it is safe to call
    /// from many printer threads at once (spec.md §5 "the SymbolMap is
    /// effectively read-only for the printer"). Relies on
    /// `follow_all_symbols` having already run so every chain has length
    /// <= 1 and this never does more than one hop.
    pub fn follow_ro(&self, r: Ref) -> Ref {
        match self.get(r).link {
            Some(next) if next != r => next,
            _ => r,
        }
    }

    /// Adds one to the survivor's use count; called when the printer
    /// synthesizes a reference to a symbol.
    pub fn increment_use_count(&mut self, r: Ref) {
        let survivor = self.follow(r);
        self.get_mut(survivor).use_count_estimate += 1;
    }

    /// Single pass after binding that collapses every `link` chain to
    /// length <= 1, so the printer can read from many threads without a
    /// data race (spec.md §4.2, §5).
    pub fn follow_all_symbols(&mut self) {
        let refs: Vec<Ref> = self
            .outer
            .iter()
            .flat_map(|(&outer, syms)| (0..syms.len() as u32).map(move |inner| Ref::new(outer, inner)))
            .collect();
        for r in refs {
            self.follow(r);
        }
    }

    pub fn source_indices(&self) -> impl Iterator<Item = SourceIndex> + '_ {
        self.outer.keys().copied()
    }

    /// Moves every row from `other` into `self`. Used by the Scanner
    /// (spec.md §4.5) to fold each parallel lowering task's single-source
    /// `SymbolMap` fragment back into the build's shared table — rows never
    /// collide because each task only ever creates symbols for its own
    /// source index.
    pub fn merge_into(&mut self, other: SymbolMap) {
        for (outer, row) in other.outer {
            let slot = self.outer.entry(outer).or_default();
            debug_assert!(slot.is_empty(), "source index {outer} already has symbols");
            *slot = row;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_then_follow_all_converges() {
        let mut map = SymbolMap::new();
        let a = map.new_symbol(0, "a", SymbolKind::Other);
        let b = map.new_symbol(0, "b", SymbolKind::Other);
        let c = map.new_symbol(0, "c", SymbolKind::Other);

        map.merge(a, b);
        map.merge(b, c);
        map.follow_all_symbols();

        let fa = map.follow(a);
        let fb = map.follow(b);
        let fc = map.follow(c);
        assert_eq!(fa, fb);
        assert_eq!(fb, fc);
    }

    #[test]
    fn merge_sums_use_counts_and_keeps_higher_count_as_survivor() {
        let mut map = SymbolMap::new();
        let a = map.new_symbol(0, "a", SymbolKind::Other);
        let b = map.new_symbol(0, "b", SymbolKind::Other);
        map.get_mut(a).use_count_estimate = 5;
        map.get_mut(b).use_count_estimate = 1;

        let survivor = map.merge(a, b);
        assert_eq!(survivor, a);
        assert_eq!(map.get(a).use_count_estimate, 6);
    }

    #[test]
    fn increment_use_count_follows_to_survivor() {
        let mut map = SymbolMap::new();
        let a = map.new_symbol(0, "a", SymbolKind::Other);
        let b = map.new_symbol(0, "b", SymbolKind::Other);
        map.merge(a, b);
        map.increment_use_count(b);
        let survivor = map.follow(a);
        assert_eq!(map.get(survivor).use_count_estimate, 1);
    }
}
