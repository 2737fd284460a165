//! Union-find over the cells of a grid.
//!
//! The forest is index based: every `Cell` lives in one `Vec` and refers to its parent by
//! `CellIndex`, so there are no owning links between cells and path compression is a plain
//! index rewrite.

use std::mem;

use tracing::trace;

use crate::cells::{Cartesian2DCoordinate, Cell};
use crate::units::CellIndex;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct DisjointSet<H = ()> {
    cells: Vec<Cell<H>>,
    sets_count: usize,
}

impl<H> DisjointSet<H> {
    /// Every cell starts out as the only member of its own set.
    /// Cells are indexed in the order the iterator yields them.
    pub fn new<I>(cells: I) -> DisjointSet<H>
        where I: IntoIterator<Item = (Cartesian2DCoordinate, H)>
    {
        let cells: Vec<Cell<H>> = cells.into_iter()
            .map(|(coord, handle)| Cell::new(coord, handle))
            .collect();
        let sets_count = cells.len();

        DisjointSet { cells, sets_count }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// How many disjoint sets the cells are currently partitioned into.
    #[inline]
    pub fn sets_count(&self) -> usize {
        self.sets_count
    }

    /// Panics if the index is out of range.
    #[inline]
    pub fn cell(&self, cell: CellIndex) -> &Cell<H> {
        &self.cells[cell.0]
    }

    #[inline]
    pub fn cell_mut(&mut self, cell: CellIndex) -> &mut Cell<H> {
        &mut self.cells[cell.0]
    }

    #[inline]
    pub fn parent(&self, cell: CellIndex) -> Option<CellIndex> {
        self.cells[cell.0].parent()
    }

    #[inline]
    pub fn rank(&self, cell: CellIndex) -> u32 {
        self.cells[cell.0].rank()
    }

    #[inline]
    pub fn is_root(&self, cell: CellIndex) -> bool {
        self.cells[cell.0].is_root()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell<H>)> {
        self.cells.iter().enumerate().map(|(i, cell)| (CellIndex(i), cell))
    }

    /// The representative cell of the set containing `cell`.
    ///
    /// Every cell visited on the way up is re-pointed directly at the representative, so a
    /// second lookup from any of them is a single step. The representative itself never changes.
    pub fn find(&mut self, cell: CellIndex) -> CellIndex {
        let mut root = cell;
        while let Some(parent) = self.cells[root.0].parent() {
            root = parent;
        }

        let mut current = cell;
        while let Some(parent) = self.cells[current.0].parent() {
            if parent != root {
                self.cells[current.0].set_parent(root);
            }
            current = parent;
        }

        root
    }

    /// Merge the sets containing `a` and `b`, union by rank.
    ///
    /// The root with the lower rank goes under the root with the higher rank. On a tie the root of
    /// `a` becomes the parent and its rank goes up by one. Nothing changes when `a` and `b` are
    /// already in the same set.
    pub fn union(&mut self, a: CellIndex, b: CellIndex) {
        let mut a_root = self.find(a);
        let mut b_root = self.find(b);
        if a_root == b_root {
            return;
        }

        if self.rank(a_root) < self.rank(b_root) {
            mem::swap(&mut a_root, &mut b_root);
        }
        let equal_ranks = self.rank(a_root) == self.rank(b_root);

        self.cells[b_root.0].set_parent(a_root);
        if equal_ranks {
            self.cells[a_root.0].bump_rank();
        }
        self.sets_count -= 1;

        trace!(root = %a_root, absorbed = %b_root, rank = self.rank(a_root), "merged sets");
    }

    #[inline]
    pub fn same_set(&mut self, a: CellIndex, b: CellIndex) -> bool {
        self.find(a) == self.find(b)
    }

    /// Group every cell under its representative.
    pub fn components(&mut self) -> FnvHashMap<CellIndex, Vec<CellIndex>> {
        let mut groups = utils::fnv_hashmap(self.sets_count);
        for i in 0..self.cells.len() {
            let root = self.find(CellIndex(i));
            groups.entry(root).or_insert_with(Vec::new).push(CellIndex(i));
        }
        groups
    }
}
