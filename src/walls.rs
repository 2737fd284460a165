use std::fmt;

use tracing::trace;

use crate::cells::Cartesian2DCoordinate;
use crate::disjoint_set::DisjointSet;
use crate::grid::GridError;
use crate::units::{CellIndex, WallIndex};
use crate::utils::{self, FnvHashMap};

/// Display state of a wall. The orientation says which way the two cells sit relative to one
/// another: `Horizontal` for cells side by side on a row, `Vertical` for cells stacked in a column.
/// `Removed` is terminal.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallTag {
    Horizontal,
    Vertical,
    Removed,
}

impl WallTag {
    /// The orientation of a wall separating `a` and `b`, or `None` if they are not neighbours.
    pub fn between(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Option<WallTag> {
        if !a.is_adjacent(b) {
            None
        } else if a.y == b.y {
            Some(WallTag::Horizontal)
        } else {
            Some(WallTag::Vertical)
        }
    }

    #[inline]
    pub fn is_removed(self) -> bool {
        self == WallTag::Removed
    }
}

impl fmt::Display for WallTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            WallTag::Horizontal => "horizontal",
            WallTag::Vertical => "vertical",
            WallTag::Removed => "removed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Wall<H = ()> {
    a: CellIndex,
    b: CellIndex,
    tag: WallTag,
    handle: H,
}

impl<H> Wall<H> {
    #[inline]
    pub fn a(&self) -> CellIndex {
        self.a
    }

    #[inline]
    pub fn b(&self) -> CellIndex {
        self.b
    }

    #[inline]
    pub fn endpoints(&self) -> (CellIndex, CellIndex) {
        (self.a, self.b)
    }

    #[inline]
    pub fn tag(&self) -> WallTag {
        self.tag
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.tag.is_removed()
    }

    #[inline]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[inline]
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }
}

/// Registry of the candidate walls of one maze.
///
/// Walls only hold cell indices, the cells themselves belong to the `DisjointSet` passed in to
/// `add` and `try_remove`.
#[derive(Debug, Clone)]
pub struct Walls<H = ()> {
    walls: Vec<Wall<H>>,
    lookup: FnvHashMap<(CellIndex, CellIndex), WallIndex>,
    removed_count: usize,
}

impl<H> Default for Walls<H> {
    fn default() -> Walls<H> {
        Walls::with_capacity(0)
    }
}

impl<H> Walls<H> {
    pub fn new() -> Walls<H> {
        Walls::default()
    }

    pub fn with_capacity(capacity: usize) -> Walls<H> {
        Walls {
            walls: Vec::with_capacity(capacity),
            lookup: utils::fnv_hashmap(capacity),
            removed_count: 0,
        }
    }

    /// Register a wall between two cells of `sets`.
    ///
    /// The orientation comes from the cells' coordinates. Fails if the cells are the same, are
    /// not in `sets`, are not orthogonal neighbours or already have a wall between them.
    pub fn add<C>(&mut self,
                  sets: &DisjointSet<C>,
                  a: CellIndex,
                  b: CellIndex,
                  handle: H)
                  -> Result<WallIndex, GridError> {
        if a == b {
            return Err(GridError::SelfLink);
        }
        if a.0 >= sets.len() || b.0 >= sets.len() {
            return Err(GridError::InvalidGridCoordinate);
        }
        let tag = WallTag::between(sets.cell(a).coordinate(), sets.cell(b).coordinate())
            .ok_or(GridError::NotAdjacent)?;

        let key = lookup_key(a, b);
        if self.lookup.contains_key(&key) {
            return Err(GridError::DuplicateWall);
        }

        let index = WallIndex(self.walls.len());
        self.walls.push(Wall { a, b, tag, handle });
        self.lookup.insert(key, index);
        Ok(index)
    }

    /// Remove the wall if its cells are not yet connected, merging their sets.
    ///
    /// Returns false, leaving the wall untouched, when the cells already share a set: taking the
    /// wall down would open a loop. A removed wall is always rejected the second time around.
    pub fn try_remove<C>(&mut self, wall: WallIndex, sets: &mut DisjointSet<C>) -> bool {
        let (a, b) = self.walls[wall.0].endpoints();
        if sets.find(a) == sets.find(b) {
            trace!(%wall, %a, %b, "wall rejected");
            return false;
        }

        self.walls[wall.0].tag = WallTag::Removed;
        self.removed_count += 1;
        sets.union(a, b);
        trace!(%wall, %a, %b, "wall removed");
        true
    }

    /// The wall between two cells, whichever way round they are given.
    pub fn between(&self, a: CellIndex, b: CellIndex) -> Option<WallIndex> {
        self.lookup.get(&lookup_key(a, b)).cloned()
    }

    /// Panics if the index is out of range.
    #[inline]
    pub fn wall(&self, wall: WallIndex) -> &Wall<H> {
        &self.walls[wall.0]
    }

    #[inline]
    pub fn wall_mut(&mut self, wall: WallIndex) -> &mut Wall<H> {
        &mut self.walls[wall.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (WallIndex, &Wall<H>)> {
        self.walls.iter().enumerate().map(|(i, wall)| (WallIndex(i), wall))
    }

    pub fn indices(&self) -> impl Iterator<Item = WallIndex> {
        (0..self.walls.len()).map(WallIndex)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    #[inline]
    pub fn removed_count(&self) -> usize {
        self.removed_count
    }

    #[inline]
    pub fn intact_count(&self) -> usize {
        self.walls.len() - self.removed_count
    }
}

#[inline]
fn lookup_key(a: CellIndex, b: CellIndex) -> (CellIndex, CellIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {

    use super::*;

    // (0,0) (1,0)
    // (0,1) (1,1)
    fn square_of_four() -> DisjointSet<()> {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        DisjointSet::new(vec![(gc(0, 0), ()), (gc(1, 0), ()), (gc(0, 1), ()), (gc(1, 1), ())])
    }

    const TOP_LEFT: CellIndex = CellIndex(0);
    const TOP_RIGHT: CellIndex = CellIndex(1);
    const BOTTOM_LEFT: CellIndex = CellIndex(2);
    const BOTTOM_RIGHT: CellIndex = CellIndex(3);

    #[test]
    fn orientation_from_relative_position() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(WallTag::between(gc(0, 0), gc(1, 0)), Some(WallTag::Horizontal));
        assert_eq!(WallTag::between(gc(1, 0), gc(0, 0)), Some(WallTag::Horizontal));
        assert_eq!(WallTag::between(gc(0, 0), gc(0, 1)), Some(WallTag::Vertical));
        assert_eq!(WallTag::between(gc(5, 6), gc(5, 5)), Some(WallTag::Vertical));
        assert_eq!(WallTag::between(gc(0, 0), gc(1, 1)), None);
        assert_eq!(WallTag::between(gc(0, 0), gc(0, 0)), None);
    }

    #[test]
    fn tag_display() {
        assert_eq!(WallTag::Horizontal.to_string(), "horizontal");
        assert_eq!(WallTag::Vertical.to_string(), "vertical");
        assert_eq!(WallTag::Removed.to_string(), "removed");
        assert!(WallTag::Removed.is_removed());
        assert!(!WallTag::Vertical.is_removed());
    }

    #[test]
    fn adding_walls() {
        let sets = square_of_four();
        let mut walls = Walls::new();

        let top = walls.add(&sets, TOP_LEFT, TOP_RIGHT, "top").unwrap();
        let left = walls.add(&sets, BOTTOM_LEFT, TOP_LEFT, "left").unwrap();

        assert_eq!(walls.len(), 2);
        assert_eq!(walls.wall(top).tag(), WallTag::Horizontal);
        assert_eq!(walls.wall(left).tag(), WallTag::Vertical);
        assert_eq!(walls.wall(left).endpoints(), (BOTTOM_LEFT, TOP_LEFT));
        assert_eq!(*walls.wall(top).handle(), "top");

        assert_eq!(walls.between(TOP_RIGHT, TOP_LEFT), Some(top));
        assert_eq!(walls.between(TOP_LEFT, BOTTOM_LEFT), Some(left));
        assert_eq!(walls.between(TOP_LEFT, BOTTOM_RIGHT), None);
        assert_eq!(walls.indices().collect::<Vec<_>>(), vec![top, left]);
    }

    #[test]
    fn invalid_walls_are_refused() {
        let sets = square_of_four();
        let mut walls = Walls::new();

        assert_eq!(walls.add(&sets, TOP_LEFT, TOP_LEFT, ()), Err(GridError::SelfLink));
        assert_eq!(walls.add(&sets, TOP_LEFT, BOTTOM_RIGHT, ()), Err(GridError::NotAdjacent));
        assert_eq!(walls.add(&sets, TOP_LEFT, CellIndex(4), ()),
                   Err(GridError::InvalidGridCoordinate));

        walls.add(&sets, TOP_LEFT, TOP_RIGHT, ()).unwrap();
        assert_eq!(walls.add(&sets, TOP_RIGHT, TOP_LEFT, ()), Err(GridError::DuplicateWall));
        assert_eq!(walls.len(), 1);
    }

    #[test]
    fn removal_is_gated_by_set_membership() {
        let mut sets = square_of_four();
        let mut walls = Walls::new();
        let cycle = [(TOP_LEFT, TOP_RIGHT),
                     (TOP_RIGHT, BOTTOM_RIGHT),
                     (BOTTOM_RIGHT, BOTTOM_LEFT),
                     (BOTTOM_LEFT, TOP_LEFT)];
        let indices: Vec<WallIndex> = cycle.iter()
            .map(|&(a, b)| walls.add(&sets, a, b, ()).unwrap())
            .collect();

        let results: Vec<bool> = indices.iter().map(|&w| walls.try_remove(w, &mut sets)).collect();

        assert_eq!(results, vec![true, true, true, false]);
        assert_eq!(walls.removed_count(), 3);
        assert_eq!(walls.intact_count(), 1);
        assert_eq!(walls.wall(indices[3]).tag(), WallTag::Vertical);
        assert_eq!(sets.sets_count(), 1);
    }

    #[test]
    fn end_to_end_example() {
        let mut sets = square_of_four();
        let mut walls = Walls::new();
        let w1 = walls.add(&sets, TOP_LEFT, TOP_RIGHT, ()).unwrap();
        let w2 = walls.add(&sets, BOTTOM_LEFT, BOTTOM_RIGHT, ()).unwrap();
        let w3 = walls.add(&sets, TOP_LEFT, BOTTOM_LEFT, ()).unwrap();
        let w4 = walls.add(&sets, TOP_RIGHT, BOTTOM_RIGHT, ()).unwrap();
        assert_eq!(walls.wall(w1).tag(), WallTag::Horizontal);
        assert_eq!(walls.wall(w2).tag(), WallTag::Horizontal);
        assert_eq!(walls.wall(w3).tag(), WallTag::Vertical);
        assert_eq!(walls.wall(w4).tag(), WallTag::Vertical);

        assert!(walls.try_remove(w1, &mut sets));
        assert!(walls.try_remove(w3, &mut sets));
        assert!(walls.try_remove(w2, &mut sets));
        assert!(!walls.try_remove(w4, &mut sets));

        assert!(walls.wall(w1).is_removed());
        assert!(walls.wall(w2).is_removed());
        assert!(walls.wall(w3).is_removed());
        assert_eq!(walls.wall(w4).tag(), WallTag::Vertical);

        let root = sets.find(TOP_LEFT);
        for c in &[TOP_RIGHT, BOTTOM_LEFT, BOTTOM_RIGHT] {
            assert_eq!(sets.find(*c), root);
        }
    }

    #[test]
    fn removed_wall_stays_removed() {
        let mut sets = square_of_four();
        let mut walls = Walls::new();
        let w = walls.add(&sets, TOP_LEFT, TOP_RIGHT, ()).unwrap();

        assert!(walls.try_remove(w, &mut sets));
        assert!(!walls.try_remove(w, &mut sets));
        assert_eq!(walls.wall(w).tag(), WallTag::Removed);
        assert_eq!(walls.removed_count(), 1);
    }

    #[test]
    fn rejection_leaves_the_forest_alone() {
        let mut sets = square_of_four();
        let mut walls = Walls::new();
        let top = walls.add(&sets, TOP_LEFT, TOP_RIGHT, ()).unwrap();
        let bottom = walls.add(&sets, BOTTOM_LEFT, BOTTOM_RIGHT, ()).unwrap();
        let left = walls.add(&sets, TOP_LEFT, BOTTOM_LEFT, ()).unwrap();
        let right = walls.add(&sets, TOP_RIGHT, BOTTOM_RIGHT, ()).unwrap();
        for w in &[top, bottom, left] {
            assert!(walls.try_remove(*w, &mut sets));
        }
        for i in 0..4 {
            let _ = sets.find(CellIndex(i));
        }
        let ranks: Vec<u32> = (0..4).map(|i| sets.rank(CellIndex(i))).collect();
        let parents: Vec<Option<CellIndex>> = (0..4).map(|i| sets.parent(CellIndex(i))).collect();

        assert!(!walls.try_remove(right, &mut sets));

        assert_eq!(ranks, (0..4).map(|i| sets.rank(CellIndex(i))).collect::<Vec<_>>());
        assert_eq!(parents, (0..4).map(|i| sets.parent(CellIndex(i))).collect::<Vec<_>>());
    }

    #[test]
    fn wall_handle_pass_through() {
        let sets = square_of_four();
        let mut walls = Walls::new();
        let w = walls.add(&sets, TOP_LEFT, TOP_RIGHT, vec![1u8]).unwrap();
        walls.wall_mut(w).handle_mut().push(2);
        assert_eq!(walls.wall(w).handle(), &vec![1u8, 2]);
    }
}
