use std::convert::From;
use std::fmt;

use crate::units::CellIndex;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Are the two coordinates orthogonal neighbours (exactly one step apart on one axis)?
    pub fn is_adjacent(&self, other: Cartesian2DCoordinate) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx + dy == 1
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A node of the disjoint set forest, one per grid position.
///
/// `parent` is `None` while the cell is the representative of its own set. The `handle` is
/// whatever the caller wants to hang off the cell (a mesh, a sprite id...), it is never looked at.
#[derive(Debug, Clone)]
pub struct Cell<H = ()> {
    coord: Cartesian2DCoordinate,
    rank: u32,
    parent: Option<CellIndex>,
    handle: H,
}

impl<H> Cell<H> {
    pub fn new(coord: Cartesian2DCoordinate, handle: H) -> Cell<H> {
        Cell {
            coord,
            rank: 0,
            parent: None,
            handle,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[inline]
    pub fn parent(&self) -> Option<CellIndex> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[inline]
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    // Forest mutation stays inside the crate so the rank/parent invariants hold.
    #[inline]
    pub(crate) fn set_parent(&mut self, parent: CellIndex) {
        self.parent = Some(parent);
    }

    #[inline]
    pub(crate) fn bump_rank(&mut self) {
        self.rank += 1;
    }
}
