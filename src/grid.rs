use std::error;
use std::fmt;

use petgraph::graph::{self, IndexType};
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{Cartesian2DCoordinate, Cell};
use crate::disjoint_set::DisjointSet;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{RectGridCellIter, WallCandidatesIter};
use crate::units::{CellIndex, EdgesCount, NodesCount, WallIndex};
use crate::walls::{Wall, WallTag, Walls};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    EmptyDimensions,
    TooManyCells,
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
    DuplicateWall,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            GridError::EmptyDimensions => "grid width and height must be non zero",
            GridError::TooManyCells => "grid dimensions are too large",
            GridError::InvalidGridCoordinate => "coordinate is outside the grid",
            GridError::SelfLink => "a wall cannot separate a cell from itself",
            GridError::NotAdjacent => "wall endpoints are not neighbouring cells",
            GridError::DuplicateWall => "a wall already separates these cells",
        };
        f.write_str(msg)
    }
}

impl error::Error for GridError {}

/// One maze: a rectangle of cells, the disjoint sets they are partitioned into and the walls
/// between every pair of neighbours.
///
/// `CellHandle` and `WallHandle` are opaque payloads for whoever draws the maze.
#[derive(Clone)]
pub struct MazeGrid<CellHandle = (), WallHandle = ()> {
    dimensions: RectGridDimensions,
    sets: DisjointSet<CellHandle>,
    walls: Walls<WallHandle>,
}

impl<CellHandle, WallHandle> fmt::Debug for MazeGrid<CellHandle, WallHandle> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: dimensions: {:?}, sets: {:?}, walls: {:?}, removed: {:?}",
               self.dimensions, self.sets.sets_count(), self.walls.len(), self.walls.removed_count())
    }
}

impl MazeGrid {
    /// A grid with every wall standing and no display handles.
    pub fn new(dimensions: RectGridDimensions) -> MazeGrid {
        MazeGrid::with_handles(dimensions, |_| (), |_, _, _| ())
    }
}

impl<CellHandle, WallHandle> MazeGrid<CellHandle, WallHandle> {

    /// A grid with every wall standing, asking the caller for a handle for each cell and wall.
    ///
    /// Cells are created in row-major order, then walls in the order of `WallCandidatesIter`.
    pub fn with_handles<CellFn, WallFn>(dimensions: RectGridDimensions,
                                        mut cell_handle: CellFn,
                                        mut wall_handle: WallFn)
                                        -> MazeGrid<CellHandle, WallHandle>
        where CellFn: FnMut(Cartesian2DCoordinate) -> CellHandle,
              WallFn: FnMut(Cartesian2DCoordinate, Cartesian2DCoordinate, WallTag) -> WallHandle
    {
        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();

        let sets = DisjointSet::new(RectGridCellIter::new(dimensions)
            .map(|coord| (coord, cell_handle(coord))));
        let mut walls = Walls::with_capacity(edges);

        for (a, b) in WallCandidatesIter::new(dimensions) {
            let (a_index, b_index) = match (dimensions.grid_coordinate_to_index(a),
                                            dimensions.grid_coordinate_to_index(b)) {
                (Some(a_index), Some(b_index)) => (a_index, b_index),
                _ => continue,
            };
            if let Some(tag) = WallTag::between(a, b) {
                // Candidates are distinct neighbours inside the grid, so registration cannot fail
                let _ = walls.add(&sets, a_index, b_index, wall_handle(a, b, tag));
            }
        }

        debug!(cells = nodes, walls = walls.len(), "built maze grid");

        MazeGrid {
            dimensions,
            sets,
            walls,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn sets(&self) -> &DisjointSet<CellHandle> {
        &self.sets
    }

    #[inline]
    pub fn walls(&self) -> &Walls<WallHandle> {
        &self.walls
    }

    #[inline]
    pub fn walls_count(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn removed_walls_count(&self) -> usize {
        self.walls.removed_count()
    }

    #[inline]
    pub fn components_count(&self) -> usize {
        self.sets.sets_count()
    }

    /// Has every cell been joined into one set, i.e. do the removed walls form a spanning tree?
    #[inline]
    pub fn is_fully_connected(&self) -> bool {
        self.sets.sets_count() == 1
    }

    #[inline]
    pub fn cell_index(&self, coord: Cartesian2DCoordinate) -> Option<CellIndex> {
        self.dimensions.grid_coordinate_to_index(coord)
    }

    /// Panics if the index is out of range.
    #[inline]
    pub fn cell(&self, cell: CellIndex) -> &Cell<CellHandle> {
        self.sets.cell(cell)
    }

    #[inline]
    pub fn cell_handle_mut(&mut self, cell: CellIndex) -> &mut CellHandle {
        self.sets.cell_mut(cell).handle_mut()
    }

    /// Panics if the index is out of range.
    #[inline]
    pub fn wall(&self, wall: WallIndex) -> &Wall<WallHandle> {
        self.walls.wall(wall)
    }

    #[inline]
    pub fn wall_handle_mut(&mut self, wall: WallIndex) -> &mut WallHandle {
        self.walls.wall_mut(wall).handle_mut()
    }

    /// The wall separating two cells, if they are neighbours in this grid.
    pub fn wall_between(&self,
                        a: Cartesian2DCoordinate,
                        b: Cartesian2DCoordinate)
                        -> Option<WallIndex> {
        match (self.cell_index(a), self.cell_index(b)) {
            (Some(a_index), Some(b_index)) => self.walls.between(a_index, b_index),
            _ => None,
        }
    }

    /// Endpoint coordinates of a wall.
    pub fn wall_coordinates(&self, wall: WallIndex) -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
        let (a, b) = self.walls.wall(wall).endpoints();
        (self.sets.cell(a).coordinate(), self.sets.cell(b).coordinate())
    }

    #[inline]
    pub fn find(&mut self, cell: CellIndex) -> CellIndex {
        self.sets.find(cell)
    }

    #[inline]
    pub fn union(&mut self, a: CellIndex, b: CellIndex) {
        self.sets.union(a, b)
    }

    /// Take a wall down if the cells either side are not already connected.
    #[inline]
    pub fn try_remove(&mut self, wall: WallIndex) -> bool {
        self.walls.try_remove(wall, &mut self.sets)
    }

    /// Is there a passage (through removed walls) between two cells?
    /// Returns an error if either coordinate is outside the grid.
    pub fn is_connected(&mut self,
                        a: Cartesian2DCoordinate,
                        b: Cartesian2DCoordinate)
                        -> Result<bool, GridError> {
        match (self.cell_index(a), self.cell_index(b)) {
            (Some(a_index), Some(b_index)) => Ok(self.sets.same_set(a_index, b_index)),
            _ => Err(GridError::InvalidGridCoordinate),
        }
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.dimensions)
    }

    pub fn iter_walls(&self) -> impl Iterator<Item = (WallIndex, &Wall<WallHandle>)> {
        self.walls.iter()
    }

    pub fn wall_indices(&self) -> Vec<WallIndex> {
        self.walls.indices().collect()
    }

    /// Cells to the North, South, East or West of a cell, whether or not a wall is standing
    /// between them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        if !self.dimensions.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        let (x, y) = (coord.x, coord.y);
        let candidates = [y.checked_sub(1).map(|north| Cartesian2DCoordinate::new(x, north)),
                          y.checked_add(1).map(|south| Cartesian2DCoordinate::new(x, south)),
                          x.checked_add(1).map(|east| Cartesian2DCoordinate::new(east, y)),
                          x.checked_sub(1).map(|west| Cartesian2DCoordinate::new(west, y))];
        candidates.iter()
            .filter_map(|c| *c)
            .filter(|c| self.dimensions.is_valid_coordinate(*c))
            .collect()
    }

    /// Neighbouring cells reachable through a removed wall.
    pub fn passages(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour| {
                self.wall_between(coord, *neighbour)
                    .map_or(false, |wall| self.walls.wall(wall).is_removed())
            })
            .collect()
    }

    /// The maze as an undirected graph: one node per cell in row-major order, one edge per
    /// removed wall.
    pub fn passage_graph<GridIndexType: IndexType>(&self) -> Graph<(), (), Undirected, GridIndexType> {
        let mut graph = Graph::with_capacity(self.size(), self.walls.removed_count());
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for (_, wall) in self.walls.iter().filter(|&(_, wall)| wall.is_removed()) {
            let (a, b) = wall.endpoints();
            let _ = graph.add_edge(graph::NodeIndex::<GridIndexType>::new(a.0),
                                   graph::NodeIndex::<GridIndexType>::new(b.0),
                                   ());
        }
        graph
    }
}
