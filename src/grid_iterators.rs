use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::CellIndex;

/// Every coordinate of a grid in row-major order.
#[derive(Clone)]
pub struct RectGridCellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(dimensions: RectGridDimensions) -> RectGridCellIter {
        RectGridCellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for RectGridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_grid_coordinate(CellIndex(self.current_cell_number));
            self.current_cell_number += 1;
            coord
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum WallStep {
    East,
    South,
}

/// Every pair of orthogonally adjacent cells, each pair once.
///
/// Cells are visited in row-major order, yielding the pair with the eastern neighbour and then the
/// pair with the southern neighbour when those exist.
#[derive(Debug, Clone)]
pub struct WallCandidatesIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
    next_step: WallStep,
}

impl WallCandidatesIter {
    pub fn new(dimensions: RectGridDimensions) -> WallCandidatesIter {
        WallCandidatesIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
            next_step: WallStep::East,
        }
    }
}

impl Iterator for WallCandidatesIter {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.dimensions.row_length().0;
        let height = self.dimensions.column_length().0;

        while self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_grid_coordinate(CellIndex(self.current_cell_number))?;
            let (x, y) = (coord.x as usize, coord.y as usize);

            match self.next_step {
                WallStep::East => {
                    self.next_step = WallStep::South;
                    if x + 1 < width {
                        return Some((coord, Cartesian2DCoordinate::new(coord.x + 1, coord.y)));
                    }
                }
                WallStep::South => {
                    self.next_step = WallStep::East;
                    self.current_cell_number += 1;
                    if y + 1 < height {
                        return Some((coord, Cartesian2DCoordinate::new(coord.x, coord.y + 1)));
                    }
                }
            }
        }
        None
    }
}
