use std::u32;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::GridError;
use crate::units::{CellIndex, ColumnLength, EdgesCount, NodesCount, RowLength};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    /// A `row_width` * `column_height` rectangle of cells.
    ///
    /// Both sides must be non zero and every coordinate must fit in a u32.
    pub fn new(row_width: RowLength,
               column_height: ColumnLength)
               -> Result<RectGridDimensions, GridError> {

        let (RowLength(width), ColumnLength(height)) = (row_width, column_height);
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions);
        }
        if width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(GridError::TooManyCells);
        }
        // The wall count is just under twice the cell count
        width.checked_mul(height)
            .and_then(|cells| cells.checked_mul(2))
            .ok_or(GridError::TooManyCells)?;

        Ok(RectGridDimensions {
            row_width,
            column_height,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Cells count and the exact count of walls between orthogonal neighbours.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.row_width.0, self.column_height.0);
        let walls_count = w * (h - 1) + h * (w - 1);
        (self.size(), EdgesCount(walls_count))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0...size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<CellIndex> {
        if self.is_valid_coordinate(coord) {
            Some(CellIndex((coord.y as usize * self.row_width.0) + coord.x as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: CellIndex) -> Option<Cartesian2DCoordinate> {
        if index.0 < self.size().0 {
            let RowLength(width) = self.row_width;
            Some(Cartesian2DCoordinate::new((index.0 % width) as u32, (index.0 / width) as u32))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dims(w: usize, h: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowLength(w), ColumnLength(h)).expect("valid dimensions")
    }

    #[test]
    fn empty_dimensions_are_refused() {
        assert_eq!(RectGridDimensions::new(RowLength(0), ColumnLength(3)),
                   Err(GridError::EmptyDimensions));
        assert_eq!(RectGridDimensions::new(RowLength(3), ColumnLength(0)),
                   Err(GridError::EmptyDimensions));
    }

    #[test]
    fn oversized_dimensions_are_refused() {
        assert_eq!(RectGridDimensions::new(RowLength(usize::MAX), ColumnLength(1)),
                   Err(GridError::TooManyCells));
        assert_eq!(RectGridDimensions::new(RowLength(2), ColumnLength(usize::MAX)),
                   Err(GridError::TooManyCells));
    }

    #[test]
    fn size_and_walls_count() {
        let d = dims(3, 2);
        assert_eq!(d.size(), NodesCount(6));
        // 2 rows of 2 horizontal walls + 3 columns of 1 vertical wall
        assert_eq!(d.graph_size(), (NodesCount(6), EdgesCount(7)));
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
        assert_eq!(dims(10, 10).graph_size().1, EdgesCount(180));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let d = dims(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = [gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                      gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<CellIndex>> = coords.iter()
            .map(|coord| d.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(|n| Some(CellIndex(n))).collect::<Vec<_>>();
        assert_eq!(expected, indices);

        assert_eq!(d.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn index_as_grid_coordinate() {
        let d = dims(4, 2);
        assert_eq!(d.index_to_grid_coordinate(CellIndex(0)), Some(Cartesian2DCoordinate::new(0, 0)));
        assert_eq!(d.index_to_grid_coordinate(CellIndex(5)), Some(Cartesian2DCoordinate::new(1, 1)));
        assert_eq!(d.index_to_grid_coordinate(CellIndex(8)), None);
    }
}
