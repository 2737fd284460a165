//! **kruskal_mazes** generates perfect mazes with a union-find over the cells of a grid.
//!
//! Every cell starts in a set of its own. A wall between two neighbouring cells may only come
//! down while those cells are in different sets, after which the sets are merged. Offering the
//! walls in a random order (randomized Kruskal) ends in a spanning tree: one route between any
//! two cells.
//!
//! Cells and walls carry an opaque handle each so a renderer can attach whatever it draws with
//! and hide walls once their tag says `Removed`.

pub mod cells;
pub mod disjoint_set;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_iterators;
pub mod units;
pub mod walls;
mod utils;
