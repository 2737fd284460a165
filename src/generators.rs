use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::grid::MazeGrid;
use crate::units::WallIndex;

/// Tally of the walls a generator looked at.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationReport {
    /// Walls taken down.
    pub accepted: usize,
    /// Walls left standing because the cells either side were already connected.
    pub rejected: usize,
}

impl GenerationReport {
    #[inline]
    pub fn processed(&self) -> usize {
        self.accepted + self.rejected
    }

    #[inline]
    fn record(&mut self, removed: bool) {
        if removed {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

/// Offer every wall in `order` for removal, one after the other.
///
/// Nothing is skipped: walls offered after the grid is fully connected are all rejected.
pub fn remove_walls_in_order<CellHandle, WallHandle, I>(grid: &mut MazeGrid<CellHandle, WallHandle>,
                                                        order: I)
                                                        -> GenerationReport
    where I: IntoIterator<Item = WallIndex>
{
    let mut report = GenerationReport::default();
    for wall in order {
        let removed = grid.try_remove(wall);
        report.record(removed);
    }
    report
}

/// Apply the randomized Kruskal maze generation algorithm to a grid.
///
/// Every wall is a candidate edge of equal weight, so visiting them in a random order and keeping
/// only those that join two disconnected regions builds a random spanning tree over the cells: a
/// perfect maze, with exactly one route between any two cells.
/// Stops as soon as all the cells are connected.
pub fn kruskal<CellHandle, WallHandle, R>(grid: &mut MazeGrid<CellHandle, WallHandle>,
                                          rng: &mut R)
                                          -> GenerationReport
    where R: Rng + ?Sized
{
    kruskal_until(grid, rng, |g, _| g.is_fully_connected())
}

/// Randomized Kruskal that takes down at most `max_removals` walls, leaving a maze with
/// disconnected regions when the limit is hit early.
pub fn kruskal_with_limit<CellHandle, WallHandle, R>(grid: &mut MazeGrid<CellHandle, WallHandle>,
                                                     rng: &mut R,
                                                     max_removals: usize)
                                                     -> GenerationReport
    where R: Rng + ?Sized
{
    kruskal_until(grid, rng, |g, report| {
        g.is_fully_connected() || report.accepted >= max_removals
    })
}

/// Randomized Kruskal with a caller chosen stopping rule.
///
/// `stop` is asked before each wall is offered; generation ends when it answers true or the
/// walls run out.
pub fn kruskal_until<CellHandle, WallHandle, R, StopFn>(grid: &mut MazeGrid<CellHandle, WallHandle>,
                                                        rng: &mut R,
                                                        mut stop: StopFn)
                                                        -> GenerationReport
    where R: Rng + ?Sized,
          StopFn: FnMut(&MazeGrid<CellHandle, WallHandle>, &GenerationReport) -> bool
{
    let mut order = grid.wall_indices();
    order.shuffle(rng);
    debug!(walls = order.len(), components = grid.components_count(), "kruskal started");

    let mut report = GenerationReport::default();
    for wall in order {
        if stop(&*grid, &report) {
            break;
        }
        let removed = grid.try_remove(wall);
        report.record(removed);
    }

    debug!(accepted = report.accepted,
           rejected = report.rejected,
           components = grid.components_count(),
           "kruskal finished");
    report
}
