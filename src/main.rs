use docopt::Docopt;
use itertools::Itertools;
use kruskal_mazes::{
    generators,
    grid::MazeGrid,
    grid_dimensions::RectGridDimensions,
    units,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Kruskal mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--max-removals=<n>] [--list-walls] [-v | --verbose]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed the wall shuffle so the same maze comes out every time.
    --max-removals=<n>     Stop after taking down n walls, even if the maze is not fully connected.
    --list-walls           Print every wall with its endpoints and whether it is still standing.
    -v --verbose           Debug level logging. RUST_LOG overrides this.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_max_removals: Option<usize>,
    flag_list_walls: bool,
    flag_verbose: bool,
}

// Other modules in this crate `use errors::*;` to get access to everything `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Grid(::kruskal_mazes::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    init_logging(args.flag_verbose);

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let dimensions = RectGridDimensions::new(units::RowLength(width), units::ColumnLength(height))
        .chain_err(|| format!("Cannot build a {}x{} grid", width, height))?;
    let mut maze_grid = MazeGrid::new(dimensions);

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = match args.flag_max_removals {
        Some(max_removals) => generators::kruskal_with_limit(&mut maze_grid, &mut rng, max_removals),
        None => generators::kruskal(&mut maze_grid, &mut rng),
    };
    tracing::info!(accepted = report.accepted, rejected = report.rejected, "maze generated");

    println!("{}", summary(&maze_grid, width, height));

    if args.flag_list_walls {
        println!("{}", wall_listing(&maze_grid));
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn summary(maze_grid: &MazeGrid, width: usize, height: usize) -> String {
    format!("grid {}x{}: {} walls removed, {} standing, {} component(s)",
            width,
            height,
            maze_grid.removed_walls_count(),
            maze_grid.walls_count() - maze_grid.removed_walls_count(),
            maze_grid.components_count())
}

fn wall_listing(maze_grid: &MazeGrid) -> String {
    maze_grid.iter_walls()
        .map(|(index, wall)| {
            let (a, b) = maze_grid.wall_coordinates(index);
            format!("{} {}-{} {}", index, a, b, wall.tag())
        })
        .join("\n")
}
