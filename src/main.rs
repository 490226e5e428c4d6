use docopt::Docopt;
use serde_derive::Deserialize;

use mazery::{
    agents::{self, RunOutcome, RunStats},
    cells::GridCoordinate,
    generators, pathing, render,
    tremaux::{tremaux_step_limit, TremauxSolver},
    units::{Height, Width},
};

use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "Mazery

Usage:
    mazery_driver -h | --help
    mazery_driver generate [--grid-width=<w> --grid-height=<h>] [--seed=<n>] [--text-out=<path>]
    mazery_driver solve (astar|tremaux) [--grid-width=<w> --grid-height=<h>] [--seed=<n>] [--step-limit=<n>] [--start-x=<x> --start-y=<y>] [--end-x=<x> --end-y=<y>|--furthest-end] [--show-path] [--text-out=<path>]

Options:
    -h --help          Show this screen.
    --grid-width=<w>   The grid width in a w*h grid [default: 10].
    --grid-height=<h>  The grid height in a w*h grid [default: 10].
    --seed=<n>         Seed for maze generation and the tremaux walker [default: 0].
    --step-limit=<n>   Maximum tremaux steps before giving up. Defaults to 2*(w*h-1).
    --start-x=<x>      x coordinate of the solve start [default: 0].
    --start-y=<y>      y coordinate of the solve start [default: 0].
    --end-x=<x>        x coordinate of the solve goal. Defaults to the far corner.
    --end-y=<y>        y coordinate of the solve goal. Defaults to the far corner.
    --furthest-end     Use the cell furthest from the start as the goal.
    --show-path        Render the maze with the shortest start-goal path marked.
    --text-out=<path>  Output file path for the textual rendering of the maze.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_generate: bool,
    cmd_solve: bool,
    cmd_astar: bool,
    cmd_tremaux: bool,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: u64,
    flag_step_limit: Option<usize>,
    flag_start_x: u32,
    flag_start_y: u32,
    flag_end_x: Option<u32>,
    flag_end_y: Option<u32>,
    flag_furthest_end: bool,
    flag_show_path: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazery::errors::Error, ::mazery::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let width = Width(args.flag_grid_width);
    let height = Height(args.flag_grid_height);
    let maze_grid = generators::ellers(width, height, args.flag_seed)?;

    if args.cmd_solve {
        let start = GridCoordinate::new(args.flag_start_x, args.flag_start_y);
        let goal = if args.flag_furthest_end {
            pathing::Distances::new(&maze_grid, start)?.furthest_point()
        } else {
            // The x axis is bounded by the grid height, y by the width.
            GridCoordinate::new(
                args.flag_end_x.unwrap_or(height.0 as u32 - 1),
                args.flag_end_y.unwrap_or(width.0 as u32 - 1),
            )
        };

        let mut stats = RunStats::default();
        let outcome = if args.cmd_astar {
            agents::drive_astar(&maze_grid, start, goal, &mut stats)?
        } else {
            let limit = args
                .flag_step_limit
                .unwrap_or_else(|| tremaux_step_limit(&maze_grid));
            let mut solver = TremauxSolver::new(args.flag_seed);
            agents::drive_tremaux(&maze_grid, &mut solver, start, goal, limit, &mut stats)?
        };

        let solver_name = if args.cmd_astar { "astar" } else { "tremaux" };
        match outcome {
            RunOutcome::Success => {
                println!("{}: reached {} in {} steps", solver_name, goal, stats.steps)
            }
            RunOutcome::Dnf => println!("{}: did not finish after {} steps", solver_name, stats.steps),
            RunOutcome::Aborted => println!("{}: aborted after {} steps", solver_name, stats.steps),
        }

        let rendered = if args.flag_show_path && outcome == RunOutcome::Success {
            let path = pathing::find_path(&maze_grid, start, goal)
                .chain_err(|| "No shortest path to render despite a successful run")?;
            render::render_with_path(&maze_grid, &path)
        } else {
            render::render_plain(&maze_grid)
        };
        emit_rendering(&rendered, &args.flag_text_out)?;
    } else {
        // generate is the only other command docopt accepts
        debug_assert!(args.cmd_generate);
        emit_rendering(&render::render_plain(&maze_grid), &args.flag_text_out)?;
    }

    Ok(())
}

fn emit_rendering(rendered: &str, text_out: &str) -> Result<()> {
    if text_out.is_empty() {
        print!("{}", rendered);
    } else {
        write_text_to_file(rendered, text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", text_out))?;
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
