//! Driving solvers end to end.
//!
//! A drive function owns the run loop for one solver and reports how the
//! run ended. Observation is pushed through the [`StepRecorder`] trait so
//! callers decide what happens per step (stats, tracing, nothing at all)
//! and can cancel a run cooperatively. The drivers never panic on a
//! failed run; anything short of reaching the goal is a reported outcome.

use crate::cells::GridCoordinate;
use crate::errors::{Error, ErrorKind, Result};
use crate::grid::Grid;
use crate::pathing;
use crate::tremaux::TremauxSolver;

/// How a drive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The goal cell was reached.
    Success,
    /// The run stopped without reaching the goal (no path, stuck walker
    /// or step limit exhausted).
    Dnf,
    /// The recorder asked for the run to stop.
    Aborted,
}

/// Per-step observer for a drive.
///
/// All methods have no-op defaults so a recorder implements only what it
/// cares about. `should_abort` is polled before every step.
pub trait StepRecorder {
    fn record_step(&mut self, _position: GridCoordinate) {}
    fn finalize(&mut self, _outcome: RunOutcome) {}
    fn should_abort(&self) -> bool {
        false
    }
}

/// Recorder that observes nothing.
pub struct NullRecorder;

impl StepRecorder for NullRecorder {}

/// Recorder that counts steps and remembers the final outcome.
#[derive(Debug, Default)]
pub struct RunStats {
    pub steps: usize,
    pub outcome: Option<RunOutcome>,
}

impl StepRecorder for RunStats {
    fn record_step(&mut self, _position: GridCoordinate) {
        self.steps += 1;
    }

    fn finalize(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
    }
}

/// Walk a Trémaux solver from `origin` until it reaches `goal`, gets
/// stuck, exhausts `step_limit` steps or the recorder aborts.
///
/// The solver is restarted, so its marks never carry over from an earlier
/// run. A `Stuck` walker is a `Dnf`, not an error; errors are reserved
/// for invalid inputs such as an out of bounds origin or goal.
pub fn drive_tremaux<R: StepRecorder>(
    grid: &Grid,
    solver: &mut TremauxSolver,
    origin: GridCoordinate,
    goal: GridCoordinate,
    step_limit: usize,
    recorder: &mut R,
) -> Result<RunOutcome> {
    if !grid.is_valid_coordinate(goal) {
        return Err(ErrorKind::OutOfBounds(goal.x, goal.y).into());
    }
    solver.start(grid, origin)?;

    let mut steps_taken = 0;
    let outcome = loop {
        if solver.current() == goal {
            break RunOutcome::Success;
        }
        if recorder.should_abort() {
            break RunOutcome::Aborted;
        }
        if steps_taken == step_limit {
            break RunOutcome::Dnf;
        }
        match solver.next_step(grid) {
            Ok(position) => {
                recorder.record_step(position);
                steps_taken += 1;
            }
            Err(Error(ErrorKind::Stuck(..), _)) => break RunOutcome::Dnf,
            Err(error) => return Err(error),
        }
    };

    recorder.finalize(outcome);
    Ok(outcome)
}

/// Solve with A* and replay the found path through the recorder.
///
/// `NotFound` maps to `Dnf`; the abort poll runs between replayed steps
/// so a recorder can cut a replay short exactly as it can a live walk.
pub fn drive_astar<R: StepRecorder>(
    grid: &Grid,
    start: GridCoordinate,
    goal: GridCoordinate,
    recorder: &mut R,
) -> Result<RunOutcome> {
    let path = match pathing::find_path(grid, start, goal) {
        Ok(path) => path,
        Err(error) => match *error.kind() {
            ErrorKind::NotFound => {
                recorder.finalize(RunOutcome::Dnf);
                return Ok(RunOutcome::Dnf);
            }
            _ => return Err(error),
        },
    };

    let outcome = replay_path(&path, recorder);
    recorder.finalize(outcome);
    Ok(outcome)
}

fn replay_path<R: StepRecorder>(path: &[GridCoordinate], recorder: &mut R) -> RunOutcome {
    // The start cell is where the agent already stands, not a step.
    for &position in &path[1..] {
        if recorder.should_abort() {
            return RunOutcome::Aborted;
        }
        recorder.record_step(position);
    }
    RunOutcome::Success
}
