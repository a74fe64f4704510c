//! Integration tests for patrol-sim.

use patrol_core::{AgentState, Facing, Grid, PatrolConfig, PatrolMap, Position, parse_map};

use crate::{PatrolBuilder, PatrolObserver, PatrolSimulator};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The 10×10 reference map: 41 visited cells, 6 trapping placements.
const EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

/// Guard already circles a 2×2 block: up, right, down, left, forever.
const CORRIDOR: &str = "\
.#..
...#
#^..
..#.
";

/// Baseline exits to the left; an obstacle at (2, 0) closes the circuit.
const ONE_TRAP: &str = "\
.#..
...#
.^..
..#.
";

fn map(text: &str) -> PatrolMap {
    parse_map(text).expect("fixture parses")
}

fn sim(text: &str) -> PatrolSimulator {
    PatrolSimulator::from_map(map(text)).expect("fixture builds")
}

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// Records every callback in order.
#[derive(Default)]
struct Recorder {
    baseline:  Option<(usize, AgentState)>,
    snapshots: Vec<String>,
    started:   Vec<Position>,
    ended:     Vec<(Position, bool)>,
    found:     Option<usize>,
}

impl PatrolObserver for Recorder {
    fn on_baseline_end(&mut self, visited: usize, last: AgentState) {
        self.baseline = Some((visited, last));
    }
    fn on_snapshot(&mut self, grid: &Grid, agent: AgentState) {
        self.snapshots.push(grid.render(Some(agent)));
    }
    fn on_trial_start(&mut self, candidate: Position) {
        self.started.push(candidate);
    }
    fn on_trial_end(&mut self, candidate: Position, looped: bool) {
        self.ended.push((candidate, looped));
    }
    fn on_search_end(&mut self, found: usize) {
        self.found = Some(found);
    }
}

// ── Walker state machine ──────────────────────────────────────────────────────

#[cfg(test)]
mod walker_tests {
    use super::*;
    use crate::{ObstaclePlacement, SimError, Transition, VisitedSet, WalkOutcome, Walker};

    #[test]
    fn single_transitions() {
        let m = map(ONE_TRAP);
        let mut w = Walker::new(&m.grid, m.start);
        assert_eq!(w.step(), Transition::Advance);
        assert_eq!(w.state(), AgentState::new(pos(1, 1), Facing::Up));
        assert_eq!(w.step(), Transition::Rotate);
        assert_eq!(w.state(), AgentState::new(pos(1, 1), Facing::Right));
        assert_eq!(w.steps(), 2);
    }

    #[test]
    fn exit_leaves_state_unchanged() {
        let m = map("^\n");
        let mut w = Walker::new(&m.grid, m.start);
        assert_eq!(w.step(), Transition::Exit);
        assert_eq!(w.state(), m.start);
        assert_eq!(w.steps(), 0);
    }

    #[test]
    fn step_limit_is_four_per_cell() {
        assert_eq!(Walker::step_limit(&Grid::new(10, 10)), 400);
        assert_eq!(Walker::step_limit(&Grid::new(1, 1)), 4);
    }

    #[test]
    fn corridor_loops_within_bound() {
        let m = map(CORRIDOR);
        let outcome = Walker::new(&m.grid, m.start).detect_loop().unwrap();
        assert_eq!(
            outcome,
            WalkOutcome::Looped { repeated: m.start, steps: 8 },
        );
        assert!(outcome.steps() <= Walker::step_limit(&m.grid));
    }

    #[test]
    fn boxed_in_guard_spins_in_place() {
        let m = map(".#.\n#^#\n.#.\n");
        let outcome = Walker::new(&m.grid, m.start).detect_loop().unwrap();
        assert_eq!(outcome, WalkOutcome::Looped { repeated: m.start, steps: 4 });
    }

    #[test]
    fn trace_reports_trapped_baseline() {
        let m = map(CORRIDOR);
        let mut visited = VisitedSet::new();
        let err = Walker::new(&m.grid, m.start).trace(&mut visited).unwrap_err();
        assert!(matches!(err, SimError::BaselineLoops { limit: 64 }));
    }

    #[test]
    fn revisit_with_new_facing_is_not_a_loop() {
        // Crosses (2, 1) twice, facing up then left, and still exits.
        let m = map(ONE_TRAP);
        let outcome = Walker::new(&m.grid, m.start).detect_loop().unwrap();
        assert!(!outcome.is_loop());
        assert_eq!(
            outcome,
            WalkOutcome::Exited { last: AgentState::new(pos(2, 0), Facing::Left), steps: 8 },
        );
    }

    #[test]
    fn every_example_trial_within_bound() {
        let m = map(EXAMPLE);
        let limit = Walker::step_limit(&m.grid);
        let mut visited = VisitedSet::new();
        Walker::new(&m.grid, m.start).trace(&mut visited).unwrap();

        let mut grid = m.grid.clone();
        for p in visited.positions() {
            if p == m.start.position {
                continue;
            }
            let placed = ObstaclePlacement::new(&mut grid, p);
            let outcome = Walker::new(&placed, m.start).detect_loop().unwrap();
            assert!(outcome.steps() <= limit, "{p}: {} > {limit}", outcome.steps());
        }
        assert_eq!(grid, m.grid);
    }
}

// ── Scoped obstacle placement ─────────────────────────────────────────────────

#[cfg(test)]
mod placement_tests {
    use patrol_core::CellKind;

    use super::*;
    use crate::{ObstaclePlacement, SimError, SimResult};

    #[test]
    fn drop_restores_empty_cell() {
        let mut grid = Grid::new(3, 3);
        let original = grid.clone();
        {
            let placed = ObstaclePlacement::new(&mut grid, pos(1, 2));
            assert!(placed.is_obstacle(pos(1, 2)));
            assert_eq!(placed.position(), pos(1, 2));
        }
        assert_eq!(grid, original);
    }

    #[test]
    fn drop_restores_existing_obstacle() {
        let mut grid = Grid::new(2, 2);
        grid.set(pos(0, 0), CellKind::Obstacle);
        let original = grid.clone();
        drop(ObstaclePlacement::new(&mut grid, pos(0, 0)));
        assert_eq!(grid, original);
    }

    #[test]
    fn early_return_restores_grid() {
        fn failing_trial(grid: &mut Grid) -> SimResult<()> {
            let placed = ObstaclePlacement::new(grid, pos(0, 1));
            if placed.is_obstacle(pos(0, 1)) {
                return Err(SimError::StepLimitExceeded { limit: 0 });
            }
            Ok(())
        }

        let mut grid = Grid::new(2, 2);
        let original = grid.clone();
        assert!(failing_trial(&mut grid).is_err());
        assert_eq!(grid, original);
    }

    #[test]
    fn panic_restores_grid() {
        let mut grid = Grid::new(2, 2);
        let original = grid.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _placed = ObstaclePlacement::new(&mut grid, pos(1, 1));
            panic!("trial aborted");
        }));
        assert!(result.is_err());
        assert_eq!(grid, original);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use patrol_core::CellKind;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let m = map(EXAMPLE);
        let s = PatrolBuilder::new(m.grid, m.start).build().unwrap();
        assert_eq!(s.config, PatrolConfig::default());
        assert_eq!(s.agent(), s.start());
    }

    #[test]
    fn start_out_of_bounds_errors() {
        let start = AgentState::new(pos(3, 0), Facing::Up);
        let err = PatrolBuilder::new(Grid::new(3, 3), start).build().unwrap_err();
        assert!(matches!(err, SimError::StartOutOfBounds(p) if p == pos(3, 0)));
    }

    #[test]
    fn start_on_obstacle_errors() {
        let mut grid = Grid::new(3, 3);
        grid.set(pos(1, 1), CellKind::Obstacle);
        let start = AgentState::new(pos(1, 1), Facing::Up);
        let err = PatrolBuilder::new(grid, start).build().unwrap_err();
        assert!(matches!(err, SimError::StartOnObstacle(_)));
    }

    #[test]
    fn config_is_kept() {
        let m = map(EXAMPLE);
        let config = PatrolConfig { num_threads: Some(2), snapshots: true };
        let s = PatrolBuilder::new(m.grid, m.start).config(config.clone()).build().unwrap();
        assert_eq!(s.config, config);
    }
}

// ── Part 1: visited cells ─────────────────────────────────────────────────────

#[cfg(test)]
mod visited_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn example_visits_41_cells() {
        assert_eq!(sim(EXAMPLE).count_visited_cells().unwrap(), 41);
    }

    #[test]
    fn repeated_calls_agree() {
        let mut s = sim(EXAMPLE);
        let first = s.count_visited_cells().unwrap();
        let second = s.count_visited_cells().unwrap();
        assert_eq!(first, second);
        s.count_loop_inducing_obstacles().unwrap();
        assert_eq!(s.count_visited_cells().unwrap(), first);
    }

    #[test]
    fn guard_on_edge_facing_out_counts_start_only() {
        assert_eq!(sim("^").count_visited_cells().unwrap(), 1);
        assert_eq!(sim("..>\n...\n").count_visited_cells().unwrap(), 1);
    }

    #[test]
    fn wall_ahead_next_to_edge_counts_one() {
        // Blocked upwards; the turn faces the right edge, so the next attempt exits.
        let mut s = sim("#\n^\n");
        assert_eq!(s.count_visited_cells().unwrap(), 1);
        assert_eq!(s.agent(), AgentState::new(pos(1, 0), Facing::Right));
    }

    #[test]
    fn start_cell_always_counted() {
        for text in [EXAMPLE, ONE_TRAP, "^", "v..\n...\n"] {
            let mut s = sim(text);
            let visited = s.visited_positions().unwrap();
            assert!(visited.len() >= 1);
            assert!(visited.contains(s.start().position));
        }
    }

    #[test]
    fn first_facing_is_kept() {
        let mut s = sim(ONE_TRAP);
        let visited = s.visited_positions().unwrap();
        assert_eq!(visited.len(), 5);
        // (2, 1) is entered again facing left, but the start facing wins.
        assert_eq!(visited.first_facing(pos(2, 1)), Some(Facing::Up));
        assert_eq!(visited.first_facing(pos(2, 0)), Some(Facing::Left));
        assert_eq!(visited.first_facing(pos(0, 0)), None);
        assert_eq!(
            visited.positions(),
            vec![pos(1, 1), pos(1, 2), pos(2, 0), pos(2, 1), pos(2, 2)],
        );
    }

    #[test]
    fn trapped_baseline_errors_instead_of_hanging() {
        let err = sim(CORRIDOR).count_visited_cells().unwrap_err();
        assert!(matches!(err, SimError::BaselineLoops { .. }));
    }

    #[test]
    fn agent_left_at_exit_state() {
        let mut s = sim(ONE_TRAP);
        s.count_visited_cells().unwrap();
        assert_eq!(s.agent(), AgentState::new(pos(2, 0), Facing::Left));
    }
}

// ── Part 2: loop-inducing obstacles ───────────────────────────────────────────

#[cfg(test)]
mod obstacle_tests {
    use super::*;
    use crate::{NoopObserver, SimError};

    #[test]
    fn example_has_6_trapping_cells() {
        assert_eq!(sim(EXAMPLE).count_loop_inducing_obstacles().unwrap(), 6);
    }

    #[test]
    fn example_trapping_positions() {
        let found = sim(EXAMPLE).loop_inducing_obstacles(&mut NoopObserver).unwrap();
        assert_eq!(
            found,
            vec![pos(6, 3), pos(7, 6), pos(7, 7), pos(8, 1), pos(8, 3), pos(9, 7)],
        );
    }

    #[test]
    fn single_trap() {
        let found = sim(ONE_TRAP).loop_inducing_obstacles(&mut NoopObserver).unwrap();
        assert_eq!(found, vec![pos(2, 0)]);
    }

    #[test]
    fn straight_exit_has_no_candidates() {
        assert_eq!(sim("^").count_loop_inducing_obstacles().unwrap(), 0);
        assert_eq!(sim(">..#\n....\n").count_loop_inducing_obstacles().unwrap(), 0);
    }

    #[test]
    fn start_is_never_tried() {
        let mut s = sim(EXAMPLE);
        let mut rec = Recorder::default();
        s.count_loop_inducing_obstacles_observed(&mut rec).unwrap();
        assert!(!rec.started.contains(&s.start().position));
        assert_eq!(rec.started.len(), 40);
    }

    #[test]
    fn start_candidate_rejected() {
        let mut s = sim(EXAMPLE);
        let start = s.start().position;
        let err = s.loops_with_obstacle_at(start).unwrap_err();
        assert!(matches!(err, SimError::CandidateIsStart(p) if p == start));
    }

    #[test]
    fn out_of_grid_candidate_rejected() {
        let err = sim(EXAMPLE).loops_with_obstacle_at(pos(10, 0)).unwrap_err();
        assert!(matches!(err, SimError::CandidateOutOfBounds(_)));
    }

    #[test]
    fn trial_verdict_is_deterministic() {
        let mut s = sim(EXAMPLE);
        for p in [pos(6, 3), pos(1, 4), pos(9, 7), pos(5, 4)] {
            let a = s.loops_with_obstacle_at(p).unwrap();
            let b = s.loops_with_obstacle_at(p).unwrap();
            assert_eq!(a, b, "verdict changed for {p}");
        }
        assert!(s.loops_with_obstacle_at(pos(6, 3)).unwrap());
        assert!(!s.loops_with_obstacle_at(pos(1, 4)).unwrap());
    }

    #[test]
    fn grid_restored_after_search() {
        let m = map(EXAMPLE);
        let original = m.grid.clone();
        let mut s = PatrolSimulator::from_map(m).unwrap();
        s.count_loop_inducing_obstacles().unwrap();
        assert_eq!(*s.grid(), original);
        s.loops_with_obstacle_at(pos(6, 3)).unwrap();
        assert_eq!(*s.grid(), original);
    }

    #[test]
    fn trapped_baseline_propagates() {
        let err = sim(CORRIDOR).count_loop_inducing_obstacles().unwrap_err();
        assert!(matches!(err, SimError::BaselineLoops { .. }));
    }
}

// ── Loop detection on the unmodified grid ─────────────────────────────────────

#[cfg(test)]
mod detects_loop_tests {
    use super::*;

    #[test]
    fn corridor_is_a_loop() {
        let mut s = sim(CORRIDOR);
        assert!(s.detects_loop().unwrap());
        assert_eq!(s.agent(), s.start());
    }

    #[test]
    fn example_is_not_a_loop() {
        assert!(!sim(EXAMPLE).detects_loop().unwrap());
    }
}

// ── Reset, snapshot, report, observer ─────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::PatrolReport;

    #[test]
    fn run_reports_both_counts() {
        let report = sim(EXAMPLE).run(&mut crate::NoopObserver).unwrap();
        assert_eq!(report, PatrolReport { visited_cells: 41, loop_obstacles: 6 });
    }

    #[test]
    fn reset_restores_start_facing() {
        let mut s = sim(">..#\n....\n");
        assert_eq!(s.count_visited_cells().unwrap(), 4);
        assert_eq!(s.agent().facing, Facing::Down);
        s.reset();
        assert_eq!(s.agent(), AgentState::new(pos(0, 0), Facing::Right));
    }

    #[test]
    fn snapshot_draws_current_agent() {
        let mut s = sim(">..#\n....\n");
        assert_eq!(s.snapshot(), ">..#\n....\n");
        s.count_visited_cells().unwrap();
        assert_eq!(s.snapshot(), "...#\n..v.\n");
    }

    #[test]
    fn observer_sees_every_trial_in_order() {
        let mut s = sim(EXAMPLE);
        let mut rec = Recorder::default();
        let report = s.run(&mut rec).unwrap();

        let (visited, _) = rec.baseline.unwrap();
        assert_eq!(visited, report.visited_cells);
        assert_eq!(rec.started.len(), visited - 1);
        assert_eq!(rec.ended.len(), visited - 1);
        assert!(rec.started.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(rec.ended.iter().filter(|(_, looped)| *looped).count(), 6);
        assert_eq!(rec.found, Some(6));
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn snapshot_hook_only_when_enabled() {
        let m = map("#\n^\n");
        let mut s = PatrolBuilder::new(m.grid, m.start)
            .config(PatrolConfig::with_snapshots())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        s.count_visited_cells_observed(&mut rec).unwrap();
        assert_eq!(rec.snapshots, vec!["#\n>\n".to_string()]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_pool_respects_thread_count() {
        let m = map(EXAMPLE);
        let mut s = PatrolBuilder::new(m.grid, m.start)
            .config(PatrolConfig { num_threads: Some(2), snapshots: false })
            .build()
            .unwrap();
        assert_eq!(s.count_loop_inducing_obstacles().unwrap(), 6);
        assert_eq!(s.agent(), s.start());
    }
}
