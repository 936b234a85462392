use std::time::{Duration, Instant};

use crate::{
    app::ticker::Ticker,
    config::VisualizationConfig,
    maze::{Coord, Maze, grid::GridEvent},
    solvers::{Search, SearchObserver, Solver},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Expanding one frontier node per tick
    Searching,
    /// Highlighting one cell of the found path per tick
    Tracing,
    Finished,
}

/// One solve run played back at a steady cadence.
pub struct SolveSession {
    search: Search,
    ticker: Ticker,
    phase: Phase,
    /// Path cells left to trace, start first and end excluded; the last one is traced next
    route: Vec<Coord>,
    draw_delay: Duration,
    paused: bool,
}

impl SolveSession {
    /// Clears any previous run from the maze and starts a new search on it.
    pub fn start(
        maze: &mut Maze,
        solver: Solver,
        config: &VisualizationConfig,
        now: Instant,
    ) -> Self {
        maze.reload();
        tracing::info!(%solver, "Starting solve");
        SolveSession {
            search: Search::new(maze, solver),
            ticker: Ticker::new(config.step_delay(), now),
            phase: Phase::Searching,
            route: Vec::new(),
            draw_delay: config.draw_delay,
            paused: false,
        }
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Whether the end was found. Only meaningful once the search has ended.
    pub fn found_path(&self) -> bool {
        self.search.final_cell().is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.search.set_paused(paused);
        if !paused {
            self.ticker.rearm(self.ticker.interval(), now);
        }
        tracing::debug!(paused, "Toggled pause");
    }

    /// Applies a new step delay from the next tick on. The search itself is left as is.
    pub fn set_step_delay(&mut self, delay: Duration, now: Instant) {
        if self.phase == Phase::Searching {
            self.ticker.rearm(delay, now);
        }
    }

    /// Time until the next tick, `None` when nothing is scheduled.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Finished => None,
            _ if self.paused => None,
            _ => Some(self.ticker.time_until_due(now)),
        }
    }

    /// Runs the tick that is due, if any. Returns whether anything happened.
    pub fn tick<O: SearchObserver + ?Sized>(
        &mut self,
        maze: &mut Maze,
        observer: &mut O,
        now: Instant,
    ) -> bool {
        if self.paused || self.is_finished() || !self.ticker.is_due(now) {
            return false;
        }
        self.ticker.advance(now);

        match self.phase {
            Phase::Searching => {
                self.search.step(maze, observer);
                if self.search.search_ended() {
                    self.begin_tracing(now);
                }
            }
            Phase::Tracing => {
                if let Some(coord) = self.route.pop() {
                    // Endpoints keep their own markers
                    if maze.start() != Some(coord) {
                        maze.emit(GridEvent::Route { coord });
                    }
                    observer.discovered(coord);
                    observer.step_finished(maze);
                }
                if self.route.is_empty() {
                    self.phase = Phase::Finished;
                }
            }
            Phase::Finished => {}
        }
        true
    }

    fn begin_tracing(&mut self, now: Instant) {
        let Some(path) = self.search.path() else {
            tracing::info!(
                solver = %self.search.solver(),
                steps = self.search.steps(),
                "Could not find end"
            );
            self.phase = Phase::Finished;
            return;
        };
        tracing::info!(
            solver = %self.search.solver(),
            steps = self.search.steps(),
            length = path.len().saturating_sub(1),
            "Found end"
        );
        // The end was announced when it was discovered. A start lying on the end is traced once.
        let traced = path.len().saturating_sub(1).max(1);
        self.route = path[..traced].to_vec();
        self.phase = Phase::Tracing;
        self.ticker.rearm(self.draw_delay, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeCell;

    const STEP: Duration = Duration::from_millis(100);
    const DRAW: Duration = Duration::from_millis(50);

    fn config() -> VisualizationConfig {
        VisualizationConfig::default()
    }

    #[test]
    fn test_ticks_follow_cadence() {
        let mut maze = Maze::from_rows(&["S...E"]);
        let t0 = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::Bfs, &config(), t0);

        assert!(!session.tick(&mut maze, &mut |_: Coord| {}, t0));
        assert_eq!(session.search().steps(), 0);
        assert!(session.tick(&mut maze, &mut |_: Coord| {}, t0 + STEP));
        assert_eq!(session.search().steps(), 1);
        // Same instant again: the tick was consumed
        assert!(!session.tick(&mut maze, &mut |_: Coord| {}, t0 + STEP));
        assert_eq!(session.search().steps(), 1);
    }

    #[test]
    fn test_full_run_traces_path() {
        let (tx, rx) = std::sync::mpsc::sync_channel(256);
        let mut maze = Maze::new(5, 1, Some(tx));
        maze.set_start(Some((0, 0)));
        maze.set_end(Some((4, 0)));

        let mut now = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::AStar, &config(), now);
        let mut notified = Vec::new();
        for _ in 0..4 {
            now += STEP;
            session.tick(&mut maze, &mut |c: Coord| notified.push(c), now);
        }
        assert_eq!(session.phase(), Phase::Tracing);
        assert!(session.found_path());
        assert_eq!(notified, vec![(1, 0), (2, 0), (3, 0), (4, 0)]);

        notified.clear();
        for _ in 0..3 {
            now += DRAW;
            session.tick(&mut maze, &mut |c: Coord| notified.push(c), now);
        }
        assert_eq!(session.phase(), Phase::Tracing);
        now += DRAW;
        session.tick(&mut maze, &mut |c: Coord| notified.push(c), now);
        assert!(session.is_finished());
        assert_eq!(session.time_until_tick(now), None);
        // Path cells are traced from the end back to the start, which is announced last
        assert_eq!(notified, vec![(3, 0), (2, 0), (1, 0), (0, 0)]);

        drop(maze);
        let routes = rx
            .iter()
            .filter_map(|e| match e {
                GridEvent::Route { coord } => Some(coord),
                _ => None,
            })
            .collect::<Vec<_>>();
        // The start keeps its marker
        assert_eq!(routes, vec![(3, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn test_trivial_paths_notify_start() {
        // End next to the start: only the start is left to trace
        let mut maze = Maze::from_rows(&["SE.."]);
        let mut now = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::Bfs, &config(), now);
        let mut notified = Vec::new();
        while !session.is_finished() {
            now += STEP;
            session.tick(&mut maze, &mut |c: Coord| notified.push(c), now);
        }
        assert_eq!(notified, vec![(1, 0), (0, 0)]);

        // Start on the end: the single path cell is traced once
        let mut maze = Maze::from_rows(&["...."]);
        maze.set_start(Some((2, 0)));
        maze.set_end(Some((2, 0)));
        let mut now = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::AStar, &config(), now);
        let mut notified = Vec::new();
        while !session.is_finished() {
            now += STEP;
            session.tick(&mut maze, &mut |c: Coord| notified.push(c), now);
        }
        assert!(session.found_path());
        assert_eq!(notified, vec![(2, 0)]);
    }

    #[test]
    fn test_unreachable_end_finishes_without_tracing() {
        let mut maze = Maze::from_rows(&["S.#E"]);
        let mut now = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::Gbfs, &config(), now);
        for _ in 0..2 {
            now += STEP;
            session.tick(&mut maze, &mut |_: Coord| {}, now);
        }
        assert!(session.is_finished());
        assert!(!session.found_path());
    }

    #[test]
    fn test_pause_holds_progress() {
        let mut maze = Maze::from_rows(&["S...E"]);
        let t0 = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::Bfs, &config(), t0);
        session.set_paused(true, t0);
        assert_eq!(session.time_until_tick(t0), None);
        assert!(!session.tick(&mut maze, &mut |_: Coord| {}, t0 + STEP * 5));
        assert_eq!(session.search().steps(), 0);
        assert!(session.search().is_paused());

        let resumed = t0 + STEP * 5;
        session.set_paused(false, resumed);
        assert_eq!(session.time_until_tick(resumed), Some(STEP));
        assert!(session.tick(&mut maze, &mut |_: Coord| {}, resumed + STEP));
        assert_eq!(session.search().steps(), 1);
    }

    #[test]
    fn test_speed_change_keeps_frontier() {
        let mut maze = Maze::from_rows(&["S......E"]);
        let t0 = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::Bfs, &config(), t0);
        session.tick(&mut maze, &mut |_: Coord| {}, t0 + STEP);
        session.tick(&mut maze, &mut |_: Coord| {}, t0 + STEP * 2);
        let frontier = session.search().frontier_len();
        let explored = maze.cells().iter().filter(|&&c| c == MazeCell::Explored).count();

        let changed = t0 + STEP * 2 + Duration::from_millis(10);
        session.set_step_delay(Duration::from_millis(20), changed);
        assert_eq!(session.search().steps(), 2);
        assert_eq!(session.search().frontier_len(), frontier);
        assert_eq!(
            maze.cells().iter().filter(|&&c| c == MazeCell::Explored).count(),
            explored
        );

        assert!(session.tick(
            &mut maze,
            &mut |_: Coord| {},
            changed + Duration::from_millis(20)
        ));
        assert_eq!(session.search().steps(), 3);
    }

    #[test]
    fn test_start_reloads_previous_run() {
        let mut maze = Maze::from_rows(&["S.#", "..E"]);
        maze.set_cell((1, 0), MazeCell::Explored);
        maze.set_cell((0, 1), MazeCell::Active);
        let session = SolveSession::start(&mut maze, Solver::Bfs, &config(), Instant::now());
        assert_eq!(maze[(1, 0)], MazeCell::Floor);
        assert_eq!(maze[(0, 1)], MazeCell::Floor);
        assert_eq!(maze[(2, 0)], MazeCell::Wall);
        assert_eq!(session.phase(), Phase::Searching);
    }
}
