pub mod frontier;
pub mod tree;

use crate::maze::{Coord, Maze, MazeCell};
use frontier::{Discipline, Frontier, FrontierEntry};
use tree::{NodeId, SearchTree, SearchedCell};

/// Straight-line distance between two cells. Never overestimates the number of 4-connected
/// moves between them, so A* stays optimal with it.
pub fn euclidean_distance(a: Coord, b: Coord) -> f64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Bfs,
    Gbfs,
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Gbfs => write!(f, "Greedy Best-First Search (GBFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Bfs, Solver::Gbfs, Solver::AStar];

    /// The solver after this one in [`Solver::ALL`], wrapping around.
    pub fn next(self) -> Solver {
        match self {
            Solver::Bfs => Solver::Gbfs,
            Solver::Gbfs => Solver::AStar,
            Solver::AStar => Solver::Bfs,
        }
    }

    fn discipline(self) -> Discipline {
        match self {
            Solver::Bfs => Discipline::Fifo,
            Solver::Gbfs | Solver::AStar => Discipline::Ascending,
        }
    }

    /// Frontier priority of a cell reached in `length` steps.
    fn priority(self, length: u32, coord: Coord, end: Coord) -> f64 {
        match self {
            Solver::Bfs => length as f64,
            Solver::Gbfs => euclidean_distance(coord, end),
            Solver::AStar => length as f64 + euclidean_distance(coord, end),
        }
    }
}

/// Receives notifications while a search runs.
pub trait SearchObserver {
    /// Called for every cell that turns active, and for the end cell once it is found.
    fn discovered(&mut self, coord: Coord);

    /// Called at the end of every step that did some work.
    fn step_finished(&mut self, _maze: &Maze) {}
}

impl<F: FnMut(Coord)> SearchObserver for F {
    fn discovered(&mut self, coord: Coord) {
        self(coord)
    }
}

/// An incremental search over a [`Maze`] that advances one expansion per [`Search::step`].
///
/// A search is seeded with the maze's start on construction and is over once the end is found
/// or the frontier runs dry. Stepping a finished or paused search does nothing.
#[derive(Debug)]
pub struct Search {
    solver: Solver,
    end: Option<Coord>,
    tree: SearchTree,
    frontier: Frontier,
    final_cell: Option<NodeId>,
    search_ended: bool,
    paused: bool,
    steps: usize,
}

impl Search {
    pub fn new(maze: &Maze, solver: Solver) -> Self {
        let mut search = Search {
            solver,
            end: maze.end(),
            tree: SearchTree::new(),
            frontier: Frontier::new(solver.discipline()),
            final_cell: None,
            search_ended: false,
            paused: false,
            steps: 0,
        };

        match (maze.start(), maze.end()) {
            (Some(start), Some(end)) if start == end => {
                search.final_cell = Some(search.tree.insert(start, None));
                search.search_ended = true;
            }
            (Some(start), Some(end)) => {
                let origin = search.tree.insert(start, None);
                search.frontier.push(FrontierEntry {
                    priority: solver.priority(0, start, end),
                    node: origin,
                    length: 0,
                });
            }
            _ => {
                tracing::debug!("Maze has no start or end, nothing to search");
                search.search_ended = true;
            }
        }
        search
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Whether the search is over, with or without finding the end.
    pub fn search_ended(&self) -> bool {
        self.search_ended
    }

    /// The node recording the end cell, once found.
    pub fn final_cell(&self) -> Option<&SearchedCell> {
        self.final_cell.map(|id| self.tree.get(id))
    }

    /// The path from start to end, if the end was found.
    pub fn path(&self) -> Option<Vec<Coord>> {
        let mut path = self.tree.path(self.final_cell?).collect::<Vec<_>>();
        path.reverse();
        Some(path)
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of expansions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Expands exactly one frontier node.
    ///
    /// The node is marked explored and each neighbor, in the maze's fixed neighbor order, is
    /// examined: the end cell stops the scan and finishes the search, floor cells become active
    /// and join the frontier, anything else is skipped.
    pub fn step<O: SearchObserver + ?Sized>(&mut self, maze: &mut Maze, observer: &mut O) {
        if self.paused || self.search_ended {
            return;
        }
        let (Some(end), Some(entry)) = (self.end, self.frontier.pop()) else {
            self.search_ended = true;
            return;
        };
        self.steps += 1;

        let current = self.tree.get(entry.node).coord;
        maze.set_cell(current, MazeCell::Explored);

        for neighbor in maze.neighbors(current) {
            if neighbor == end {
                self.final_cell = Some(self.tree.insert(neighbor, Some(entry.node)));
                observer.discovered(neighbor);
                break;
            } else if maze.cell(neighbor) == MazeCell::Floor {
                maze.set_cell(neighbor, MazeCell::Active);
                observer.discovered(neighbor);
                let node = self.tree.insert(neighbor, Some(entry.node));
                let length = entry.length + 1;
                self.frontier.push(FrontierEntry {
                    priority: self.solver.priority(length, neighbor, end),
                    node,
                    length,
                });
            }
        }

        if self.final_cell.is_some() {
            // The remaining frontier is never expanded, so it should not look pending
            for neighbor in maze.neighbors(current) {
                if maze.cell(neighbor) == MazeCell::Active {
                    maze.set_cell(neighbor, MazeCell::Floor);
                }
            }
            self.search_ended = true;
            tracing::debug!(solver = %self.solver, steps = self.steps, "Found end");
        }
        if self.frontier.is_empty() && !self.search_ended {
            self.search_ended = true;
            tracing::debug!(solver = %self.solver, steps = self.steps, "Could not find end");
        }

        observer.step_finished(maze);
    }

    /// Steps until the search ends, returning the path if one was found.
    pub fn run_to_end<O: SearchObserver + ?Sized>(
        &mut self,
        maze: &mut Maze,
        observer: &mut O,
    ) -> Option<Vec<Coord>> {
        while !self.search_ended && !self.paused {
            self.step(maze, observer);
        }
        self.path()
    }
}
