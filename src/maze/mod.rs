pub mod cell;
pub mod grid;

use std::sync::mpsc::SyncSender;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use cell::MazeCell;
use grid::{Grid, GridEvent};

/// A cell coordinate `(x, y)`.
pub type Coord = (u8, u8);

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// The grid map searched by the solvers: cell classifications plus the start and end points.
///
/// The start and end are tracked apart from the cell array and writes to their cells are ignored,
/// so a search can never overwrite them. Their stored classifications are kept pinned
/// (start as [`MazeCell::Explored`], end as [`MazeCell::Floor`]) so that no search ever queues
/// the start cell again.
pub struct Maze {
    grid: Grid,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Maze {
    /// Creates an all-floor maze without start or end.
    pub fn new(width: u8, height: u8, sender: Option<SyncSender<GridEvent>>) -> Self {
        Maze {
            grid: Grid::new(width, height, MazeCell::Floor, sender),
            start: None,
            end: None,
        }
    }

    /// Creates a maze and fills it randomly, see [`Maze::regenerate`].
    pub fn generate<R: Rng + ?Sized>(
        width: u8,
        height: u8,
        floor_likelihood: f64,
        rng: &mut R,
        sender: Option<SyncSender<GridEvent>>,
    ) -> Self {
        let mut maze = Maze::new(width, height, sender);
        maze.regenerate(rng, floor_likelihood);
        maze
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Checks if the maze is empty (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width() && coord.1 < self.height()
    }

    fn is_endpoint(&self, coord: Coord) -> bool {
        self.start == Some(coord) || self.end == Some(coord)
    }

    /// Returns the classification of a cell.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn cell(&self, coord: Coord) -> MazeCell {
        self.grid[coord]
    }

    /// Reclassifies a cell. Writes to the start or end cell are ignored.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn set_cell(&mut self, coord: Coord, cell: MazeCell) {
        if self.is_endpoint(coord) {
            return;
        }
        self.grid.set(coord, cell);
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[MazeCell] {
        self.grid.cells()
    }

    /// Iterates over every coordinate of the maze in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Get the in-bounds 4-connected neighbors of a cell.
    ///
    /// The order is always +x, +y, -x, -y. Searches rely on it to break ties, so it must not change.
    /// An out-of-bounds `coord` has no neighbors.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width(), self.height());
        let in_bounds = move |(x, y): Coord| x < width && y < height;
        let valid = in_bounds(coord);
        let (x, y) = coord;
        [
            // NOTE: The largest index numerically possible is u8::MAX - 1, while the largest
            // dimension is u8::MAX. Saturating at u8::MAX or wrapping below 0 to u8::MAX
            // therefore always lands out of bounds and gets filtered.
            (x.saturating_add(1), y),
            (x, y.saturating_add(1)),
            (x.wrapping_sub(1), y),
            (x, y.wrapping_sub(1)),
        ]
        .into_iter()
        .filter(move |&c| valid && in_bounds(c))
    }

    /// Re-randomizes the whole maze.
    ///
    /// Picks a new uniformly random start and end (they may coincide and nothing guarantees a
    /// path between them), then makes every cell a floor with probability `floor_likelihood`
    /// and a wall otherwise.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R, floor_likelihood: f64) {
        if self.is_empty() {
            return;
        }
        let start = (
            rng.random_range(0..self.width()),
            rng.random_range(0..self.height()),
        );
        let end = (
            rng.random_range(0..self.width()),
            rng.random_range(0..self.height()),
        );

        for coord in self.coords() {
            let cell = if rng.random::<f64>() < floor_likelihood {
                MazeCell::Floor
            } else {
                MazeCell::Wall
            };
            self.grid.set(coord, cell);
        }

        self.start = Some(start);
        self.end = Some(end);
        self.pin_endpoints();
        tracing::debug!(?start, ?end, "Regenerated {}x{} maze", self.width(), self.height());
    }

    /// Clears what a previous search left behind: active and explored cells become floors again.
    /// Walls and the endpoints are untouched.
    pub fn reload(&mut self) {
        for coord in self.coords() {
            if self.grid[coord].is_visited() {
                self.set_cell(coord, MazeCell::Floor);
            }
        }
    }

    /// Moves the start. The vacated cell becomes a floor. Out-of-bounds coordinates are ignored.
    /// Returns whether the start was changed.
    pub fn set_start(&mut self, start: Option<Coord>) -> bool {
        if start.is_some_and(|c| !self.is_in_bounds(c)) {
            return false;
        }
        let old = std::mem::replace(&mut self.start, start);
        self.vacate(old);
        self.pin_endpoints();
        true
    }

    /// Moves the end. The vacated cell becomes a floor. Out-of-bounds coordinates are ignored.
    /// Returns whether the end was changed.
    pub fn set_end(&mut self, end: Option<Coord>) -> bool {
        if end.is_some_and(|c| !self.is_in_bounds(c)) {
            return false;
        }
        let old = std::mem::replace(&mut self.end, end);
        self.vacate(old);
        self.pin_endpoints();
        true
    }

    fn vacate(&mut self, old: Option<Coord>) {
        if let Some(old) = old
            && !self.is_endpoint(old)
        {
            self.grid.set(old, MazeCell::Floor);
        }
    }

    /// Writes the stored classification of the endpoints directly, bypassing the endpoint guard,
    /// and announces their positions.
    fn pin_endpoints(&mut self) {
        if let Some(start) = self.start {
            self.grid.set(start, MazeCell::Explored);
        }
        if let Some(end) = self.end {
            self.grid.set(end, MazeCell::Floor);
        }
        self.grid.emit(GridEvent::Endpoints {
            start: self.start,
            end: self.end,
        });
    }

    /// Forwards an event to the maze's listener.
    pub fn emit(&self, event: GridEvent) {
        self.grid.emit(event);
    }

    /// Builds a maze from rows of text: `#` wall, `.` floor, `S` start, `E` end.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u8;
        let mut maze = Maze::new(width, height, None);
        let (mut start, mut end) = (None, None);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let coord = (x as u8, y as u8);
                match c {
                    '#' => maze.grid.set(coord, MazeCell::Wall),
                    'S' => start = Some(coord),
                    'E' => end = Some(coord),
                    _ => {}
                }
            }
        }
        maze.set_start(start);
        maze.set_end(end);
        maze
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = MazeCell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}
