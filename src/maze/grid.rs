use std::sync::mpsc::SyncSender;

use super::{Coord, cell::MazeCell};

/// Events describing how the drawn maze changes over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridEvent {
    /// The whole grid was (re)created with every cell set to `cell`.
    Initial { cell: MazeCell, width: u8, height: u8 },
    /// A single cell changed classification.
    Update {
        coord: Coord,
        old: MazeCell,
        new: MazeCell,
    },
    /// The start or end coordinate moved.
    Endpoints {
        start: Option<Coord>,
        end: Option<Coord>,
    },
    /// A cell of the reconstructed path should be highlighted.
    Route { coord: Coord },
    /// A cell was announced with a tone of the given pitch.
    Tone { coord: Coord, frequency: f64 },
    /// A search step finished; buffered drawing can be flushed.
    Flush,
}

/// Row-major storage of cell classifications that reports every change to an optional listener.
pub struct Grid {
    data: Box<[MazeCell]>,
    width: u8,
    height: u8,
    sender: Option<SyncSender<GridEvent>>,
}

impl Grid {
    pub fn new(width: u8, height: u8, cell: MazeCell, sender: Option<SyncSender<GridEvent>>) -> Self {
        let data = vec![cell; width as usize * height as usize].into_boxed_slice();
        let grid = Grid {
            data,
            width,
            height,
            sender,
        };
        grid.emit(GridEvent::Initial {
            cell,
            width,
            height,
        });
        grid
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn ravel_index(&self, (x, y): Coord) -> usize {
        assert!(
            x < self.width && y < self.height,
            "coordinate ({}, {}) is outside of the {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite a cell, notifying the listener if the value actually changed.
    pub fn set(&mut self, coord: Coord, cell: MazeCell) {
        let idx = self.ravel_index(coord);
        let old = self.data[idx];
        if old != cell {
            self.data[idx] = cell;
            self.emit(GridEvent::Update {
                coord,
                old,
                new: cell,
            });
        }
    }

    /// Send an event to the listener, if any.
    /// A disconnected listener is not an error: the grid keeps working headless.
    pub fn emit(&self, event: GridEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }

    pub fn cells(&self) -> &[MazeCell] {
        &self.data
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = MazeCell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}
