use std::{
    io::{Stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, TryRecvError},
    },
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{
    Coord,
    cell::{Marker, MazeCell},
    grid::GridEvent,
};

/// Events for the renderer that do not come from the maze itself.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Replace the status line text
    Status(String),
    /// The terminal was resized
    Resize,
}

/// Mirror of the maze as last drawn, so the screen can be rebuilt at any time.
#[derive(Debug, Default)]
struct Canvas {
    width: u8,
    height: u8,
    cells: Vec<MazeCell>,
    route: Vec<bool>,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Canvas {
    fn index(&self, (x, y): Coord) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn reset(&mut self, cell: MazeCell, width: u8, height: u8) {
        let len = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.cells = vec![cell; len];
        self.route = vec![false; len];
    }

    fn glyph(&self, coord: Coord) -> Option<String> {
        let idx = self.index(coord)?;
        let glyph = if self.start == Some(coord) {
            Marker::Start.to_string()
        } else if self.end == Some(coord) {
            Marker::Goal.to_string()
        } else if self.route[idx] {
            Marker::Route.to_string()
        } else {
            self.cells[idx].to_string()
        };
        Some(glyph)
    }
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    canvas: Canvas,
    status: String,
    /// Pitch of the most recently announced cell
    last_tone: Option<f64>,
    /// Whether the terminal is large enough for the current maze
    fits: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// How often to look for status updates while no grid event arrives
    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            canvas: Canvas::default(),
            status: String::new(),
            last_tone: None,
            fits: true,
        }
    }

    /// Check if terminal size is sufficient for the maze plus the status line.
    /// If not, display a message and return Ok(false) until the terminal is resized.
    fn check_resize(&mut self) -> std::io::Result<bool> {
        let (width, height) = (self.canvas.width as u16, self.canvas.height as u16);
        let (term_width, term_height) = terminal::size()?;
        let fits = term_width >= width * MazeCell::CELL_WIDTH && term_height > height;
        if !fits {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze ({}x{} needs {}x{}). Please resize the terminal.\r\n",
                term_width,
                term_height,
                width,
                height,
                width * MazeCell::CELL_WIDTH,
                height + 1,
            );
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            self.stdout.flush()?;
        }
        self.fits = fits;
        Ok(fits)
    }

    fn draw_cell(&mut self, coord: Coord) -> std::io::Result<()> {
        if !self.fits {
            return Ok(());
        }
        if let Some(glyph) = self.canvas.glyph(coord) {
            queue!(
                self.stdout,
                cursor::MoveTo(coord.0 as u16 * MazeCell::CELL_WIDTH, coord.1 as u16),
                style::Print(glyph)
            )?;
        }
        Ok(())
    }

    fn draw_status(&mut self) -> std::io::Result<()> {
        if !self.fits {
            return Ok(());
        }
        let mut line = self.status.clone();
        if let Some(frequency) = self.last_tone {
            line.push_str(&format!(" | ♪ {:.0} Hz", frequency));
        }
        let (term_width, _) = terminal::size()?;
        let (line, _) = line.unicode_truncate(term_width as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.canvas.height as u16),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(line.with(Color::Cyan))
        )?;
        Ok(())
    }

    /// Clears the screen and draws every cell and the status line again.
    fn redraw(&mut self) -> std::io::Result<()> {
        self.stdout.queue(terminal::Clear(ClearType::All))?;
        if !self.check_resize()? {
            return Ok(());
        }
        let (width, height) = (self.canvas.width, self.canvas.height);
        for y in 0..height {
            for x in 0..width {
                self.draw_cell((x, y))?;
            }
        }
        self.draw_status()?;
        self.stdout.flush()
    }

    fn render_grid_event(&mut self, event: GridEvent) -> std::io::Result<()> {
        match event {
            GridEvent::Initial {
                cell,
                width,
                height,
            } => {
                self.canvas.reset(cell, width, height);
                self.redraw()?;
            }
            GridEvent::Update { coord, new, .. } => {
                if let Some(idx) = self.canvas.index(coord) {
                    self.canvas.cells[idx] = new;
                    // A reclassified cell is no longer part of a drawn path
                    self.canvas.route[idx] = false;
                    self.draw_cell(coord)?;
                }
            }
            GridEvent::Endpoints { start, end } => {
                let old = [self.canvas.start, self.canvas.end];
                self.canvas.start = start;
                self.canvas.end = end;
                for coord in old.into_iter().chain([start, end]).flatten() {
                    self.draw_cell(coord)?;
                }
                self.stdout.flush()?;
            }
            GridEvent::Route { coord } => {
                if let Some(idx) = self.canvas.index(coord) {
                    self.canvas.route[idx] = true;
                    self.draw_cell(coord)?;
                }
            }
            GridEvent::Tone { frequency, .. } => {
                self.last_tone = Some(frequency);
            }
            GridEvent::Flush => {
                self.draw_status()?;
                self.stdout.flush()?;
            }
        }
        Ok(())
    }

    fn handle_ui_event(&mut self, event: UiEvent) -> std::io::Result<()> {
        match event {
            UiEvent::Status(status) => {
                self.status = status;
                self.draw_status()?;
                self.stdout.flush()?;
            }
            UiEvent::Resize => {
                tracing::debug!("Terminal resized, redrawing");
                self.redraw()?;
            }
        }
        Ok(())
    }

    /// Render loop that processes events from the grid and UI event channels.
    /// Returns once the grid event channel disconnects or `should_stop` is set.
    pub fn render(
        &mut self,
        grid_event_rx: Receiver<GridEvent>,
        ui_event_rx: Receiver<UiEvent>,
        should_stop: &AtomicBool,
    ) -> std::io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        self.stdout.flush()?;

        loop {
            if should_stop.load(Ordering::Acquire) {
                tracing::debug!("[render loop] Stop requested, exiting");
                break;
            }

            loop {
                match ui_event_rx.try_recv() {
                    Ok(event) => self.handle_ui_event(event)?,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            match grid_event_rx.recv_timeout(Self::POLL_INTERVAL) {
                Ok(event) => self.render_grid_event(event)?,
                Err(RecvTimeoutError::Timeout) => {
                    // Nothing arrived for a while, make sure everything queued is on screen
                    self.stdout.flush()?;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("[render loop] Grid event channel disconnected");
                    break;
                }
            }
        }

        // Move cursor below the maze after exiting
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.canvas.height as u16 + 1),
            cursor::Show
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}
