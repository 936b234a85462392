pub mod renderer;
pub mod session;
pub mod ticker;
pub mod tone;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender},
    },
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::{
        renderer::{Renderer, UiEvent},
        session::{Phase, SolveSession},
        tone::cell_frequency,
    },
    config::{MazeConfig, ToneConfig, VisualizationConfig},
    maze::{Coord, Maze, MazeCell, get_rng, grid::GridEvent},
    solvers::{SearchObserver, Solver},
};

#[derive(Debug)]
enum UserInputEvent {
    KeyPress(event::KeyEvent),
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuStep {
    /// Keep the menu open with this option highlighted
    Highlight(usize),
    Choose(usize),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserActionEvent {
    /// Pause or resume the running solve, or start one when idle
    TogglePause,
    /// Start a new solve from scratch
    Start,
    /// Use the next solver for the next solve
    NextSolver,
    /// Increase animation speed
    SpeedUp,
    /// Decrease animation speed
    SlowDown,
    /// Abort the solve and wipe its traces
    Clear,
    /// Abort the solve and build a new random maze
    Regenerate,
    /// Terminal resize
    Resize,
    /// Exit the app
    Cancel,
}

impl UserActionEvent {
    fn from_key(code: KeyCode) -> Option<Self> {
        let action = match code {
            KeyCode::Enter => UserActionEvent::TogglePause,
            KeyCode::Char(' ') => UserActionEvent::Start,
            KeyCode::Tab => UserActionEvent::NextSolver,
            KeyCode::Up => UserActionEvent::SpeedUp,
            KeyCode::Down => UserActionEvent::SlowDown,
            KeyCode::Char('c') | KeyCode::Char('C') => UserActionEvent::Clear,
            KeyCode::Char('r') | KeyCode::Char('R') => UserActionEvent::Regenerate,
            KeyCode::Esc => UserActionEvent::Cancel,
            _ => return None,
        };
        Some(action)
    }
}

/// Turns search progress into tones for the status line.
struct Announcer {
    sender: SyncSender<GridEvent>,
    width: u8,
    height: u8,
    tone: ToneConfig,
}

impl SearchObserver for Announcer {
    fn discovered(&mut self, coord: Coord) {
        let frequency = cell_frequency(coord, self.width, self.height, &self.tone);
        tracing::trace!(?coord, frequency, "Tone");
        // Renderer may be gone already, which only means nobody is listening
        let _ = self.sender.send(GridEvent::Tone { coord, frequency });
    }

    fn step_finished(&mut self, _maze: &Maze) {
        let _ = self.sender.send(GridEvent::Flush);
    }
}

pub struct App {
    /// Timeout for receiving input events when no tick is due soon
    input_recv_timeout: Duration,
    /// Timeout for polling input events in the input thread, a.k.a.
    /// how often to check the stop flag
    user_input_event_poll_timeout: Duration,
    config: VisualizationConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(VisualizationConfig::default())
    }
}

impl App {
    /// Maximum number of grid events to buffer in the channel between main and render threads
    const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
    /// Rows below the maze used by the status line
    const NUM_STATUS_ROWS: u16 = 1;

    pub fn new(config: VisualizationConfig) -> Self {
        Self {
            input_recv_timeout: Duration::from_millis(100),
            user_input_event_poll_timeout: Duration::from_millis(100),
            config,
        }
    }

    /// Chains a panic hook that gives the terminal back before the default report is printed.
    /// Panics on the input or render thread go through it as well.
    fn install_terminal_panic_hook() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // The process is going down anyway, a failed restore changes nothing
            let _ = App::restore_terminal(&mut std::io::stdout());
            previous(info);
        }));
    }

    /// Puts the terminal in raw mode on the alternate screen, with a panic hook undoing it.
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::install_terminal_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Undoes [`App::setup_terminal`].
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        let Some((width, height)) = App::ask_maze_dimensions(stdout, &self.config.maze)? else {
            return Ok(());
        };
        self.config.maze.grid_width = width;
        self.config.maze.grid_height = height;

        let solver = match App::select_from_menu(
            stdout,
            "Select maze solving algorithm (use arrow keys and Enter, or Esc to exit):",
            &Solver::ALL,
        )? {
            Some(solver) => {
                stdout.execute(style::PrintStyledContent(
                    format!("Selected solver: {}\r\n", solver)
                        .with(Color::Green)
                        .attribute(Attribute::Bold),
                ))?;
                solver
            }
            None => {
                return Ok(());
            }
        };

        queue!(
            stdout,
            style::PrintStyledContent(
                "Controls:\r\n"
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
            style::PrintStyledContent(
                "  Enter: Pause/Resume solving (start when idle)\r\n".with(Color::Cyan)
            ),
            style::PrintStyledContent("  Space: Start a new solve\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  Tab: Switch solver\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  ↑/↓: Speed up/slow down solving\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  c: Clear search traces\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  r: Regenerate maze\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  Esc: Exit\r\n\r\n".with(Color::Cyan)),
            style::PrintStyledContent(
                "Press Enter to continue...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            ),
        )?;
        stdout.flush()?;
        if !App::wait_for_keypress(KeyCode::Enter)? {
            return Ok(());
        }

        // Flag to stop the input and render threads. Set by the main thread when it is done.
        let should_stop = Arc::new(AtomicBool::new(false));

        let (user_input_event_tx, user_input_event_rx) =
            std::sync::mpsc::channel::<UserInputEvent>();
        let user_input_event_poll_timeout = self.user_input_event_poll_timeout;
        let should_stop_for_input = should_stop.clone();
        // Spawn a thread to listen for user input
        let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            App::listen_to_user_input(
                user_input_event_tx,
                user_input_event_poll_timeout,
                &should_stop_for_input,
            )
        });

        let (grid_event_tx, grid_event_rx) =
            std::sync::mpsc::sync_channel::<GridEvent>(App::MAX_EVENTS_IN_CHANNEL_BUFFER);
        let (ui_event_tx, ui_event_rx) = std::sync::mpsc::channel::<UiEvent>();

        // Spawn a thread to listen for grid updates and render the maze
        let should_stop_for_render = should_stop.clone();
        let render_thread_handle = std::thread::spawn(move || {
            let mut renderer = Renderer::new();
            renderer.render(grid_event_rx, ui_event_rx, &should_stop_for_render)
        });

        let mut rng = get_rng(self.config.maze.seed);
        let maze = Maze::generate(
            width,
            height,
            self.config.maze.floor_likelihood,
            &mut rng,
            Some(grid_event_tx.clone()),
        );
        let announcer = Announcer {
            sender: grid_event_tx,
            width,
            height,
            tone: self.config.tone,
        };

        // Main thread loop, owns the maze and the solve session.
        // The maze and the announcer hold the only grid event senders, so the render thread
        // sees a disconnect once this returns.
        let result = self.app_loop(
            maze,
            announcer,
            solver,
            &mut rng,
            user_input_event_rx,
            ui_event_tx,
        );
        should_stop.store(true, Ordering::Release);

        // Wait for input thread to finish
        let _ = input_thread_handle.join();

        // Wait for render thread to finish
        render_thread_handle
            .join()
            .expect("Render thread panicked")?;

        result
    }

    /// App loop after starting input and render threads
    fn app_loop(
        &mut self,
        mut maze: Maze,
        mut announcer: Announcer,
        mut solver: Solver,
        rng: &mut rand::rngs::StdRng,
        user_input_event_rx: Receiver<UserInputEvent>,
        ui_event_tx: Sender<UiEvent>,
    ) -> std::io::Result<()> {
        tracing::info!(%solver, "Started main app loop");
        let mut session: Option<SolveSession> = None;
        let mut last_status = String::new();

        loop {
            let status = App::status_line(solver, &self.config, session.as_ref());
            if status != last_status {
                if ui_event_tx.send(UiEvent::Status(status.clone())).is_err() {
                    // Render thread has exited
                    break;
                }
                last_status = status;
            }

            let now = Instant::now();
            let timeout = session
                .as_ref()
                .and_then(|s| s.time_until_tick(now))
                .map_or(self.input_recv_timeout, |t| t.min(self.input_recv_timeout));

            let action = match user_input_event_rx.recv_timeout(timeout) {
                Ok(UserInputEvent::KeyPress(key_event)) => {
                    UserActionEvent::from_key(key_event.code)
                }
                Ok(UserInputEvent::Resize) => Some(UserActionEvent::Resize),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    // Input thread has exited
                    break;
                }
            };

            let now = Instant::now();
            match action {
                Some(UserActionEvent::Cancel) => {
                    tracing::debug!("[app loop] Esc key pressed, exiting");
                    break;
                }
                Some(UserActionEvent::TogglePause) => {
                    if let Some(s) = session.as_mut().filter(|s| !s.is_finished()) {
                        s.set_paused(!s.is_paused(), now);
                    } else {
                        session = Some(SolveSession::start(&mut maze, solver, &self.config, now));
                    }
                }
                Some(UserActionEvent::Start) => {
                    session = Some(SolveSession::start(&mut maze, solver, &self.config, now));
                }
                Some(UserActionEvent::NextSolver) => {
                    solver = solver.next();
                    tracing::debug!(%solver, "Selected next solver");
                }
                Some(UserActionEvent::SpeedUp) | Some(UserActionEvent::SlowDown) => {
                    if action == Some(UserActionEvent::SpeedUp) {
                        self.config.speed_up();
                    } else {
                        self.config.slow_down();
                    }
                    if let Some(s) = session.as_mut() {
                        s.set_step_delay(self.config.step_delay(), now);
                    }
                    tracing::debug!(speed = self.config.solve_step_speed, "Changed speed");
                }
                Some(UserActionEvent::Clear) => {
                    session = None;
                    maze.reload();
                }
                Some(UserActionEvent::Regenerate) => {
                    session = None;
                    maze.regenerate(rng, self.config.maze.floor_likelihood);
                }
                Some(UserActionEvent::Resize) => {
                    if ui_event_tx.send(UiEvent::Resize).is_err() {
                        break;
                    }
                }
                None => {}
            }

            if let Some(s) = session.as_mut() {
                s.tick(&mut maze, &mut announcer, Instant::now());
            }
        }
        tracing::info!("Exiting main app loop");
        Ok(())
    }

    /// One-line summary of the app state shown below the maze.
    fn status_line(
        solver: Solver,
        config: &VisualizationConfig,
        session: Option<&SolveSession>,
    ) -> String {
        let state = match session {
            None => "idle".to_string(),
            Some(s) if s.is_paused() => "paused".to_string(),
            Some(s) => match s.phase() {
                Phase::Searching => format!("searching ({} steps)", s.search().steps()),
                Phase::Tracing => "tracing path".to_string(),
                Phase::Finished => match s.search().path() {
                    Some(path) => format!(
                        "path found ({} steps, length {})",
                        s.search().steps(),
                        path.len().saturating_sub(1)
                    ),
                    None => format!("no path ({} steps)", s.search().steps()),
                },
            },
        };
        format!("{} | speed {:.2} | {}", solver, config.solve_step_speed, state)
    }

    /// Keeps the events the main loop reacts to: key presses and resizes.
    fn classify_input(event: event::Event) -> Option<UserInputEvent> {
        match event {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                Some(UserInputEvent::KeyPress(key_event))
            }
            event::Event::Resize(_, _) => Some(UserInputEvent::Resize),
            _ => None,
        }
    }

    /// Input thread body, the only reader of terminal events while the maze is shown.
    /// Ends after forwarding Esc, when `should_stop` is set or when the main loop hangs up.
    fn listen_to_user_input(
        user_input_event_tx: Sender<UserInputEvent>,
        event_poll_timeout: Duration,
        should_stop: &AtomicBool,
    ) -> std::io::Result<()> {
        while !should_stop.load(Ordering::Acquire) {
            if !event::poll(event_poll_timeout)? {
                continue;
            }
            let Some(input_event) = App::classify_input(event::read()?) else {
                continue;
            };
            let is_exit = matches!(
                &input_event,
                UserInputEvent::KeyPress(key) if key.code == KeyCode::Esc
            );
            if user_input_event_tx.send(input_event).is_err() {
                tracing::debug!("[input loop] Main loop is gone, exiting");
                break;
            }
            if is_exit {
                tracing::debug!("[input loop] Esc key pressed, exiting");
                break;
            }
        }
        Ok(())
    }

    /// Wait for the user to press `key`
    /// Returns false if Esc was pressed instead
    fn wait_for_keypress(key: KeyCode) -> std::io::Result<bool> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
                && kind == event::KeyEventKind::Press
            {
                if code == key {
                    return Ok(true);
                }
                if code == KeyCode::Esc {
                    return Ok(false);
                }
            }
        }
    }

    /// Single-line text prompt, colored green or red as the input validates or not, with the
    /// validation message below it. Enter only accepts valid input; Esc gives `None`.
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();
        let value = loop {
            let validation = validate(input.trim());
            let color = if validation.is_ok() {
                Color::Green
            } else {
                Color::Red
            };
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent(prompt.with(Color::Cyan).attribute(Attribute::Bold)),
                style::PrintStyledContent(input.as_str().with(color)),
                style::Print(" \r\n")
            )?;
            if let Err(msg) = validation {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }
            stdout.flush()?;

            let event::Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => {
                    if let Ok(value) = validate(input.trim()) {
                        break Some(value);
                    }
                }
                KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Esc => break None,
                _ => {}
            }
        };
        App::clear_prompt(stdout)?;
        Ok(value)
    }

    /// Largest dimension that fits in `term_cells` terminal cells of `cell_size` each,
    /// within the allowed dimension range
    fn get_max_maze_size(term_cells: u16, cell_size: u16) -> u8 {
        let fitting = (term_cells / cell_size).min(u8::MAX as u16) as u8;
        MazeConfig::clamp_dimension(fitting)
    }

    /// Parses a maze dimension typed by the user. Empty input picks `default`.
    fn validate_dimension(s: &str, default: u8, max_size: u8) -> Result<u8, String> {
        if s.is_empty() {
            return Ok(MazeConfig::clamp_dimension(default).min(max_size));
        }
        let error_msg = format!(
            "Please enter a number between {} and {}.",
            MazeConfig::MIN_DIMENSION,
            max_size
        );
        match s.parse::<u8>() {
            Ok(n) if (MazeConfig::MIN_DIMENSION..=max_size).contains(&n) => Ok(n),
            _ => Err(error_msg),
        }
    }

    /// Ask user for maze dimensions
    /// Returns None if user cancels input with Esc
    /// Returns Some((width, height)) if user inputs valid dimensions
    fn ask_maze_dimensions(
        stdout: &mut Stdout,
        defaults: &MazeConfig,
    ) -> std::io::Result<Option<(u8, u8)>> {
        stdout.execute(style::PrintStyledContent(
            format!(
                "Enter maze dimensions (between {} and {}), or press Esc to exit. \
Press Enter on an empty input for the default {}x{}. \
Maximum acceptable values are based on current terminal size.\r\n",
                MazeConfig::MIN_DIMENSION,
                MazeConfig::MAX_DIMENSION,
                defaults.grid_width,
                defaults.grid_height,
            )
            .with(Color::Blue),
        ))?;

        let (max_width, max_height) = match terminal::size() {
            Ok((term_width, term_height)) => (
                App::get_max_maze_size(term_width, MazeCell::CELL_WIDTH),
                // Reserve rows for the status line
                App::get_max_maze_size(term_height.saturating_sub(App::NUM_STATUS_ROWS), 1),
            ),
            // Fallback to max size if terminal size cannot be determined
            Err(_) => (MazeConfig::MAX_DIMENSION, MazeConfig::MAX_DIMENSION),
        };

        let validate_width = |s: &str| App::validate_dimension(s, defaults.grid_width, max_width);
        let validate_height =
            |s: &str| App::validate_dimension(s, defaults.grid_height, max_height);

        let Some(width) = App::prompt_with_validation(stdout, "Width: ", validate_width)? else {
            return Ok(None);
        };
        stdout.execute(style::PrintStyledContent(
            format!("Width set to {}\r\n", width)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let Some(height) = App::prompt_with_validation(stdout, "Height: ", validate_height)?
        else {
            return Ok(None);
        };
        stdout.execute(style::PrintStyledContent(
            format!("Height set to {}\r\n", height)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((width, height)))
    }

    /// Where a key press leaves a menu of `len` options with `selected` highlighted.
    fn menu_step(selected: usize, len: usize, code: KeyCode) -> MenuStep {
        match code {
            KeyCode::Up => MenuStep::Highlight((selected + len - 1) % len),
            KeyCode::Down | KeyCode::Tab => MenuStep::Highlight((selected + 1) % len),
            KeyCode::Enter => MenuStep::Choose(selected),
            KeyCode::Esc => MenuStep::Cancel,
            _ => MenuStep::Highlight(selected),
        }
    }

    /// Arrow-key menu below the cursor. Returns `None` on Esc or when there is nothing to pick.
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;
        let choice = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent(prompt.with(Color::Yellow))
            )?;
            for (i, option) in options.iter().enumerate() {
                let line = format!("\r\n{}", option);
                if i == selected {
                    stdout.queue(style::PrintStyledContent(line.attribute(Attribute::Reverse)))?;
                } else {
                    stdout.queue(style::Print(line))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;
            stdout.flush()?;

            let event::Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            match App::menu_step(selected, options.len(), key.code) {
                MenuStep::Highlight(i) => selected = i,
                MenuStep::Choose(i) => break Some(options[i]),
                MenuStep::Cancel => break None,
            }
        };

        App::clear_prompt(stdout)?;
        Ok(choice)
    }

    /// Wipes a prompt or menu drawn from the saved cursor position.
    fn clear_prompt(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Enter),
            Some(UserActionEvent::TogglePause)
        );
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Char(' ')),
            Some(UserActionEvent::Start)
        );
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Tab),
            Some(UserActionEvent::NextSolver)
        );
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Char('r')),
            Some(UserActionEvent::Regenerate)
        );
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Char('c')),
            Some(UserActionEvent::Clear)
        );
        assert_eq!(
            UserActionEvent::from_key(KeyCode::Esc),
            Some(UserActionEvent::Cancel)
        );
        assert_eq!(UserActionEvent::from_key(KeyCode::Char('x')), None);
        assert_eq!(UserActionEvent::from_key(KeyCode::Left), None);
    }

    #[test]
    fn test_max_maze_size() {
        assert_eq!(App::get_max_maze_size(80, 2), 40);
        assert_eq!(App::get_max_maze_size(4, 2), MazeConfig::MIN_DIMENSION);
        assert_eq!(App::get_max_maze_size(1000, 1), MazeConfig::MAX_DIMENSION);
        assert_eq!(App::get_max_maze_size(u16::MAX, 1), MazeConfig::MAX_DIMENSION);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        assert_eq!(App::menu_step(0, 3, KeyCode::Up), MenuStep::Highlight(2));
        assert_eq!(App::menu_step(2, 3, KeyCode::Down), MenuStep::Highlight(0));
        assert_eq!(App::menu_step(1, 3, KeyCode::Tab), MenuStep::Highlight(2));
        assert_eq!(App::menu_step(1, 3, KeyCode::Enter), MenuStep::Choose(1));
        assert_eq!(App::menu_step(1, 3, KeyCode::Esc), MenuStep::Cancel);
        assert_eq!(App::menu_step(1, 3, KeyCode::Char('x')), MenuStep::Highlight(1));
    }

    #[test]
    fn test_only_presses_and_resizes_reach_main_loop() {
        let press = event::KeyEvent::new(KeyCode::Enter, event::KeyModifiers::NONE);
        assert!(matches!(
            App::classify_input(event::Event::Key(press)),
            Some(UserInputEvent::KeyPress(key)) if key.code == KeyCode::Enter
        ));
        let release = event::KeyEvent::new_with_kind(
            KeyCode::Enter,
            event::KeyModifiers::NONE,
            event::KeyEventKind::Release,
        );
        assert!(App::classify_input(event::Event::Key(release)).is_none());
        assert!(matches!(
            App::classify_input(event::Event::Resize(80, 24)),
            Some(UserInputEvent::Resize)
        ));
        assert!(App::classify_input(event::Event::FocusGained).is_none());
    }

    #[test]
    fn test_validate_dimension() {
        assert_eq!(App::validate_dimension("", 40, 100), Ok(40));
        assert_eq!(App::validate_dimension("", 40, 30), Ok(30));
        assert_eq!(App::validate_dimension("12", 40, 100), Ok(12));
        assert!(App::validate_dimension("3", 40, 100).is_err());
        assert!(App::validate_dimension("31", 40, 30).is_err());
        assert!(App::validate_dimension("abc", 40, 100).is_err());
        assert!(App::validate_dimension("300", 40, 100).is_err());
        // Out-of-range defaults are pulled into the allowed range
        assert_eq!(App::validate_dimension("", 1, 100), Ok(MazeConfig::MIN_DIMENSION));
        assert_eq!(App::validate_dimension("", 250, 255), Ok(MazeConfig::MAX_DIMENSION));
    }

    #[test]
    fn test_status_line_follows_session() {
        let config = VisualizationConfig::default();
        assert_eq!(
            App::status_line(Solver::Bfs, &config, None),
            "Breadth-First Search (BFS) | speed 0.50 | idle"
        );

        let mut maze = Maze::from_rows(&["S.E"]);
        let t0 = Instant::now();
        let mut session = SolveSession::start(&mut maze, Solver::AStar, &config, t0);
        assert!(
            App::status_line(Solver::AStar, &config, Some(&session))
                .ends_with("searching (0 steps)")
        );

        session.set_paused(true, t0);
        assert!(App::status_line(Solver::AStar, &config, Some(&session)).ends_with("paused"));
        session.set_paused(false, t0);

        let mut now = t0;
        while !session.is_finished() {
            now += Duration::from_millis(100);
            session.tick(&mut maze, &mut |_: Coord| {}, now);
        }
        assert!(
            App::status_line(Solver::AStar, &config, Some(&session))
                .ends_with("path found (2 steps, length 2)")
        );
    }

    #[test]
    fn test_announcer_emits_tone_and_flush() {
        let (tx, rx) = std::sync::mpsc::sync_channel(16);
        let mut announcer = Announcer {
            sender: tx,
            width: 10,
            height: 10,
            tone: ToneConfig::default(),
        };
        announcer.discovered((0, 0));
        announcer.step_finished(&Maze::new(10, 10, None));
        drop(announcer);

        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                GridEvent::Tone {
                    coord: (0, 0),
                    frequency: 300.0
                },
                GridEvent::Flush
            ]
        );
    }
}
