use crossterm::style::{Color, Stylize};

use std::fmt;

/// Classification of a single maze cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MazeCell {
    /// Traversable and not yet reached by a search.
    #[default]
    Floor,
    /// Impassable.
    Wall,
    /// Discovered by a search and waiting in its frontier.
    Active,
    /// Expanded by a search.
    Explored,
}

impl MazeCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    pub fn is_visited(self) -> bool {
        matches!(self, MazeCell::Active | MazeCell::Explored)
    }
}

/// Something drawn on top of a cell, taking precedence over its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
    /// A cell on the reconstructed solution path.
    Route,
}

fn check_width(content: &str) {
    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            content.width(),
            MazeCell::CELL_WIDTH as usize,
            "Each cell must occupy exactly two character widths."
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = content;
}

impl fmt::Display for MazeCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            MazeCell::Floor => "  ".with(Color::Reset),
            MazeCell::Wall => "⬜".with(Color::White),
            MazeCell::Active => "🟨".with(Color::Yellow),
            MazeCell::Explored => "· ".with(Color::DarkGrey),
        };
        check_width(styled_symbol.content());
        write!(f, "{}", styled_symbol)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Marker::Start => "🟩".with(Color::Green),
            Marker::Goal => "🟥".with(Color::Red),
            Marker::Route => "🟪".with(Color::Magenta),
        };
        check_width(styled_symbol.content());
        write!(f, "{}", styled_symbol)
    }
}
