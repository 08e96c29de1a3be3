//! Console module - line commands in, text grid out

use std::fmt::Write;

use crate::core::EngineView;
use crate::types::{Color, Command};

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(Command),
    Save(String),
    Quit,
}

impl ConsoleInput {
    /// Parse a trimmed line. Returns None for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(Self::Quit),
            "save" if !rest.is_empty() => Some(Self::Save(rest.to_string())),
            other if rest.is_empty() => Command::from_str(other).map(Self::Command),
            _ => None,
        }
    }
}

/// Text dump of a view: `#` locked, `@` active piece, `.` empty
pub fn render_text(view: &EngineView) -> String {
    let mut out = String::with_capacity((view.width() + 3) * (view.height() + 3));
    let _ = writeln!(out, "+{}+", "-".repeat(view.width()));
    for row in &view.cells {
        out.push('|');
        for cell in row {
            out.push(if cell.locked {
                '#'
            } else if cell.color != Color::BACKGROUND {
                '@'
            } else {
                '.'
            });
        }
        out.push_str("|\n");
    }
    let _ = writeln!(out, "+{}+", "-".repeat(view.width()));

    let status = if !view.game_on {
        " GAME OVER"
    } else if view.paused {
        " PAUSED"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "score {}  next {}{}",
        view.score,
        view.next.kind.as_str(),
        status
    );
    out
}
