use crate::game::{ALL_DIRECTIONS, Direction};
use std::error::Error;
use std::fmt;

/// One player action, decoded from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    Restart,
    Next,
    /// Select a level (0-indexed)
    Select(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnknownKey(char),
    BadLevelNumber(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnknownKey(ch) => write!(f, "unknown key '{}'", ch),
            InputError::BadLevelNumber(text) => write!(f, "invalid level number '{}'", text),
        }
    }
}

impl Error for InputError {}

/// Decode a string of move keys: LURD letters in either case, `z` to undo
/// and `!` to restart. Whitespace is ignored.
pub fn parse_keys(keys: &str) -> Result<Vec<Command>, InputError> {
    keys.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            let lower = ch.to_ascii_lowercase();
            if let Some(dir) = ALL_DIRECTIONS.into_iter().find(|dir| dir.letter() == lower) {
                return Ok(Command::Move(dir));
            }
            match lower {
                'z' => Ok(Command::Undo),
                '!' => Ok(Command::Restart),
                _ => Err(InputError::UnknownKey(ch)),
            }
        })
        .collect()
}

/// Decode one line typed at the interactive prompt.
pub fn parse_line(line: &str) -> Result<Vec<Command>, InputError> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("quit") | Some("q") => Ok(vec![Command::Quit]),
        Some("restart") => Ok(vec![Command::Restart]),
        Some("next") => Ok(vec![Command::Next]),
        Some("undo") => Ok(vec![Command::Undo]),
        Some("level") => {
            let arg = words.next().unwrap_or("");
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(vec![Command::Select(n - 1)]),
                _ => Err(InputError::BadLevelNumber(arg.to_string())),
            }
        }
        _ => parse_keys(line),
    }
}
