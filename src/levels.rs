use crate::board::{Board, Goals, Position, Tile};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;

/// Levels shipped with the game, in play order.
pub const BUILTIN_LEVELS: &[&[&str]] = &[
    &["#####", "#@$.#", "#####"],
    &[
        "######", //
        "#    #",
        "# #@ #",
        "# $* #",
        "# .* #",
        "#    #",
        "######",
    ],
    &[
        "  ####", //
        "###  ####",
        "#     $ #",
        "# #  #$ #",
        "# . .#@ #",
        "#########",
    ],
    &[
        "  #####", //
        "###   #",
        "#.@$  #",
        "### $.#",
        "#.##$ #",
        "# # . ##",
        "#$ *$$.#",
        "#   .  #",
        "########",
    ],
];

/// Error type for level loading operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// Level text that cannot be played
    MalformedLevel(String),
    /// A level collection with no levels in it
    Empty,
    /// Level index outside the level list
    NoSuchLevel(usize),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::MalformedLevel(msg) => write!(f, "Malformed level: {}", msg),
            LevelError::Empty => write!(f, "No levels found"),
            LevelError::NoSuchLevel(index) => write!(f, "Level {} does not exist", index + 1),
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

/// A freshly parsed level: its tiles, the player start and the goal cells.
#[derive(Debug, Clone)]
pub struct Level {
    pub board: Board,
    pub player: Position,
    pub goals: Goals,
}

/// Parse a level from its rows.
///
/// Characters:
/// - `#` = Wall
/// - `.` = Goal
/// - `$` = Box
/// - `*` = Box on goal
/// - `@` = Player
/// - `+` = Player on goal
/// - anything else (including space) = Floor
///
/// Short rows are padded with floor up to the longest row. If more than one
/// player marker is present, the last one in row-major order wins.
pub fn parse_level<S: AsRef<str>>(rows: &[S]) -> Result<Level, LevelError> {
    if rows.is_empty() {
        return Err(LevelError::MalformedLevel("level has no rows".to_string()));
    }

    let height = rows.len();
    let width = rows
        .iter()
        .map(|row| row.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    let mut board = Board::new(width, height);
    let mut goals = Goals::new(width, height);
    let mut player = None;

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.as_ref().chars().enumerate() {
            let pos = Position::new(x, y);
            match ch {
                '#' => board.set_tile(pos, Tile::Wall),
                '$' => board.set_tile(pos, Tile::Box),
                '.' => {
                    board.set_tile(pos, Tile::Goal);
                    goals.add(pos);
                }
                '*' => {
                    board.set_tile(pos, Tile::BoxOnGoal);
                    goals.add(pos);
                }
                '@' => player = Some(pos),
                '+' => {
                    board.set_tile(pos, Tile::Goal);
                    goals.add(pos);
                    player = Some(pos);
                }
                _ => {}
            }
        }
    }

    let player =
        player.ok_or_else(|| LevelError::MalformedLevel("no player found".to_string()))?;

    Ok(Level {
        board,
        player,
        goals,
    })
}

/// An ordered list of level texts.
#[derive(Debug, Clone)]
pub struct Levels {
    levels: Vec<Vec<String>>,
}

impl Levels {
    /// The levels bundled with the game.
    pub fn builtin() -> Self {
        Levels {
            levels: BUILTIN_LEVELS
                .iter()
                .map(|rows| rows.iter().map(|row| row.to_string()).collect())
                .collect(),
        }
    }

    /// Parse XSB-formatted Sokoban levels from a string.
    ///
    /// Lines starting with `;` are comments and separate levels, as do empty
    /// lines. Levels are kept as text; one that cannot be played is reported
    /// by [`parse_level`] when it is selected, not here.
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in contents.lines() {
            if line.trim_start().starts_with(';') || line.trim().is_empty() {
                if !current.is_empty() {
                    levels.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(line.trim_end().to_string());
        }

        // Last level if the text doesn't end with a separator
        if !current.is_empty() {
            levels.push(current);
        }

        if levels.is_empty() {
            return Err(LevelError::Empty);
        }

        Ok(Levels { levels })
    }

    /// Parse XSB-formatted Sokoban levels from a text file.
    pub fn from_file(path: &str) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the rows of the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Get the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }
}
