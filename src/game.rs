use crate::board::{Board, Goals, Position, Tile};
use crate::history::{History, Snapshot};
use crate::levels::{LevelError, parse_level};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// The LURD letter for a step in this direction.
    pub fn letter(&self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// Why a move was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The player or the pushed box would leave the board
    OutOfBounds,
    /// A wall stands where the player wants to step
    WallBlocked,
    /// The box behind the target cell cannot move
    PushBlocked,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutOfBounds => write!(f, "out of bounds"),
            Rejection::WallBlocked => write!(f, "blocked by a wall"),
            Rejection::PushBlocked => write!(f, "box cannot be pushed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Accepted { pushed: bool },
    Rejected(Rejection),
}

impl MoveResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveResult::Accepted { .. })
    }
}

/// State of one level being played: tiles, goals, player, move counter and
/// the undo history. Presentation code only reads it; every change goes
/// through `attempt_move` and `undo`.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    goals: Goals,
    player: Position,
    moves: usize,
    history: History,
}

impl Game {
    /// Parse a level from its rows and start it with a fresh move counter.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let level = parse_level(rows)?;
        Ok(Game {
            board: level.board,
            goals: level.goals,
            player: level.player,
            moves: 0,
            history: History::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn player_pos(&self) -> Position {
        self.player
    }

    pub fn move_count(&self) -> usize {
        self.moves
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_goal(&self, x: usize, y: usize) -> bool {
        self.goals.contains(Position::new(x, y))
    }

    /// Check if every goal holds a box (win condition)
    pub fn is_solved(&self) -> bool {
        self.board.is_solved(&self.goals)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            player: self.player,
            moves: self.moves,
        }
    }

    pub fn step(&mut self, dir: Direction) -> MoveResult {
        let (dx, dy) = dir.delta();
        self.attempt_move(dx, dy)
    }

    /// Try to move the player by (dx, dy), pushing a box if one is in the way.
    ///
    /// The current state is recorded in the history before anything is
    /// checked, so a rejected move still takes up an undo slot. Rejections
    /// leave the board, player and move counter untouched.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> MoveResult {
        self.history.record(self.snapshot());

        let result = self.apply_move(dx, dy);
        match result {
            MoveResult::Accepted { pushed } => {
                debug!(dx, dy, pushed, player = %self.player, moves = self.moves, "move accepted");
            }
            MoveResult::Rejected(reason) => {
                debug!(dx, dy, player = %self.player, %reason, "move rejected");
            }
        }
        result
    }

    fn apply_move(&mut self, dx: i32, dy: i32) -> MoveResult {
        let Some(target) = self.board.offset(self.player, dx, dy) else {
            return MoveResult::Rejected(Rejection::OutOfBounds);
        };

        let target_tile = self.board.get_tile(target);
        if target_tile == Tile::Wall {
            return MoveResult::Rejected(Rejection::WallBlocked);
        }

        let pushed = target_tile.has_box();
        if pushed {
            let Some(box_target) = self.board.offset(target, dx, dy) else {
                return MoveResult::Rejected(Rejection::OutOfBounds);
            };

            let box_target_tile = self.board.get_tile(box_target);
            if box_target_tile == Tile::Wall || box_target_tile.has_box() {
                return MoveResult::Rejected(Rejection::PushBlocked);
            }

            // Goal membership decides what is left behind, not the old tile
            let vacated = if self.goals.contains(target) {
                Tile::Goal
            } else {
                Tile::Floor
            };
            let landed = if self.goals.contains(box_target) {
                Tile::BoxOnGoal
            } else {
                Tile::Box
            };
            self.board.set_tile(target, vacated);
            self.board.set_tile(box_target, landed);
        }

        self.player = target;
        self.moves += 1;

        MoveResult::Accepted { pushed }
    }

    /// Restore the state from before the last recorded move.
    /// Returns false, changing nothing, if the history is empty.
    pub fn undo(&mut self) -> bool {
        if self.history.is_empty() {
            debug!("nothing to undo");
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.board = snapshot.board;
                self.player = snapshot.player;
                self.moves = snapshot.moves;
                debug!(player = %self.player, moves = self.moves, "undo");
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.board.rows().enumerate() {
            let mut line = String::new();
            for (x, &tile) in row.iter().enumerate() {
                let ch = if Position::new(x, y) == self.player {
                    if self.is_goal(x, y) { '+' } else { '@' }
                } else {
                    match tile {
                        Tile::Wall => '#',
                        Tile::Floor => ' ',
                        Tile::Goal => '.',
                        Tile::Box => '$',
                        Tile::BoxOnGoal => '*',
                    }
                };
                line.push(ch);
            }
            // Trim trailing spaces to match original input format
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
