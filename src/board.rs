use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    Box,
    Goal,
    BoxOnGoal,
}

impl Tile {
    pub fn has_box(self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnGoal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The set of goal cells of a level, fixed once the level is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goals {
    // Goal positions in row-major scan order
    positions: Vec<Position>,
    // One flag per cell, indexed by y * width + x
    mask: Vec<bool>,
    width: usize,
}

impl Goals {
    pub fn new(width: usize, height: usize) -> Self {
        Goals {
            positions: Vec::new(),
            mask: vec![false; width * height],
            width,
        }
    }

    pub fn add(&mut self, pos: Position) {
        let idx = pos.y * self.width + pos.x;
        if !self.mask[idx] {
            self.mask[idx] = true;
            self.positions.push(pos);
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        let height = self.mask.len() / self.width.max(1);
        pos.x < self.width && pos.y < height && self.mask[pos.y * self.width + pos.x]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}

/// Tile layout of a level. Player presence is never encoded in a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Board {
    /// An all-floor board of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            tiles: vec![Tile::Floor; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get_tile(&self, pos: Position) -> Tile {
        self.tiles[pos.y * self.width + pos.x]
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        self.tiles[pos.y * self.width + pos.x] = tile;
    }

    /// Iterate over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // chunks() rejects a zero size; a zero-width board has no tiles anyway
        self.tiles.chunks(self.width.max(1))
    }

    /// Step from `pos` by (dx, dy).
    /// Returns None if the new position falls outside the board.
    pub fn offset(&self, pos: Position, dx: i32, dy: i32) -> Option<Position> {
        let new_x = pos.x as i64 + dx as i64;
        let new_y = pos.y as i64 + dy as i64;

        if new_x >= 0 && new_y >= 0 && new_x < self.width as i64 && new_y < self.height as i64 {
            Some(Position::new(new_x as usize, new_y as usize))
        } else {
            None
        }
    }

    pub fn box_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.has_box()).count()
    }

    /// Check if every goal holds a box (win condition)
    pub fn is_solved(&self, goals: &Goals) -> bool {
        goals.iter().all(|pos| self.get_tile(pos) == Tile::BoxOnGoal)
    }
}
