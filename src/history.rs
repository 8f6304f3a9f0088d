use crate::board::{Board, Position};
use arrayvec::ArrayVec;

pub const HISTORY_CAPACITY: usize = 100;

/// A full copy of the mutable game state, taken before a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub player: Position,
    pub moves: usize,
}

/// Bounded undo stack. Once full, recording a new snapshot evicts the oldest.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: ArrayVec<Snapshot, HISTORY_CAPACITY>,
}

impl History {
    pub fn new() -> Self {
        History {
            snapshots: ArrayVec::new(),
        }
    }

    pub fn record(&mut self, snapshot: Snapshot) {
        if self.snapshots.is_full() {
            self.snapshots.remove(0);
        }
        self.snapshots.push(snapshot);
    }

    /// Pop the most recent snapshot, if any.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;

    fn snapshot(moves: usize) -> Snapshot {
        Snapshot {
            board: Board::new(2, 1),
            player: Position::new(0, 0),
            moves,
        }
    }

    #[test]
    fn test_undo_empty() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));

        assert_eq!(history.undo().unwrap().moves, 2);
        assert_eq!(history.undo().unwrap().moves, 1);
        assert_eq!(history.undo().unwrap().moves, 0);
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut history = History::new();
        for moves in 0..150 {
            history.record(snapshot(moves));
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        let mut oldest = None;
        while let Some(snapshot) = history.undo() {
            oldest = Some(snapshot.moves);
        }
        assert_eq!(oldest, Some(50));
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut history = History::new();
        let mut board = Board::new(2, 1);
        history.record(Snapshot {
            board: board.clone(),
            player: Position::new(0, 0),
            moves: 0,
        });

        board.set_tile(Position::new(1, 0), Tile::Wall);

        let restored = history.undo().unwrap();
        assert_eq!(restored.board.get_tile(Position::new(1, 0)), Tile::Floor);
    }
}
