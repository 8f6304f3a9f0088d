use crate::game::{Direction, Game, MoveResult};
use crate::levels::{LevelError, Levels};
use tracing::info;

/// Drives play through an ordered level list: one active `Game` at a time.
pub struct Session {
    levels: Levels,
    current: usize,
    game: Game,
}

impl Session {
    /// Start playing `levels` at the given (0-indexed) level.
    pub fn new(levels: Levels, index: usize) -> Result<Self, LevelError> {
        let game = Self::load(&levels, index)?;
        Ok(Session {
            levels,
            current: index,
            game,
        })
    }

    fn load(levels: &Levels, index: usize) -> Result<Game, LevelError> {
        let rows = levels.get(index).ok_or(LevelError::NoSuchLevel(index))?;
        let game = Game::from_rows(rows)?;
        info!(
            level = index + 1,
            width = game.board().width(),
            height = game.board().height(),
            goals = game.goals().len(),
            boxes = game.board().box_count(),
            "level started"
        );
        Ok(game)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Switch to another level. On error the current level keeps running.
    pub fn select(&mut self, index: usize) -> Result<(), LevelError> {
        self.game = Self::load(&self.levels, index)?;
        self.current = index;
        Ok(())
    }

    /// Start the current level over from its text.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.select(self.current)
    }

    /// Advance to the following level. Returns false on the last level.
    pub fn next_level(&mut self) -> Result<bool, LevelError> {
        if self.current + 1 >= self.levels.len() {
            return Ok(false);
        }
        self.select(self.current + 1)?;
        Ok(true)
    }

    pub fn step(&mut self, dir: Direction) -> MoveResult {
        let result = self.game.step(dir);
        if result.is_accepted() && self.game.is_solved() {
            info!(
                level = self.current + 1,
                moves = self.game.move_count(),
                "level solved"
            );
        }
        result
    }

    pub fn undo(&mut self) -> bool {
        self.game.undo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn session() -> Session {
        let levels = Levels::from_text("#####\n#@$.#\n#####\n\n####\n#@.#\n#$ #\n####\n").unwrap();
        Session::new(levels, 0).unwrap()
    }

    #[test]
    fn test_new_out_of_range() {
        let result = Session::new(Levels::builtin(), 99);
        assert!(matches!(result, Err(LevelError::NoSuchLevel(99))));
    }

    #[test]
    fn test_play_to_solution() {
        let mut session = session();
        assert_eq!(session.level_count(), 2);

        assert_eq!(session.step(Direction::Right), MoveResult::Accepted { pushed: true });
        assert!(session.game().is_solved());
        assert_eq!(session.game().move_count(), 1);
    }

    #[test]
    fn test_restart_resets_state_and_history() {
        let mut session = session();
        session.step(Direction::Right);
        session.step(Direction::Left);

        session.restart().unwrap();

        assert_eq!(session.game().move_count(), 0);
        assert_eq!(session.game().player_pos(), Position::new(1, 1));
        assert_eq!(session.game().history_len(), 0);
        assert!(!session.undo());
    }

    #[test]
    fn test_select_and_next_level() {
        let mut session = session();

        assert!(session.next_level().unwrap());
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.game().player_pos(), Position::new(1, 1));
        assert!(session.game().is_goal(2, 1));

        // Last level: nothing changes
        session.step(Direction::Right);
        assert!(!session.next_level().unwrap());
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.game().move_count(), 1);

        session.select(0).unwrap();
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.game().move_count(), 0);
    }

    #[test]
    fn test_select_level_without_player() {
        let levels = Levels::from_text("#####\n#@$.#\n#####\n\n####\n#$.#\n####\n").unwrap();
        let mut session = Session::new(levels, 0).unwrap();
        session.step(Direction::Right);

        assert!(matches!(session.select(1), Err(LevelError::MalformedLevel(_))));
        assert!(matches!(session.next_level(), Err(LevelError::MalformedLevel(_))));
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.game().move_count(), 1);
    }

    #[test]
    fn test_select_invalid_keeps_current_level() {
        let mut session = session();
        session.step(Direction::Right);

        assert!(matches!(session.select(5), Err(LevelError::NoSuchLevel(5))));
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.game().move_count(), 1);
    }
}
