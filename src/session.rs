//! Game session: owns the live board and score, drives the play loop.

use crate::engine::{Board, Direction};
use crate::ui::{self, InputEvent};
use rand::Rng;
use std::io;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No direction could change the board.
    Lost,
    /// The player pressed a quit key.
    Quit,
}

/// One game of 2048. The board and score are owned here and mutated only by
/// this controller; the engine itself is pure.
pub struct Session {
    board: Board,
    score: u64,
}

impl Session {
    pub fn new() -> Self {
        Session {
            board: Board::EMPTY,
            score: 0,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Apply one directional move to the live board, folding any merge
    /// points into the score. Returns whether the board changed.
    pub fn apply(&mut self, dir: Direction) -> bool {
        let outcome = self.board.shift(dir);
        self.board = outcome.board;
        self.score += outcome.points;
        outcome.moved
    }

    /// Spawn one tile on an empty cell. False means the board was full,
    /// which the run loop's spawn-only-after-a-move rule never lets happen.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        match self.board.with_random_tile(rng) {
            Some(board) => {
                self.board = board;
                true
            }
            None => false,
        }
    }

    /// Play until the board is stuck or the player quits.
    ///
    /// Per iteration: spawn a tile if the previous move changed the board
    /// (and unconditionally on the first pass), render, stop on a dead
    /// board, then block for input. Unmapped keys move nothing and spawn
    /// nothing.
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        let mut rng = rand::thread_rng();
        let mut spawn_pending = true;
        let mut last_key = None;
        loop {
            if spawn_pending {
                self.spawn_tile(&mut rng);
            }
            ui::render(&self.board, self.score, last_key)?;
            if self.board.is_game_over() {
                ui::render_loss()?;
                ui::wait_for_key()?;
                return Ok(SessionEnd::Lost);
            }
            match ui::read_input()? {
                InputEvent::Dir(dir) => {
                    last_key = Some(dir.label());
                    spawn_pending = self.apply(dir);
                }
                InputEvent::Quit => return Ok(SessionEnd::Quit),
                InputEvent::Other => {
                    last_key = None;
                    spawn_pending = false;
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn apply_accumulates_merge_points() {
        let mut session = Session::new();
        let mut board = session.board();
        board.set(3, 0, 2);
        board.set(3, 1, 2);
        session.board = board;

        assert!(session.apply(Direction::Left));
        assert_eq!(session.board().rows()[3], [4, 0, 0, 0]);
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn noop_move_changes_nothing() {
        let mut session = Session::new();
        session.board.set(0, 0, 2);

        // Already settled against the top-left corner in both axes.
        assert!(!session.apply(Direction::Left));
        assert!(!session.apply(Direction::Up));
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().count_empty(), 15);
    }

    #[test]
    fn spawn_reports_full_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new();
        for _ in 0..16 {
            assert!(session.spawn_tile(&mut rng));
        }
        assert!(!session.spawn_tile(&mut rng));
        assert_eq!(session.board().count_empty(), 0);
    }

    #[test]
    fn score_is_monotonic_over_a_full_game() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut session = Session::new();
        session.spawn_tile(&mut rng);

        let mut last_score = 0;
        let mut dir_idx = 0;
        while !session.board().is_game_over() {
            let dir = Direction::ALL[dir_idx % 4];
            dir_idx += 1;
            if session.apply(dir) {
                session.spawn_tile(&mut rng);
            }
            assert!(session.score() >= last_score);
            last_score = session.score();
        }
    }

    #[test]
    fn probing_game_over_leaves_session_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new();
        session.spawn_tile(&mut rng);
        session.spawn_tile(&mut rng);

        let board = session.board();
        let score = session.score();
        let _ = session.board().is_game_over();
        assert_eq!(session.board(), board);
        assert_eq!(session.score(), score);
    }
}
