use rand::Rng;
use serde::{Deserialize, Serialize};

use twenty48_engine::{Board, Move, MoveResult};

/// Whether a session can still accept moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    GameOver,
}

/// Input to the session reducer. Mapping keys or gestures to `Move` values
/// belongs to the front end, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Shift(Move),
    NewGame,
}

/// One game of 2048: current board plus score bookkeeping.
///
/// Sessions are immutable values; `apply` folds one event into the next
/// state. The serialized form is a fixed-order struct over the 16-cell
/// board and the scores, so callers can hash or persist it deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub board: Board,
    pub score: u64,
    pub best: u64,
    pub status: SessionStatus,
}

impl GameSession {
    /// Start a fresh game: empty board with two spawned tiles, score 0.
    pub fn new<R: Rng + ?Sized>(best: u64, rng: &mut R) -> Self {
        let board = Board::EMPTY
            .with_random_tile(rng)
            .with_random_tile(rng);
        GameSession {
            board,
            score: 0,
            best,
            status: SessionStatus::Active,
        }
    }

    /// Pure reducer: `(session, event) -> session`, with the RNG as the only
    /// injected effect.
    ///
    /// A shift that leaves the board unchanged spawns nothing, scores
    /// nothing, and returns the session as-is. A shift that changes the
    /// board spawns one random tile, adds the merge gain to the score, and
    /// ends the game when no move remains after the spawn. Shifts on a
    /// finished game are ignored; `NewGame` restarts while carrying `best`.
    pub fn apply<R: Rng + ?Sized>(&self, event: SessionEvent, rng: &mut R) -> GameSession {
        match event {
            SessionEvent::NewGame => GameSession::new(self.best, rng),
            SessionEvent::Shift(_) if self.status == SessionStatus::GameOver => *self,
            SessionEvent::Shift(dir) => {
                let MoveResult {
                    board,
                    changed,
                    gained,
                } = self.board.resolve(dir);
                if !changed {
                    return *self;
                }
                let board = board.with_random_tile(rng);
                let score = self.score + gained;
                let status = if board.has_moves() {
                    SessionStatus::Active
                } else {
                    SessionStatus::GameOver
                };
                GameSession {
                    board,
                    score,
                    best: self.best.max(score),
                    status,
                }
            }
        }
    }
}
