//! Controller - turns tagged movement requests into board operations
//!
//! The board engine knows nothing about where a request came from. This layer owns
//! the policy that does:
//!
//! - a player-initiated down move that succeeds earns [`SOFT_DROP_REWARD`]; a timer
//!   tick earns nothing
//! - a down move that fails settles the piece: merge, clear, add the clear bonus,
//!   spawn the next piece, detect game over
//! - a hard drop falls all the way and settles in the same call
//!
//! Requests after game over are ignored until [`GameController::new_game`].

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::{BoardEngine, HoldOutcome, LineClearResult, SettleOutcome, ViewSnapshot};
use crate::types::{BoardConfig, ConfigError, MoveEvent, MoveKind, MoveSource, SOFT_DROP_REWARD};

/// What the caller draws after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownResult {
    /// Present only when the event settled a piece
    pub clear: Option<LineClearResult>,
    pub view: ViewSnapshot,
}

#[derive(Debug, Clone)]
pub struct GameController<R = StdRng> {
    board: BoardEngine<R>,
    game_over: bool,
    lines: u32,
    pieces: u32,
}

impl GameController<StdRng> {
    /// Start a reproducible game on a fresh board
    pub fn seeded(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::new(BoardEngine::seeded(config, seed)?))
    }
}

impl<R: Rng> GameController<R> {
    /// Take ownership of a board and start a game on it
    pub fn new(board: BoardEngine<R>) -> Self {
        let mut controller = Self {
            board,
            game_over: false,
            lines: 0,
            pieces: 0,
        };
        controller.new_game();
        controller
    }

    /// Reset the board and spawn the first piece
    pub fn new_game(&mut self) -> ViewSnapshot {
        self.board.reset();
        self.lines = 0;
        self.pieces = 0;
        self.game_over = self.spawn();
        self.board.snapshot()
    }

    pub fn board(&self) -> &BoardEngine<R> {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Rows removed since the game started
    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned since the game started
    pub fn pieces_spawned(&self) -> u32 {
        self.pieces
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn view(&self) -> ViewSnapshot {
        self.board.snapshot()
    }

    /// Apply one request
    pub fn handle(&mut self, event: MoveEvent) -> DownResult {
        if self.game_over {
            return self.unchanged();
        }

        match event.kind {
            MoveKind::Down => self.on_down(event.source),
            MoveKind::HardDrop => {
                let outcome = self.board.hard_drop();
                self.pieces += 1;
                self.finish_settle(outcome)
            }
            MoveKind::Left => {
                self.board.move_left();
                self.unchanged()
            }
            MoveKind::Right => {
                self.board.move_right();
                self.unchanged()
            }
            MoveKind::Rotate => {
                self.board.rotate();
                self.unchanged()
            }
            MoveKind::Hold => {
                if let HoldOutcome::Stored { game_over } = self.board.hold_swap() {
                    self.pieces += 1;
                    self.set_game_over(game_over);
                }
                self.unchanged()
            }
        }
    }

    fn on_down(&mut self, source: MoveSource) -> DownResult {
        if self.board.move_down() {
            if source == MoveSource::User {
                self.board.add_score(SOFT_DROP_REWARD);
            }
            return self.unchanged();
        }

        let outcome = self.board.settle();
        self.pieces += 1;
        self.finish_settle(outcome)
    }

    fn finish_settle(&mut self, outcome: SettleOutcome) -> DownResult {
        let clear = outcome.clear;
        if clear.lines_removed > 0 {
            self.board.add_score(clear.score_bonus);
            self.lines += clear.lines_removed as u32;
            debug!(
                lines = clear.lines_removed,
                total = self.lines,
                score = self.board.score(),
                "line clear scored"
            );
        }
        self.set_game_over(outcome.game_over);

        DownResult {
            clear: Some(clear),
            view: self.board.snapshot(),
        }
    }

    fn spawn(&mut self) -> bool {
        self.pieces += 1;
        self.board.spawn_piece()
    }

    fn set_game_over(&mut self, game_over: bool) {
        if game_over && !self.game_over {
            info!(
                score = self.board.score(),
                lines = self.lines,
                pieces = self.pieces,
                "game over"
            );
        }
        self.game_over |= game_over;
    }

    fn unchanged(&self) -> DownResult {
        DownResult {
            clear: None,
            view: self.board.snapshot(),
        }
    }
}
