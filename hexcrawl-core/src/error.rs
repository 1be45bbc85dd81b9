//! Errors for rejected player actions

use crate::board::Hex;
use crate::game::GameState;

/// Why an action was refused. The game is left untouched in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("game is not in progress (state: {0:?})")]
    NotPlaying(GameState),

    #[error("hex {0:?} is not on the board")]
    OffBoard(Hex),

    #[error("no path to {0:?}")]
    Unreachable(Hex),

    #[error("hex {0:?} is occupied or blocked")]
    Blocked(Hex),

    #[error("hex {0:?} is neither the exit nor the teleport crystal")]
    NotATarget(Hex),

    #[error("fast moves are only allowed while no enemy can reach the player")]
    Unsafe,

    #[error("no teleport charges left")]
    NoTeleports,

    #[error("hex {0:?} is outside teleport range")]
    OutOfRange(Hex),

    #[error("barrier line has no free cells")]
    EmptyBarrier,
}
