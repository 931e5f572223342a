use thiserror::Error;

use crate::components::Pos;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("layout has no rows")]
    EmptyLayout,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("border cell ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },

    #[error("spawn point ({}, {}) is outside the grid or inside a wall", .0.x, .0.y)]
    BadSpawn(Pos),

    #[error("two entities share the spawn point ({}, {})", .0.x, .0.y)]
    SharedSpawn(Pos),

    #[error("restart requested while the game is still running")]
    RestartWhileRunning,

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
