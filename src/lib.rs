//! Grid maze chase: a player eats every item in a fixed maze while randomly
//! wandering ghosts roam the same corridors. The simulation core lives in
//! [`level`], [`player`], [`ghost`] and [`game`]; [`session`] and [`render`]
//! drive it from a terminal.

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod level;
pub mod player;
pub mod render;
pub mod session;

pub use components::{Direction, Pos};
pub use config::Settings;
pub use error::{GameError, GameResult};
pub use game::{Game, GhostView, Snapshot, Status};
pub use ghost::{Ghost, GhostColor};
pub use level::{Layout, Maze, Tile};
pub use player::Pacman;
