use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Direction, Pos};
use crate::level::Maze;

/// Chance per tick that a ghost picks a new heading even when it could keep going.
pub const DEFAULT_REROLL_CHANCE: f64 = 0.3;

/// Cosmetic identity; has no effect on movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostColor {
    Red,
    Pink,
    Cyan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
    pub direction: Direction,
    pub color: GhostColor,
}

impl Ghost {
    /// Spawns at `pos` with a randomly rolled legal heading.
    pub fn spawn(pos: Pos, color: GhostColor, maze: &Maze, rng: &mut impl Rng) -> Self {
        let mut ghost = Ghost {
            pos,
            direction: Direction::None,
            color,
        };
        ghost.reroll(maze, rng);
        ghost
    }

    /// Shuffles the four headings and takes the first one that is open.
    /// Leaves the heading alone and returns `false` when boxed in.
    pub fn reroll(&mut self, maze: &Maze, rng: &mut impl Rng) -> bool {
        let mut options = Direction::CARDINALS;
        options.shuffle(rng);
        match options
            .into_iter()
            .find(|&dir| !maze.is_blocked(self.pos.step(dir)))
        {
            Some(dir) => {
                self.direction = dir;
                true
            }
            None => false,
        }
    }

    /// One tick of wandering. Returns whether the ghost changed cell.
    pub fn advance(&mut self, maze: &Maze, rng: &mut impl Rng, reroll_chance: f64) -> bool {
        let jitter = rng.gen_bool(reroll_chance.clamp(0.0, 1.0));
        let forced = jitter || maze.is_blocked(self.pos.step(self.direction));
        if forced && !self.reroll(maze, rng) {
            tracing::debug!(x = self.pos.x, y = self.pos.y, color = ?self.color, "ghost boxed in");
            return false;
        }

        let next = self.pos.step(self.direction);
        if maze.is_blocked(next) || next == self.pos {
            return false;
        }
        self.pos = next;
        true
    }
}
