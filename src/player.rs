use crate::components::{Direction, Pos};
use crate::level::Maze;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacman {
    pub pos: Pos,
    pub direction: Direction,
    /// Last requested turn; kept until the maze lets it happen.
    pub next_direction: Direction,
}

impl Pacman {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            direction: Direction::None,
            next_direction: Direction::None,
        }
    }

    /// Adopts the buffered turn if it is open, then steps along the current
    /// heading unless a wall is in the way. Returns whether the cell changed.
    pub fn advance(&mut self, maze: &Maze) -> bool {
        if !maze.is_blocked(self.pos.step(self.next_direction)) {
            self.direction = self.next_direction;
        }

        let next = self.pos.step(self.direction);
        if maze.is_blocked(next) || next == self.pos {
            return false;
        }
        self.pos = next;
        true
    }
}
