/// Grid coordinate. Signed so that a query one step past the border is
/// still a representable position (and simply reports as blocked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `dir`. `Direction::None` yields `self`.
    pub fn step(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order the ghosts start from before shuffling.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}
