use crate::components::Pos;
use crate::error::{GameError, GameResult};
use crate::ghost::GhostColor;

pub const GRID_W: usize = 28;
pub const GRID_H: usize = 20;

// '1' wall, '0' open floor, '2' item. Open floor is seeded with items too.
const LEVEL_MAP: [&str; GRID_H] = [
    "1111111111111111111111111111",
    "1000000000000000000000000001",
    "1011110111110111110111110101",
    "1020000100000100000100000101",
    "1011110111110111110111110101",
    "1000000000000000000000000001",
    "1011110111110111110111110101",
    "1000000100000000000100000001",
    "1110110110111111011010110111",
    "1000100000100000100000100001",
    "1011101110101110101110111101",
    "1000000100000000000100000001",
    "1011110111110111110111110101",
    "1000000000000100000000000001",
    "1011110111110111110111110101",
    "1020000100000000000100000201",
    "1011110111110111110111110101",
    "1000000000000000000000000001",
    "1000000000000000000000000001",
    "1111111111111111111111111111",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Item,
}

/// The tile grid. Cells only ever change `Item -> Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    items_left: usize,
}

impl Maze {
    /// Builds a maze from rows of `'1'`/`'0'`/`'2'` symbols. Every open cell
    /// starts with an item except the `spawns`, which start empty.
    pub fn parse<S: AsRef<str>>(rows: &[S], spawns: &[Pos]) -> GameResult<Maze> {
        let height = rows.len();
        let width = match rows.first() {
            Some(row) => row.as_ref().chars().count(),
            None => return Err(GameError::EmptyLayout),
        };
        if width == 0 {
            return Err(GameError::EmptyLayout);
        }

        let mut grid = Vec::with_capacity(height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GameError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let mut tiles = Vec::with_capacity(width);
            for (x, symbol) in row.chars().enumerate() {
                let tile = match symbol {
                    '1' => Tile::Wall,
                    '0' | '2' => Tile::Item,
                    _ => return Err(GameError::UnknownSymbol { symbol, x, y }),
                };
                if tile != Tile::Wall && (x == 0 || y == 0 || x == width - 1 || y == height - 1)
                {
                    return Err(GameError::OpenBorder { x, y });
                }
                tiles.push(tile);
            }
            grid.push(tiles);
        }

        let mut maze = Maze {
            width,
            height,
            grid,
            items_left: 0,
        };

        for (i, &spawn) in spawns.iter().enumerate() {
            if maze.is_blocked(spawn) {
                return Err(GameError::BadSpawn(spawn));
            }
            if spawns[..i].contains(&spawn) {
                return Err(GameError::SharedSpawn(spawn));
            }
            let (x, y) = (spawn.x as usize, spawn.y as usize);
            maze.grid[y][x] = Tile::Empty;
        }

        maze.items_left = maze
            .grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == Tile::Item)
            .count();
        Ok(maze)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `None` for positions outside the grid.
    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.grid[y][x])
    }

    /// Off-grid positions count as blocked.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        matches!(self.tile(pos), None | Some(Tile::Wall))
    }

    /// Clears the item under `pos`, if any. Returns whether one was eaten.
    pub fn consume_item_at(&mut self, pos: Pos) -> bool {
        if self.tile(pos) != Some(Tile::Item) {
            return false;
        }
        self.grid[pos.y as usize][pos.x as usize] = Tile::Empty;
        self.items_left = self.items_left.saturating_sub(1);
        true
    }

    pub fn remaining_items(&self) -> usize {
        self.items_left
    }
}

/// Everything needed to (re)build a session: the rows plus spawn points.
/// Ghost spawns are listed in update order.
#[derive(Debug, Clone)]
pub struct Layout {
    pub rows: Vec<String>,
    pub player_spawn: Pos,
    pub ghost_spawns: Vec<(Pos, GhostColor)>,
}

impl Layout {
    pub fn classic() -> Self {
        Self {
            rows: LEVEL_MAP.iter().map(|row| row.to_string()).collect(),
            player_spawn: Pos::new(1, 1),
            ghost_spawns: vec![
                (Pos::new(26, 1), GhostColor::Red),
                (Pos::new(26, 18), GhostColor::Pink),
                (Pos::new(1, 18), GhostColor::Cyan),
            ],
        }
    }

    pub fn spawn_points(&self) -> Vec<Pos> {
        let mut spawns = vec![self.player_spawn];
        spawns.extend(self.ghost_spawns.iter().map(|(pos, _)| *pos));
        spawns
    }

    pub fn build_maze(&self) -> GameResult<Maze> {
        Maze::parse(&self.rows, &self.spawn_points())
    }
}
