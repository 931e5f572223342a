use rand::Rng;

use crate::components::{Direction, Pos};
use crate::error::{GameError, GameResult};
use crate::ghost::{Ghost, GhostColor};
use crate::level::{Layout, Maze};
use crate::player::Pacman;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Lost,
    Won,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostView {
    pub pos: Pos,
    pub color: GhostColor,
}

/// What a renderer needs after a tick.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: Pos,
    pub ghosts: Vec<GhostView>,
    pub status: Status,
    pub tick: u64,
}

pub struct Game {
    layout: Layout,
    initial_maze: Maze,
    maze: Maze,
    pacman: Pacman,
    ghosts: Vec<Ghost>,
    status: Status,
    reroll_chance: f64,
    tick: u64,
}

impl Game {
    pub fn new(layout: Layout, reroll_chance: f64, rng: &mut impl Rng) -> GameResult<Game> {
        let initial_maze = layout.build_maze()?;
        let maze = initial_maze.clone();
        let pacman = Pacman::new(layout.player_spawn);
        let ghosts = spawn_ghosts(&layout, &maze, rng);
        Ok(Game {
            layout,
            initial_maze,
            maze,
            pacman,
            ghosts,
            status: Status::Running,
            reroll_chance,
            tick: 0,
        })
    }

    /// Buffers a turn request. `Direction::None` means "no new input".
    pub fn steer(&mut self, dir: Direction) {
        if dir != Direction::None {
            self.pacman.next_direction = dir;
        }
    }

    /// Advances the world by one tick. Does nothing once the game is over.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Status {
        if self.status.is_over() {
            return self.status;
        }
        self.tick += 1;

        self.pacman.advance(&self.maze);
        self.maze.consume_item_at(self.pacman.pos);

        for ghost in self.ghosts.iter_mut() {
            ghost.advance(&self.maze, rng, self.reroll_chance);
        }

        if let Some(ghost) = self.ghosts.iter().find(|g| g.pos == self.pacman.pos) {
            tracing::info!(
                tick = self.tick,
                x = ghost.pos.x,
                y = ghost.pos.y,
                color = ?ghost.color,
                "caught by a ghost"
            );
            self.status = Status::Lost;
        } else if self.maze.remaining_items() == 0 {
            tracing::info!(tick = self.tick, "all items eaten");
            self.status = Status::Won;
        }
        self.status
    }

    /// Rebuilds maze, player and ghosts from the layout. Only allowed once
    /// the game has ended.
    pub fn restart(&mut self, rng: &mut impl Rng) -> GameResult<()> {
        if !self.status.is_over() {
            return Err(GameError::RestartWhileRunning);
        }
        let maze = self.initial_maze.clone();
        let ghosts = spawn_ghosts(&self.layout, &maze, rng);
        self.maze = maze;
        self.ghosts = ghosts;
        self.pacman = Pacman::new(self.layout.player_spawn);
        self.status = Status::Running;
        self.tick = 0;
        tracing::info!(items = self.maze.remaining_items(), "game restarted");
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: self.pacman.pos,
            ghosts: self
                .ghosts
                .iter()
                .map(|g| GhostView {
                    pos: g.pos,
                    color: g.color,
                })
                .collect(),
            status: self.status,
            tick: self.tick,
        }
    }
}

fn spawn_ghosts(layout: &Layout, maze: &Maze, rng: &mut impl Rng) -> Vec<Ghost> {
    layout
        .ghost_spawns
        .iter()
        .map(|&(pos, color)| Ghost::spawn(pos, color, maze, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layout(rows: &[&str], player: Pos, ghosts: &[Pos]) -> Layout {
        Layout {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            player_spawn: player,
            ghost_spawns: ghosts.iter().map(|&p| (p, GhostColor::Red)).collect(),
        }
    }

    // Row 5 is a corridor from (1,5) to (5,5); everything else is wall.
    fn ambush() -> Layout {
        layout(
            &[
                "1111111", "1111111", "1111111", "1111111", "1111111", "1000001", "1111111",
            ],
            Pos::new(5, 5),
            &[Pos::new(1, 5)],
        )
    }

    #[test]
    fn ghost_arrival_loses_on_that_tick() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut game = Game::new(ambush(), 0.0, &mut rng).unwrap();
        for _ in 0..3 {
            assert_eq!(game.tick(&mut rng), Status::Running);
        }
        assert_eq!(game.tick(&mut rng), Status::Lost);
        assert_eq!(game.ghosts()[0].pos, Pos::new(5, 5));

        let maze = game.maze().clone();
        let ghosts = game.ghosts().to_vec();
        let pacman = game.pacman().clone();
        game.steer(Direction::Left);
        assert_eq!(game.tick(&mut rng), Status::Lost);
        assert_eq!(game.maze(), &maze);
        assert_eq!(game.ghosts(), &ghosts[..]);
        assert_eq!(game.pacman().pos, pacman.pos);
        assert_eq!(game.snapshot().tick, 4);
    }

    #[test]
    fn eating_the_last_item_wins() {
        let rows = ["11111", "10111", "11101", "11101", "11111"];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut game = Game::new(
            layout(&rows, Pos::new(3, 2), &[Pos::new(1, 1)]),
            0.3,
            &mut rng,
        )
        .unwrap();
        assert_eq!(game.maze().remaining_items(), 1);

        game.steer(Direction::Down);
        assert_eq!(game.tick(&mut rng), Status::Won);
        assert_eq!(game.pacman().pos, Pos::new(3, 3));
        assert_eq!(game.maze().remaining_items(), 0);
        assert_eq!(game.ghosts()[0].pos, Pos::new(1, 1));

        game.steer(Direction::Up);
        assert_eq!(game.tick(&mut rng), Status::Won);
        assert_eq!(game.pacman().pos, Pos::new(3, 3));
    }

    #[test]
    fn swapping_cells_is_not_a_collision() {
        let rows = ["111111", "100001", "111111"];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut game = Game::new(
            layout(&rows, Pos::new(3, 1), &[Pos::new(4, 1)]),
            0.0,
            &mut rng,
        )
        .unwrap();
        game.steer(Direction::Right);
        assert_eq!(game.tick(&mut rng), Status::Running);
        assert_eq!(game.pacman().pos, Pos::new(4, 1));
        assert_eq!(game.ghosts()[0].pos, Pos::new(3, 1));
    }

    #[test]
    fn none_does_not_clear_a_buffered_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = Game::new(Layout::classic(), 0.3, &mut rng).unwrap();
        game.steer(Direction::Down);
        game.steer(Direction::None);
        assert_eq!(game.pacman().next_direction, Direction::Down);
    }

    #[test]
    fn restart_only_after_the_game_ends() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut game = Game::new(ambush(), 0.0, &mut rng).unwrap();
        let fresh = game.maze().clone();
        assert!(matches!(
            game.restart(&mut rng),
            Err(GameError::RestartWhileRunning)
        ));

        game.steer(Direction::Left);
        while game.tick(&mut rng) == Status::Running {}
        assert_eq!(game.status(), Status::Lost);
        assert!(game.maze().remaining_items() < fresh.remaining_items());

        game.restart(&mut rng).unwrap();
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.maze(), &fresh);
        assert_eq!(game.pacman(), &Pacman::new(Pos::new(5, 5)));
        assert_eq!(game.ghosts()[0].pos, Pos::new(1, 5));
        assert_eq!(game.ghosts()[0].direction, Direction::Right);
        assert_eq!(game.snapshot().tick, 0);
    }

    #[test]
    fn snapshot_lists_ghosts_in_spawn_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let game = Game::new(Layout::classic(), 0.3, &mut rng).unwrap();
        let snapshot = game.snapshot();
        let colors: Vec<_> = snapshot.ghosts.iter().map(|g| g.color).collect();
        assert_eq!(
            colors,
            vec![GhostColor::Red, GhostColor::Pink, GhostColor::Cyan]
        );
        assert_eq!(snapshot.player, Pos::new(1, 1));
        assert_eq!(snapshot.status, Status::Running);
    }

    #[test]
    fn invalid_layout_is_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let bad = layout(&["111", "101", "111"], Pos::new(0, 0), &[]);
        assert!(matches!(
            Game::new(bad, 0.3, &mut rng),
            Err(GameError::BadSpawn(_))
        ));
    }
}
