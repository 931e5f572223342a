use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::Pos;
use crate::game::{Snapshot, Status};
use crate::ghost::GhostColor;
use crate::level::Tile;

/// Terminal columns per maze cell.
pub const CELL_W: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Player,
    Ghost,
    Wall,
    Empty,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

/// Redraws only the cells that changed since the previous frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_banner: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_banner: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything (after a restart or resize).
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render(
        &mut self,
        out: &mut impl Write,
        snapshot: &Snapshot<'_>,
        term_size: (u16, u16),
    ) -> io::Result<()> {
        let maze = snapshot.maze;
        let needed_h = (maze.height() + 3) as u16;
        let needed_w = (maze.width() * CELL_W) as u16;
        let (term_w, term_h) = term_size;

        out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Items: {}  (arrows/hjkl to move, q to quit)",
            maze.remaining_items()
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..maze.height() {
            for x in 0..maze.width() {
                let cell = cell_for(snapshot, Pos::new(x as i32, y as i32));
                let idx = y * maze.width() + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, x, y, cell)?;
                }
            }
        }

        let banner = banner_for(snapshot.status);
        if self.needs_full || banner != self.last_banner {
            out.queue(MoveTo(
                self.origin_x,
                self.origin_y + maze.height() as u16,
            ))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Print(banner))?;
            out.queue(ResetColor)?;
            self.last_banner = banner.to_string();
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Ghost => "ᗣ",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Item => "· ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

pub fn cell_for(snapshot: &Snapshot<'_>, pos: Pos) -> Cell {
    if pos == snapshot.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snapshot.ghosts.iter().find(|g| g.pos == pos) {
        return Cell {
            glyph: Glyph::Ghost,
            color: ghost_color(ghost.color),
        };
    }
    match snapshot.maze.tile(pos) {
        Some(Tile::Wall) | None => Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        },
        Some(Tile::Empty) => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        Some(Tile::Item) => Cell {
            glyph: Glyph::Item,
            color: Color::White,
        },
    }
}

fn ghost_color(color: GhostColor) -> Color {
    match color {
        GhostColor::Red => Color::Red,
        GhostColor::Pink => Color::Magenta,
        GhostColor::Cyan => Color::Cyan,
    }
}

fn banner_for(status: Status) -> &'static str {
    match status {
        Status::Running => "",
        Status::Lost => "You lost! Press r to restart or q to quit.",
        Status::Won => "You won! Press r to restart or q to quit.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::level::Layout;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn classic_game() -> Game {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        Game::new(Layout::classic(), 0.3, &mut rng).unwrap()
    }

    #[test]
    fn entities_cover_tiles() {
        let game = classic_game();
        let snapshot = game.snapshot();
        assert_eq!(cell_for(&snapshot, Pos::new(1, 1)).glyph, Glyph::Player);
        let red = cell_for(&snapshot, Pos::new(26, 1));
        assert_eq!(red.glyph, Glyph::Ghost);
        assert_eq!(red.color, Color::Red);
        assert_eq!(cell_for(&snapshot, Pos::new(0, 0)).glyph, Glyph::Wall);
        assert_eq!(cell_for(&snapshot, Pos::new(2, 1)).glyph, Glyph::Item);
    }

    #[test]
    fn small_terminal_gets_a_notice() {
        let game = classic_game();
        let mut renderer = Renderer::new(game.maze().width(), game.maze().height());
        let mut out = Vec::new();
        renderer
            .render(&mut out, &game.snapshot(), (20, 10))
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn second_frame_only_redraws_changes() {
        let game = classic_game();
        let mut renderer = Renderer::new(game.maze().width(), game.maze().height());
        let mut first = Vec::new();
        renderer
            .render(&mut first, &game.snapshot(), (80, 30))
            .unwrap();
        let text = String::from_utf8_lossy(&first);
        assert!(text.contains("Items: "));
        assert!(text.contains("██"));

        let mut second = Vec::new();
        renderer
            .render(&mut second, &game.snapshot(), (80, 30))
            .unwrap();
        assert!(second.len() < first.len());
        assert!(!String::from_utf8_lossy(&second).contains("██"));
    }
}
