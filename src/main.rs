use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing_subscriber::EnvFilter;

use pacman_grid::{session, GameResult, Settings};

fn main() -> GameResult<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = session::run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(err) = &result {
        tracing::error!(%err, "session ended with an error");
    }
    result
}

/// The game owns the terminal, so logs only go to `PACMAN_LOG` when it is set.
fn init_logging(settings: &Settings) -> GameResult<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
