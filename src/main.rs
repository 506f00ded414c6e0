use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;
use typezenith::{
    app::{App, BoxedGame, Flow},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, MAX_COUNTDOWN_SECS, MIN_COUNTDOWN_SECS},
    cue::{CueSink, TerminalCues},
    dice::{Dice, SeededDice},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    store::{MemoryStore, ScoreStore, SqliteStore},
    ui, Game,
};

/// typing tower game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sentence on screen to stack it onto your tower. Clean streaks build combos that multiply your score; the countdown decides when the tower stops growing."
)]
pub struct Cli {
    /// countdown length in seconds (30-300), saved as the new default
    #[clap(short = 'c', long, value_parser = clap::value_parser!(u32).range(MIN_COUNTDOWN_SECS as i64..=MAX_COUNTDOWN_SECS as i64))]
    countdown: Option<u32>,

    /// seed for sentence and block selection
    #[clap(long)]
    seed: Option<u64>,

    /// score database path
    #[clap(long)]
    db: Option<PathBuf>,

    /// keep scores and achievements in memory only
    #[clap(long, conflicts_with = "db")]
    ephemeral: bool,

    /// never ring the terminal bell
    #[clap(short = 'q', long)]
    quiet: bool,

    /// log file path
    #[clap(long)]
    log: Option<PathBuf>,
}

impl Cli {
    fn open_store(&self) -> Box<dyn ScoreStore> {
        if self.ephemeral {
            return Box::new(MemoryStore::new());
        }
        let Some(path) = self.db.clone().or_else(AppDirs::db_path) else {
            tracing::warn!("no state directory, scores will not be kept");
            return Box::new(MemoryStore::new());
        };
        match SqliteStore::open(&path) {
            Ok(store) => {
                tracing::info!(path = %path.display(), "score database opened");
                Box::new(store)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "score database unavailable, using memory");
                Box::new(MemoryStore::new())
            }
        }
    }

    fn dice(&self) -> SeededDice {
        self.seed
            .map_or_else(SeededDice::from_entropy, SeededDice::from_seed)
    }
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path.or_else(AppDirs::log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = init_logging(cli.log.clone()) {
        eprintln!("typezenith: logging disabled: {err}");
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if let Some(countdown) = cli.countdown {
        config.countdown_secs = countdown;
        if let Err(err) = config_store.save(&config) {
            tracing::warn!(path = %config_store.path().display(), %err, "failed to save config");
        }
    }

    let game: BoxedGame = Game::new(
        cli.open_store(),
        Box::new(TerminalCues::new(config.bell && !cli.quiet)) as Box<dyn CueSink>,
        Box::new(cli.dice()) as Box<dyn Dice>,
        config.countdown_secs,
    );
    let mut app = App::new(game, config, Box::new(config_store));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    tracing::info!("typezenith started");

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            GameEvent::Frame => app.on_frame(),
            GameEvent::Resize => {
                let size = terminal.size()?;
                app.resize(size.width, size.height);
            }
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    tracing::info!("typezenith stopped");
    Ok(())
}
