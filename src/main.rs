use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use flinch::{
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    App,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

/// reaction-time game: wait for the shapes to change, then click
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reaction-time game for the terminal. Start a round, wait for the wireframe scene to change, then click or press space as fast as you can. Clicking early is a false start."
)]
pub struct Cli {
    /// milliseconds between animation frames
    #[clap(short = 't', long)]
    tick_rate_ms: Option<u64>,

    /// draw the shapes without animating them
    #[clap(long)]
    no_animation: bool,

    /// do not capture the mouse; play with the keyboard only
    #[clap(long)]
    no_mouse: bool,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// append logs to this file (RUST_LOG sets the level)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        if self.no_animation {
            config.animate = false;
        }
        if self.no_mouse {
            config.mouse = false;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    if let Some(path) = logging::resolve_log_path(cli.log_file.as_deref(), rust_log_set) {
        logging::init_file_logger(&path)?;
    }

    let config = cli.apply_to(cli.config_store().load());
    log::info!("starting with {config:?}");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(config.tick_rate_ms),
    );
    let mut app = App::new(config);
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    // restore the terminal even when the loop failed
    disable_raw_mode()?;
    if app.config.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &outcome {
        log::error!("exiting after error: {e}");
    }
    outcome
}

fn start_tui<B, E, T>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: EventSource,
    T: Ticker,
{
    let mut last_frame = Instant::now();
    draw(terminal, app)?;

    while !app.should_quit {
        let event = runner.step();
        let now = Instant::now();
        let frame_dt = now.duration_since(last_frame);
        if matches!(event, flinch::runtime::AppEvent::Tick) {
            last_frame = now;
        }

        if app.handle_event(event, frame_dt) {
            draw(terminal, app)?;
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|f| {
        app.viewport = f.area();
        f.render_widget(&*app, f.area());
    })?;
    Ok(())
}
