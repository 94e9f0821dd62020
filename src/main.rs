use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, sync::Mutex, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use karaoke_pal::app::App;
use karaoke_pal::config::Config;
use karaoke_pal::handlers::{handle_key_event, KeyAction};
use karaoke_pal::ui::render_ui;

/// Log to a file; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("karaoke_pal=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    tracing::info!("Logging to {}", log_path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        }
    };

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Exited with error: {:?}", err);
        eprintln!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    let tick = Duration::from_millis(app.config.ui.tick_ms.max(10));

    loop {
        app.handle_recommendation_events();
        app.on_tick();

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(app, key) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Continue => {}
                }
            }
        }
    }
}
