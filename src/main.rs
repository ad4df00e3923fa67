use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::Mutex;

use parley::app::AppState;
use parley::config::Config;
use parley::transport::HttpTransport;
use parley::{key_handlers, logging, ui, App};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load()?;
    let _logger = logging::init(&config.log_level)?;
    log::info!("parley starting, backend at {}", config.server_url);

    let transport = Arc::new(HttpTransport::new(&config)?);
    let app = Arc::new(Mutex::new(App::new(config)));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, transport).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        log::error!("exited with error: {err}");
    }
    result
}

/// Draw loop: redraws on a short tick so the typing animation keeps moving,
/// and hands key presses to the handlers. Send and clear flows run as
/// spawned tasks over the shared app state.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    transport: Arc<HttpTransport>,
) -> Result<()> {
    loop {
        {
            let mut guard = app.lock().await;
            guard.tick();
            terminal.draw(|f| ui::draw(f, &mut *guard))?;
            if guard.state == AppState::Quit {
                break;
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let mut guard = app.lock().await;
                    key_handlers::handle_key(key, &mut guard, app.clone(), transport.clone());
                }
            }
        }
    }
    log::info!("parley shutting down");
    Ok(())
}
