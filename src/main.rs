use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

use ptwtui::config::{self, Config};
use ptwtui::viewer::query::PerPage;
use ptwtui::{handlers, log_debug, ui, App};

/// PTW / e-Safety admin TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/ptwtui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, /)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Initial page size (10, 20, 50 or 100)
    #[arg(long, value_parser = parse_per_page)]
    per_page: Option<PerPage>,
}

fn parse_per_page(value: &str) -> Result<PerPage, String> {
    let n: u32 = value.parse().map_err(|_| format!("not a number: {}", value))?;
    PerPage::try_from(n).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    ptwtui::set_debug_mode(args.debug);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let config_path = config::get_config_path(args.config.as_deref())?;
    log_debug(&format!("Loading config from: {:?}", config_path));

    let mut config = Config::load(&config_path)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    let per_page = args.per_page.unwrap_or_else(|| config.per_page());

    let mut app = App::new(&config, per_page)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_quit {
            break;
        }

        // Finished fetches, row-action commands, API results, toast expiry
        app.tick();

        // Short poll so finished fetches show up promptly
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => handlers::handle_key(app, key),
                Event::Mouse(mouse) => handlers::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Let spawned fetch tasks make progress on this thread too
        tokio::task::yield_now().await;
    }

    Ok(())
}
