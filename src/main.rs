mod app;
mod config;
mod story;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tale")]
#[command(about = "TUI interactive fiction reader")]
#[command(version)]
struct Cli {
    /// Story file to read (JSON)
    story: PathBuf,

    /// Config file path
    #[arg(long, default_value = "~/.config/tale-tui/config.toml")]
    config: String,

    /// Theme preset, overriding the config file
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tale_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(theme) = cli.theme {
        config.theme.preset = theme;
    }

    // Load story before touching the terminal so errors print normally
    let story = story::load(&cli.story)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(story, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        app.request_quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.request_quit();
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.scroll_up(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        app.scroll_down(1);
                    }
                    KeyCode::PageUp => {
                        app.scroll_up(10);
                    }
                    KeyCode::PageDown => {
                        app.scroll_down(10);
                    }
                    KeyCode::Char('g') | KeyCode::Home => {
                        app.scroll_to_top();
                    }
                    KeyCode::Char('G') | KeyCode::End => {
                        app.scroll_to_bottom();
                    }
                    KeyCode::Tab | KeyCode::Right => {
                        app.next_choice();
                    }
                    KeyCode::BackTab | KeyCode::Left => {
                        app.prev_choice();
                    }
                    _ => {}
                }
            }
        }
    }
}
