mod app;
mod config;
mod logging;
mod state;
mod ui;

use std::io;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use fb_base::config::set_active_theme;
use fb_mod_tree::{FsClient, FsSource};

use app::App;
use config::{Cli, Config};
use logging::init_logging;
use state::State;

fn main() -> io::Result<()> {
    // A .env file may carry the FILE_BROWSER_* variables
    let _ = dotenvy::dotenv();

    // Bad configuration is reported before the terminal is taken over
    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("file-browser: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(config.log_level, &config.log_file) {
        eprintln!("file-browser: logging disabled, cannot write {}: {}", config.log_file.display(), e);
    }
    tracing::info!(api_url = %config.api_url, theme = %config.theme, "starting");

    set_active_theme(&config.theme);

    let source: Arc<dyn FsSource> = match FsClient::new(&config.api_url, config.timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("file-browser: {}", e);
            std::process::exit(2);
        }
    };

    // Panic hook: restore the terminal before the message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableMouseCapture);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!("panic: {}\n{}", info, backtrace);

        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(State::new(), source);
    let result = app.run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal error");
    }
    tracing::info!("exiting");
    result
}
