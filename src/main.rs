use crate::app::App;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

mod app;
mod config;
mod discord;
mod form;
mod log;
mod render;
mod ui;

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = config::get_config();
    let log = log::get_logger();

    install_panic_hook();

    log.info("Starting");

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, App::new(config, log));
    ratatui::restore();

    result
}

/// Install a panic hook that restores the terminal before the panic prints.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        app.pump();

        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
