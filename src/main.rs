//! freqtop — live per-core CPU frequency and process list, redrawn in place.
//!
//! Keybindings: q / Esc / Ctrl-C quit, p pauses, arrows and PgUp/PgDn scroll.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use freqtop::app::App;
use freqtop::cli::{Args, LogLevel};
use freqtop::config::{default_config_path, FreqtopConfig};
use freqtop::input;
use freqtop::system::collector::Collector;
use freqtop::ui;

/// Input poll timeout; keeps key handling responsive between samples
const POLL_MS: u64 = 50;

/// Initializes tracing on stderr; stdout belongs to the display.
fn setup_logging(level: LogLevel) {
    let level = match level.as_level() {
        Some(l) => l,
        None => return,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!("Logging initialized with level: {:?}", level);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.log_level);

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = FreqtopConfig::load(config_path.as_deref());
    args.apply_to(&mut config);
    info!(?config_path, ?config, "configuration loaded");

    if args.write_config {
        let path = config_path.context("Could not determine config path")?;
        config.save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let collector = Collector::new(&config.sources);

    if args.once {
        let (frequencies, processes) = collector.sample(config.show_processes);
        let frame = ui::text::render_frame(
            &frequencies,
            config.show_processes.then_some(&processes),
            config.max_processes,
        );
        let mut stdout = io::stdout().lock();
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &collector, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Main application loop: sample, draw, wait for input or the next tick
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    collector: &Collector,
    config: &FreqtopConfig,
) -> Result<()> {
    let mut app = App::new(config);
    let tick_rate = Duration::from_millis(app.update_interval_ms);
    let mut last_tick = Instant::now();

    collector.refresh(&mut app);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                // On Windows, crossterm fires Press and Release; only handle Press
                if key.kind == KeyEventKind::Press {
                    input::handle_input(&mut app, key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }

        let now = Instant::now();
        if now.duration_since(last_tick) >= tick_rate {
            last_tick = now;
            collector.refresh(&mut app);
        }
    }
}
