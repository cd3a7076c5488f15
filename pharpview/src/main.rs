use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{Event as CEvent, KeyCode};
use parking_lot::Mutex;
use pharptools::cfg::{self, RawSettings};
use pharptools::session::Session;
use std::fs::File;
use std::path;
use std::sync::Arc;
use std::time::Duration;
use pharpview::{app::{App, Event}, sim::SimDevice, terminal, timer, ui, worker, Cli};

#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");

/// Structure of `main`
///
/// ## Threads
///
/// - Input thread: forwards terminal key/mouse events and sends ticks
/// - Worker thread: polls the instrument, sending count rates or histograms
/// - Main thread: owns the session, handles every event in arrival order and
///   redraws after each one
///
/// All three meet on one unbounded `flume` channel, so histograms are
/// handled strictly in the order the worker read them out.
fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    if cli.version {
        println!(
            concat!(
                env!("CARGO_BIN_NAME"),
                " ",
                "{}",
            ),
            GIT_VERSION,
        );
        return Ok(())
    }

    // The terminal UI owns stdout, so logs go to a file
    let log = File::create(&cli.log).with_context(|| format!("could not create log file {}", cli.log))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log))
        .with_ansi(false)
        .init();
    info!(version = GIT_VERSION, "starting");

    let device = Arc::new(Mutex::new(SimDevice::new(cli.base_resolution, cli.sync_rate)));
    let mut session = Session::new(device.clone()).context("unusable device")?;

    // Push startup settings, from file or defaults
    match &cli.config {
        Some(c) => {
            let f = File::open(c).with_context(|| format!("could not open settings file {}", c))?;
            let settings = cfg::from_reader(f).context("could not parse settings file")?;
            let raw = RawSettings::from_settings(&settings, session.catalog().base())
                .context("could not use settings file")?;
            session.apply(&raw).context("could not push settings from file")?;
        }
        None => {
            session.apply_defaults().context("could not push default settings")?;
        }
    }

    let filepath = match &cli.output {
        Some(o) => path::PathBuf::from(o),
        None => {
            let mut p = std::env::current_dir()?;
            p.push(Local::now().format("%F-%H-%M-%S").to_string());
            p.set_extension("csv");
            p
        }
    };

    let (tx_event, rx_event) = flume::unbounded();
    timer::main(tx_event.clone(), Duration::from_millis(cli.tick_rate))?;
    worker::main(device, session.active_flag(), tx_event)?;

    let mut terminal = terminal::setup()?;
    let mut app = App::new("Pharp View", cli.enhanced_graphics, session, filepath);

    // Main loop - blocks on receiving input, ticks and readouts
    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|f| ui::draw(f, &mut app))?;
            match rx_event.recv()? {
                Event::Input(CEvent::Key(key)) => match key.code {
                    KeyCode::Char('r') => terminal.clear()?,
                    code => app.on_key(code),
                },
                Event::Input(CEvent::Mouse(m)) => app.on_mouse(m),
                Event::Input(_) => {}
                Event::Tick => app.on_tick(),
                Event::Counts(c) => app.on_counts(c),
                Event::Histogram(h) => app.on_histogram(h),
                Event::Fault(e) => app.on_fault(e),
            }
            if app.should_quit {
                break;
            }
        }
        Ok(())
    })();

    terminal::restore(&mut terminal)?;
    info!("exiting");
    result
}
