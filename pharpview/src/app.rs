use pharptools::cfg::{RawSettings, SYNC_DIVIDERS};
use pharptools::cross::{self, Crosshairs};
use pharptools::dev::Device;
use pharptools::hist::Trimmed;
use pharptools::session::Session;
use pharptools::{CountEvent, Error, HistogramEvent, Mode, Point};

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use std::collections::HashSet;
use std::path;
use std::sync::Arc;

#[allow(unused_imports)]
use tracing::{debug, info, warn};

pub enum Event<I> {
    Input(I),
    Tick,
    Counts(CountEvent),
    Histogram(HistogramEvent),
    Fault(anyhow::Error),
}

/// Editable settings fields, in display order
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Field {
    Resolution,
    SyncOffset,
    SyncDivider,
    Cfd0ZeroCross,
    Cfd0Level,
    Cfd1ZeroCross,
    Cfd1Level,
    AcqTime,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Resolution,
        Field::SyncOffset,
        Field::SyncDivider,
        Field::Cfd0ZeroCross,
        Field::Cfd0Level,
        Field::Cfd1ZeroCross,
        Field::Cfd1Level,
        Field::AcqTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Resolution => "Resolution (ps)",
            Field::SyncOffset => "Sync offset (ps)",
            Field::SyncDivider => "Sync divider",
            Field::Cfd0ZeroCross => "CFD0 zero cross (mV)",
            Field::Cfd0Level => "CFD0 level (mV)",
            Field::Cfd1ZeroCross => "CFD1 zero cross (mV)",
            Field::Cfd1Level => "CFD1 level (mV)",
            Field::AcqTime => "Acq. time (ms)",
        }
    }

    pub fn value(self, raw: &RawSettings) -> i64 {
        match self {
            Field::Resolution => raw.resolution.into(),
            Field::SyncOffset => raw.sync_offset.into(),
            Field::SyncDivider => raw.sync_divider.into(),
            Field::Cfd0ZeroCross => raw.cfd0_zero_cross.into(),
            Field::Cfd0Level => raw.cfd0_level.into(),
            Field::Cfd1ZeroCross => raw.cfd1_zero_cross.into(),
            Field::Cfd1Level => raw.cfd1_level.into(),
            Field::AcqTime => raw.acq_time_ms.into(),
        }
    }

    fn step(self) -> i32 {
        match self {
            Field::SyncOffset | Field::Cfd0ZeroCross | Field::Cfd1ZeroCross => 1,
            Field::Cfd0Level | Field::Cfd1Level => 10,
            Field::AcqTime => 100,
            // stepped through their lists
            Field::Resolution | Field::SyncDivider => 1,
        }
    }

    fn offset(self, by: isize) -> Field {
        let n = Field::ALL.len() as isize;
        let i = Field::ALL.iter().position(|&f| f == self).unwrap_or(0) as isize;
        Field::ALL[(i + by).rem_euclid(n) as usize]
    }
}

/// Plot ranges, x in seconds and y in counts
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds { x: [0.0, 1e-9], y: [0.0, 1.0] }
    }
}

impl Bounds {
    pub fn fit(t: &Trimmed) -> Self {
        let x1 = if t.span() > 0.0 { t.span() } else { t.resolution as f64 / pharptools::PS_PER_S };
        let y1 = (t.max_count() as f64 * 1.05).max(1.0);
        Bounds { x: [0.0, x1], y: [0.0, y1] }
    }
}

/// Screen region (terminal cells) the plot was last drawn into
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PlotArea {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PlotArea {
    /// Map a terminal cell to plot coordinates
    pub fn to_data(&self, col: u16, row: u16, b: &Bounds) -> Option<Point> {
        if col < self.x || row < self.y || col >= self.x + self.width || row >= self.y + self.height {
            return None;
        }
        let fx = (col - self.x) as f64 / self.width.saturating_sub(1).max(1) as f64;
        let fy = 1.0 - (row - self.y) as f64 / self.height.saturating_sub(1).max(1) as f64;
        Some(Point {
            x: b.x[0] + fx * (b.x[1] - b.x[0]),
            y: b.y[0] + fy * (b.y[1] - b.y[0]),
        })
    }
}

pub struct App<'a, D: Device> {
    pub title: &'a str,
    pub enhanced_graphics: bool,
    pub should_quit: bool,
    pub session: Session<D>,
    pub raw: RawSettings,
    pub field: Field,
    pub crosshairs: Crosshairs,
    pub trimmed: Option<Arc<Trimmed>>,
    pub bounds: Bounds,
    pub follow: bool,
    pub plot: Option<PlotArea>,
    pub filepath: path::PathBuf,
    pub workdir: Option<path::PathBuf>,
    pub status: Option<String>,
    pub flags: HashSet<String>,
}

impl<'a, D: Device> App<'a, D> {
    pub fn new(
        title: &'a str,
        enhanced_graphics: bool,
        session: Session<D>,
        filepath: path::PathBuf,
    ) -> App<'a, D>
    {
        let base = session.catalog().base();
        let raw = session
            .settings()
            .and_then(|s| RawSettings::from_settings(s, base).ok())
            .unwrap_or_else(|| RawSettings::defaults(base));
        App {
            title,
            enhanced_graphics,
            should_quit: false,
            session,
            raw,
            field: Field::Resolution,
            crosshairs: Crosshairs::new(),
            trimmed: None,
            bounds: Bounds::default(),
            follow: true,
            plot: None,
            filepath,
            workdir: std::env::current_dir().ok(),
            status: None,
            flags: HashSet::new(),
        }
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') => self.flags.clear(),
            KeyCode::Char(' ') => self.start_stop(),
            KeyCode::Char('a') => self.apply(),
            KeyCode::Char('d') => self.apply_defaults(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('x') => self.crosshairs.reset(),
            KeyCode::Char('f') => self.toggle_follow(),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.offset(1),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.offset(-1),
            KeyCode::Char('+') | KeyCode::Right => self.adjust(1),
            KeyCode::Char('-') | KeyCode::Left => self.adjust(-1),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, ev: MouseEvent) {
        let p = match self.plot.and_then(|a| a.to_data(ev.column, ev.row, &self.bounds)) {
            Some(p) => p,
            None => return,
        };
        let ev = match ev.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => cross::Event::Move(p),
            MouseEventKind::Down(MouseButton::Left) => cross::Event::Click(p),
            _ => return,
        };
        if let Some(placed) = self.crosshairs.handle(ev) {
            debug!(?placed, "crosshair placed");
        }
    }

    pub fn on_counts(&mut self, ev: CountEvent) {
        self.session.on_counts(ev);
    }

    pub fn on_histogram(&mut self, ev: HistogramEvent) {
        match self.session.on_histogram(&ev) {
            Ok(t) => {
                if self.follow {
                    self.bounds = Bounds::fit(&t);
                }
                self.trimmed = Some(t);
            }
            // nothing recorded yet, keep showing the last histogram
            Err(Error::EmptyHistogram) => {}
            Err(e) => {
                warn!("{}", e);
                self.flags.insert(e.to_string());
            }
        }
    }

    pub fn on_fault(&mut self, e: anyhow::Error) {
        self.flags.insert(format!("{:#}", e));
    }

    pub fn on_tick(&mut self) {}

    fn start_stop(&mut self) {
        let mode = self.session.start_stop();
        self.status = Some(match mode {
            Mode::Histogramming => String::from("Start histo"),
            Mode::Counting => String::from("Stop histo"),
        });
    }

    fn apply(&mut self) {
        match self.session.apply(&self.raw) {
            Ok(_) => {
                self.status = Some(format!(
                    "Settings pushed: {} ps",
                    self.session.axis().resolution(),
                ));
            }
            Err(e) => {
                self.flags.insert(e.to_string());
            }
        }
    }

    /// Reset the fields to the defaults, then push them
    fn apply_defaults(&mut self) {
        self.raw = RawSettings::defaults(self.session.catalog().base());
        self.apply();
    }

    fn export(&mut self) {
        match self.session.export(&self.filepath) {
            Ok(rows) => {
                self.status = Some(format!("Saved {} bins to {}", rows, self.filepath.display()));
            }
            Err(e) => {
                self.flags.insert(e.to_string());
            }
        }
    }

    fn toggle_follow(&mut self) {
        self.follow = !self.follow;
        if let (true, Some(t)) = (self.follow, &self.trimmed) {
            self.bounds = Bounds::fit(t);
        }
    }

    fn adjust(&mut self, dir: i32) {
        let raw = &mut self.raw;
        let by = dir * self.field.step();
        match self.field {
            Field::Resolution => {
                raw.resolution = self.session.catalog().step(raw.resolution, dir as isize);
            }
            Field::SyncDivider => {
                let i = SYNC_DIVIDERS.iter().position(|&d| d == raw.sync_divider).unwrap_or(0) as isize;
                let j = (i + dir as isize).clamp(0, SYNC_DIVIDERS.len() as isize - 1);
                raw.sync_divider = SYNC_DIVIDERS[j as usize];
            }
            Field::SyncOffset => raw.sync_offset += by,
            Field::Cfd0ZeroCross => raw.cfd0_zero_cross += by,
            Field::Cfd0Level => raw.cfd0_level += by,
            Field::Cfd1ZeroCross => raw.cfd1_zero_cross += by,
            Field::Cfd1Level => raw.cfd1_level += by,
            Field::AcqTime => raw.acq_time_ms += by,
        }
    }
}
