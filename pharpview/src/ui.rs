use crate::app::{App, Field, PlotArea};
use pharptools::cross::Slot;
use pharptools::dev::Device;
use pharptools::{Mode, Point};
#[allow(unused_imports)]
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Span, Spans},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Decimals shown for rates and marker readouts
const PRECISION: usize = 3;

pub fn draw<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(1),
            ].as_ref()
        )
        .split(f.size());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)].as_ref())
        .split(chunks[1]);
    draw_titlebar(f, app, chunks[0]);
    draw_settings(f, app, body[0]);
    draw_histogram(f, app, body[1]);
    draw_markers(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);
}

fn draw_titlebar<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>, area: Rect) {
    let mode = app.session.mode();
    let (ch0, ch1) = match app.session.rates() {
        Some(r) => (r.ch0, r.ch1),
        None => (0.0, 0.0),
    };
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD | Modifier::DIM));
    let text = vec![
        Spans::from(vec![
            Span::styled(
                format!(" {} ", app.title),
                Style::default()
                    .fg(if mode == Mode::Histogramming {Color::Red} else {Color::Green})
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            ),
            Span::raw(" "),
            Span::styled(mode.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            key("q"), Span::raw(" quit "),
            key("space"), Span::raw(" start/stop "),
            key("a"), Span::raw(" apply "),
            key("d"), Span::raw(" defaults "),
            key("e"), Span::raw(" save "),
            key("f"), Span::raw(" follow "),
            key("x"), Span::raw(" clear markers"),
            Span::raw("   "),
            Span::styled("Ch0:", Style::default().add_modifier(Modifier::UNDERLINED)),
            Span::raw(" "),
            Span::styled(numfmt(ch0, PRECISION, "/s"), Style::default()),
            Span::raw("  "),
            Span::styled("Ch1:", Style::default().add_modifier(Modifier::UNDERLINED)),
            Span::raw(" "),
            Span::styled(numfmt(ch1, PRECISION, "/s"), Style::default()),
        ])
    ];
    f.render_widget(Paragraph::new(text), area);
}

fn draw_settings<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>, area: Rect) {
    let mut text: Vec<Spans> = Field::ALL
        .iter()
        .map(|&field| {
            let style = if field == app.field {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Spans::from(vec![
                Span::styled(format!("{:<21}", field.label()), style),
                Span::styled(format!("{:>9}", field.value(&app.raw)), style.add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    text.push(Spans::from(""));
    text.push(Spans::from(Span::styled("Resolutions (ps)", Style::default().add_modifier(Modifier::UNDERLINED))));
    text.push(Spans::from(
        app.session
            .resolutions()
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    ));
    text.push(Spans::from(""));
    text.push(Spans::from(Span::styled("Pushed", Style::default().add_modifier(Modifier::UNDERLINED))));
    match app.session.settings() {
        Some(s) => {
            text.push(Spans::from(format!(
                "{} ps, div {}, {} ms",
                app.session.axis().resolution(),
                s.sync_divider,
                s.acq_time_ms,
            )));
        }
        None => text.push(Spans::from(Span::styled("none", Style::default().fg(Color::Red)))),
    }
    let block = Block::default().title("Settings").borders(Borders::ALL);
    f.render_widget(Paragraph::new(text).block(block), area);
}

/// Vertical and horizontal line through `p`, spanning the plot bounds
fn crosshair(p: Point, x: [f64; 2], y: [f64; 2]) -> [Vec<(f64, f64)>; 2] {
    [vec![(p.x, y[0]), (p.x, y[1])], vec![(x[0], p.y), (x[1], p.y)]]
}

fn draw_histogram<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>, area: Rect) {
    let b = app.bounds;
    let title = format!(
        "Histogram  t: {} .. {}  counts: 0 .. {}{}",
        numfmt(b.x[0], PRECISION, "s"),
        numfmt(b.x[1], PRECISION, "s"),
        numfmt(b.y[1], PRECISION, ""),
        if app.follow { "" } else { "  [frozen]" },
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    app.plot = Some(PlotArea {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height,
    });

    let points = app.trimmed.as_ref().map(|t| t.points()).unwrap_or_default();
    let marker = if app.enhanced_graphics { symbols::Marker::Braille } else { symbols::Marker::Dot };
    let lines: Vec<(Vec<(f64, f64)>, Color)> = [
        (app.crosshairs.live(), Color::Gray),
        (app.crosshairs.get(Slot::A), Color::Red),
        (app.crosshairs.get(Slot::B), Color::Green),
    ]
    .iter()
    .filter_map(|&(p, c)| p.map(|p| (p, c)))
    .flat_map(|(p, c)| {
        let [v, h] = crosshair(p, b.x, b.y);
        vec![(v, c), (h, c)]
    })
    .collect();

    let mut datasets = vec![
        Dataset::default()
            .marker(marker)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&points),
    ];
    for (data, color) in lines.iter() {
        datasets.push(
            Dataset::default()
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(data),
        );
    }
    let chart = Chart::new(datasets)
        .block(block)
        .hidden_legend_constraints((Constraint::Ratio(0, 1), Constraint::Ratio(0, 1)))
        .x_axis(Axis::default().title("Time (s)").bounds(b.x))
        .y_axis(Axis::default().title("Counts").bounds(b.y));
    f.render_widget(chart, area);
}

fn draw_markers<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>, area: Rect) {
    let c = &app.crosshairs;
    let readout = |name: &'static str, p: Option<Point>, color: Color| {
        let value = match p {
            Some(p) => format!("{} {}", numfmt(p.x, PRECISION, "s"), numfmt(p.y, PRECISION, "")),
            None => String::from("-"),
        };
        vec![
            Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::raw(value),
            Span::raw("   "),
        ]
    };
    let mut text = Vec::new();
    text.extend(readout("Cursor", c.live(), Color::Gray));
    text.extend(readout("1", c.get(Slot::A), Color::Red));
    text.extend(readout("2", c.get(Slot::B), Color::Green));
    text.extend(readout("Δ", c.delta(), Color::White));
    let block = Block::default().title("Markers").borders(Borders::ALL);
    f.render_widget(Paragraph::new(Spans::from(text)).block(block), area);
}

fn draw_footer<B: Backend, D: Device>(f: &mut Frame<B>, app: &mut App<D>, area: Rect) {
    let mut errtxt: Vec<Span> = match app.flags.is_empty() {
        true => {
            vec![
                Span::styled("None", Style::default().fg(Color::Green)),
            ]
        },
        false => {
            app.flags.iter()
                .flat_map(|f|
                    vec![
                        Span::styled(
                            f.as_str(),
                            Style::default()
                                .fg(Color::Red)
                                .add_modifier(Modifier::REVERSED)
                            ),
                        Span::raw(" "),
                    ]
                )
                .collect()
        },
    };
    let workdir = match &app.workdir {
        Some(d) => d.display().to_string(),
        None => String::from("?"),
    };
    let mut text = vec![
        Span::styled(app.status.clone().unwrap_or_default(), Style::default()),
        Span::raw("  "),
        Span::styled(format!("Dir: {}", workdir), Style::default()),
        Span::raw("  "),
        Span::styled(format!("Save to: {}", app.filepath.display()), Style::default()),
        Span::raw("  "),
        Span::styled("Errors: ", Style::default()),
    ];
    text.append(&mut errtxt);

    f.render_widget(Paragraph::new(Spans::from(text)), area);
}

/// Number with the largest metric prefix that keeps it >= 1, `dec` decimals
pub fn numfmt(num: f64, dec: usize, unit: &str) -> String {
    if !num.is_normal() {
        return format!("{:.*} {}", dec, num, unit);
    }
    let oom = num.abs().log10().floor() as i32;
    let pfx = oom.div_euclid(3) * 3;
    let prefix = match pfx {
        -15 => "f",
        -12 => "p",
        -9  => "n",
        -6  => "µ",
        -3  => "m",
        3   => "k",
        6   => "M",
        9   => "G",
        _   => "",
    };
    let value = match prefix {
        "" => num,
        _ => num / 10f64.powi(pfx),
    };
    format!("{:.*} {}{}", dec, value, prefix, unit)
}
