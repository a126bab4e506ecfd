use std::error::Error;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Span, Spans};
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{BarChart, Block, Borders, Paragraph, Row, Table, Wrap};
use tui::{Frame, Terminal};

use nyc_airbnb_explorer::aggregate::BUCKET_COUNT;
use nyc_airbnb_explorer::controls::{Controls, SelectionApplier};
use nyc_airbnb_explorer::dataset::Dataset;
use nyc_airbnb_explorer::table::{SortKey, COLUMN_COUNT};

const TICK_RATE_MS: u64 = 200;
const MENU_TITLES: [&'static str; 6] = ["borough", "type", "[ ] low", "{ } high", "sort/reverse", "quit"];
// Rough city limits, used when no listing has coordinates.
const NYC_BOUNDS: ([f64; 2], [f64; 2]) = ([-74.26, -73.70], [40.49, 40.92]);

enum Event<I> {
    Input(I),
    Tick,
}

/// Longitude and latitude extents of every listing with coordinates.
fn map_bounds(dataset: &Dataset) -> ([f64; 2], [f64; 2]) {
    let coords: Vec<(f64, f64)> = dataset
        .listings()
        .iter()
        .filter_map(|l| Some((l.long?, l.lat?)))
        .collect();
    if coords.is_empty() {
        return NYC_BOUNDS;
    }
    let fold = |f: fn(&(f64, f64)) -> f64| {
        coords
            .iter()
            .map(f)
            .fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], v| [lo.min(v), hi.max(v)])
    };
    (fold(|c| c.0), fold(|c| c.1))
}

fn hex_color(hex: &str) -> Color {
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (channel(1), channel(3), channel(5)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

pub fn run(mut controls: Controls) -> Result<(), Box<dyn Error>> {
    let bounds = map_bounds(controls.dataset());

    enable_raw_mode()?;

    let (tx, rx) = mpsc::channel();
    let tick_rate = Duration::from_millis(TICK_RATE_MS);
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout).expect("poll works") {
                if let CEvent::Key(key) = event::read().expect("can read events") {
                    tx.send(Event::Input(key)).expect("can send events");
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if let Ok(_) = tx.send(Event::Tick) {
                    last_tick = Instant::now();
                }
            }
        }
    });

    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut controls, &rx, bounds);

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    controls: &mut Controls,
    rx: &mpsc::Receiver<Event<KeyEvent>>,
    bounds: ([f64; 2], [f64; 2]),
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|rect| draw(rect, &*controls, bounds))?;

        match rx.recv()? {
            Event::Input(event) => {
                if handle_key(controls, event.code)? {
                    return Ok(());
                }
            }
            Event::Tick => {}
        }
    }
}

/// Applies one key press; `true` means quit.
fn handle_key(controls: &mut Controls, code: KeyCode) -> Result<bool, Box<dyn Error>> {
    match code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('b') => controls.cycle_borough(true)?,
        KeyCode::Char('B') => controls.cycle_borough(false)?,
        KeyCode::Char('t') => controls.cycle_room_type(true)?,
        KeyCode::Char('T') => controls.cycle_room_type(false)?,
        KeyCode::Char('[') => controls.shift_low(false)?,
        KeyCode::Char(']') => controls.shift_low(true)?,
        KeyCode::Char('{') => controls.shift_high(false)?,
        KeyCode::Char('}') => controls.shift_high(true)?,
        KeyCode::Char('s') => controls.cycle_sort_column(),
        KeyCode::Char('r') => controls.toggle_sort_direction(),
        _ => {}
    }
    Ok(false)
}

fn draw<B: Backend>(rect: &mut Frame<B>, controls: &Controls, bounds: ([f64; 2], [f64; 2])) {
    let size = rect.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(5), Constraint::Min(10)].as_ref())
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);
    draw_menu(rect, header_chunks[0]);
    draw_selection(rect, header_chunks[1], controls);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(chunks[1]);
    draw_map(rect, body_chunks[0], controls, bounds);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(body_chunks[1]);
    draw_bars(rect, right_chunks[0], controls);
    draw_table(rect, right_chunks[1], controls);
}

fn draw_menu<B: Backend>(rect: &mut Frame<B>, area: Rect) {
    let menu: Vec<Spans> = MENU_TITLES
        .iter()
        .map(|t| {
            let (first, rest) = t.split_at(1);
            Spans::from(vec![
                Span::styled(
                    first,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(rest, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let keys = Paragraph::new(vec![Spans::from(
        menu.into_iter()
            .flat_map(|s| s.0.into_iter().chain(std::iter::once(Span::raw(" | "))))
            .collect::<Vec<_>>(),
    )])
    .block(Block::default().title("Airbnb in New York City").borders(Borders::ALL))
    .style(Style::default().fg(Color::Cyan))
    .wrap(Wrap { trim: true });
    rect.render_widget(keys, area);
}

fn draw_selection<B: Backend>(rect: &mut Frame<B>, area: Rect, controls: &Controls) {
    let selection = &controls.selection;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let sort = match controls.sort {
        Some(SortKey { column, descending }) => format!(
            "{} {}",
            controls.view.table.columns[column.min(COLUMN_COUNT - 1)].label,
            if descending { "desc" } else { "asc" }
        ),
        None => String::from("none"),
    };
    let lines = vec![
        Spans::from(vec![Span::styled(format!("Borough: {}", selection.borough), bold)]),
        Spans::from(vec![Span::styled(format!("Room Type: {}", selection.room_type), bold)]),
        Spans::from(vec![Span::styled(format!("{}  Sort: {}", controls.view.price_label, sort), bold)]),
    ];
    let block = Paragraph::new(lines)
        .block(Block::default().title("Filter").borders(Borders::ALL))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);
    rect.render_widget(block, area);
}

fn draw_map<B: Backend>(rect: &mut Frame<B>, area: Rect, controls: &Controls, bounds: ([f64; 2], [f64; 2])) {
    let mut groups: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();
    for point in &controls.view.map_points {
        if let Some(coords) = point.coordinates() {
            match groups.iter_mut().find(|(color, _)| *color == point.color) {
                Some((_, coords_of_color)) => coords_of_color.push(coords),
                None => groups.push((point.color, vec![coords])),
            }
        }
    }

    let title = format!("Listings ({})", controls.view.map_points.len());
    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds(bounds.0)
        .y_bounds(bounds.1)
        .paint(|ctx| {
            for (color, coords) in &groups {
                ctx.draw(&Points {
                    coords,
                    color: hex_color(color),
                });
            }
        });
    rect.render_widget(canvas, area);
}

fn draw_bars<B: Backend>(rect: &mut Frame<B>, area: Rect, controls: &Controls) {
    let series = &controls.view.bar_series;
    let groups: Vec<_> = series.chunks(BUCKET_COUNT).collect();
    if groups.is_empty() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(groups.len() as u16 + 3)].as_ref())
        .split(area);
    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, groups.len() as u32); groups.len()])
        .split(chunks[0]);

    let numbers: Vec<String> = (1..=BUCKET_COUNT).map(|i| i.to_string()).collect();
    for (group, chunk) in groups.iter().zip(chart_chunks.iter()) {
        let data: Vec<(&str, u64)> = group
            .iter()
            .zip(numbers.iter())
            .map(|(stat, number)| (number.as_str(), stat.count as u64))
            .collect();
        let color = hex_color(group[0].color);
        let chart = BarChart::default()
            .block(Block::default().title(group[0].borough).borders(Borders::ALL))
            .data(&data)
            .bar_width(3)
            .bar_gap(1)
            .bar_style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color));
        rect.render_widget(chart, *chunk);
    }

    let mut lines = vec![Spans::from(
        groups[0]
            .iter()
            .zip(numbers.iter())
            .map(|(stat, number)| Span::raw(format!("{} {}  ", number, stat.label)))
            .collect::<Vec<_>>(),
    )];
    for group in &groups {
        let mut spans = vec![Span::styled(
            format!("{:<14}", group[0].borough),
            Style::default().fg(hex_color(group[0].color)),
        )];
        spans.extend(
            group
                .iter()
                .map(|stat| Span::raw(format!("{}±{:.1}  ", stat.count, stat.standard_error))),
        );
        lines.push(Spans::from(spans));
    }
    let legend = Paragraph::new(lines)
        .block(Block::default().title("Price Range (count ± standard error)").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    rect.render_widget(legend, chunks[1]);
}

fn draw_table<B: Backend>(rect: &mut Frame<B>, area: Rect, controls: &Controls) {
    let table = &controls.view.table;
    let visible = area.height.saturating_sub(3) as usize;
    let header = Row::new(table.columns.iter().map(|c| c.label.clone()))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let rows = table
        .rows
        .iter()
        .take(visible)
        .map(|row| Row::new(row.iter().map(|cell| cell.display())));
    let widths = [Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT];
    let widget = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .title(format!("Available Listings ({})", table.rows.len()))
                .borders(Borders::ALL),
        )
        .widths(&widths)
        .column_spacing(1);
    rect.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use nyc_airbnb_explorer::dashboard::Dashboard;
    use nyc_airbnb_explorer::dataset::Listing;
    use nyc_airbnb_explorer::filter::Selector;

    use super::*;

    fn listing(id: usize, borough: &str, price: f64) -> Listing {
        Listing {
            id,
            name: Some(format!("Listing {}", id)),
            host_id: None,
            host_identity_verified: None,
            host_name: None,
            borough: borough.to_string(),
            neighbourhood: None,
            lat: Some(40.7),
            long: Some(-73.9),
            room_type: Some("Private room".to_string()),
            price,
            service_fee: None,
            minimum_nights: None,
            number_of_reviews: None,
            cancellation_policy: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_listings(vec![
            listing(1, "Manhattan", 150.0),
            listing(2, "Brooklyn", 90.0),
            listing(3, "Queens", 400.0),
        ])
        .unwrap()
    }

    #[test]
    fn quit_key_ends_the_loop() {
        let dataset = dataset();
        let dashboard = Dashboard::new(&dataset).unwrap();
        let mut controls = Controls::new(&dashboard, dashboard.initial_selection()).unwrap();

        assert!(!handle_key(&mut controls, KeyCode::Char('x')).unwrap());
        assert!(!handle_key(&mut controls, KeyCode::Char('b')).unwrap());
        assert!(handle_key(&mut controls, KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn failed_refresh_is_returned_instead_of_quitting() {
        let dataset = dataset();
        let dashboard = Dashboard::new(&dataset).unwrap();
        let mut controls = Controls::new(&dashboard, dashboard.initial_selection()).unwrap();
        controls.selection.room_type = Selector::Only("Hotel room".to_string());

        assert!(handle_key(&mut controls, KeyCode::Char('b')).is_err());
        assert!(handle_key(&mut controls, KeyCode::Char('s')).is_ok());
    }
}
