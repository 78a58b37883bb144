use std::fs::File;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute, queue, terminal};
use dayfold::{
    AgendaConfig, AgendaEvent, AgendaView, CalendarGrid, DayList, ItemMap, KnobBand, Markings,
    PointerTranslator, Renderers, KNOB_HEIGHT,
};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Position units represented by one terminal row.
const ROW_UNITS: f32 = 20.0;

/// Rows the fully-expanded month grid occupies.
const GRID_ROWS: u16 = 12;

/// Agenda rows drawn below the knob.
const AGENDA_ROWS: u16 = 8;

/// Month-grid collaborator: remembers what the view asked it to show.
struct TermCalendar {
    centered: NaiveDate,
    markings: Markings,
    scroll_enabled: bool,
}

impl CalendarGrid for TermCalendar {
    fn scroll_to_date(&mut self, date: NaiveDate, _offset: f32, _animated: bool) {
        self.centered = date;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn set_markings(&mut self, markings: &Markings) {
        self.markings = markings.clone();
    }
}

/// Day-list collaborator: only tracks its top anchor here.
struct TermList {
    top: NaiveDate,
}

impl DayList<String> for TermList {
    fn set_items(&mut self, _items: &ItemMap<String>) {}

    fn set_selected_day(&mut self, _day: NaiveDate) {}

    fn set_top_day(&mut self, day: NaiveDate) {
        self.top = day;
    }
}

type View = AgendaView<String, String, TermCalendar, TermList>;

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("agenda.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let today = chrono::Local::now().date_naive();
    let renderers = Renderers::new()
        .knob(|frame| {
            if frame.pressed {
                "════════════ drag me ════════════".to_string()
            } else {
                "──────────── drag me ────────────".to_string()
            }
        })
        .day_cell(|day, items| match items {
            Some(items) => format!("{}  {}", day.format("%a %b %d"), items.join(", ")),
            None => format!("{}  ...", day.format("%a %b %d")),
        })
        .empty_day(|day| format!("{}  (no entries)", day.format("%a %b %d")));

    let mut view: View = AgendaView::new(
        AgendaConfig::new(today),
        renderers,
        TermCalendar {
            centered: today,
            markings: Markings::new(),
            scroll_enabled: false,
        },
        TermList { top: today },
    )
    .expect("demo configuration is valid");
    view.on_calendar_toggled(|open| log::debug!("calendar toggled: {open}"));
    view.on_day_press(|day| log::debug!("day pressed: {day}"));
    view.set_items(demo_items(today));

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;

    let (cols, rows) = terminal::size()?;
    let now = Instant::now();
    view.handle_event(
        AgendaEvent::Layout {
            width: f32::from(cols),
            height: f32::from(rows) * ROW_UNITS,
        },
        now,
    );
    view.on_scroll_pad_layout(now);
    view.tick(now);

    let mut translator = PointerTranslator::new(KnobBand::new(0, knob_band_rows()), ROW_UNITS);

    let result = run(&mut view, &mut translator, &mut stdout);

    view.teardown();
    execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    view: &mut View,
    translator: &mut PointerTranslator,
    stdout: &mut io::Stdout,
) -> io::Result<()> {
    loop {
        if view.take_needs_render() {
            let knob_row = draw(view, stdout)?;
            // The grab band is taller than the knob's one glyph row.
            translator.set_band(KnobBand::new(knob_row.saturating_sub(1), knob_band_rows()));
        }

        if event::poll(Duration::from_millis(33))? {
            let now = Instant::now();
            match event::read()? {
                CrosstermEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up => {
                        let day = view.selected_day() - Days::new(1);
                        view.choose_day(day, false, now);
                    }
                    KeyCode::Down => {
                        let day = view.selected_day() + Days::new(1);
                        view.choose_day(day, false, now);
                    }
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => {
                    for agenda_event in translator.translate(&mouse, view.sync().position()) {
                        view.handle_event(agenda_event, now);
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    view.handle_event(
                        AgendaEvent::Layout {
                            width: f32::from(width),
                            height: f32::from(height) * ROW_UNITS,
                        },
                        now,
                    );
                }
                _ => {}
            }
        }
        view.tick(Instant::now());
    }
}

/// Draw one frame; returns the row the knob landed on.
fn draw(view: &View, stdout: &mut io::Stdout) -> io::Result<u16> {
    let sync = view.sync();
    let max = sync.geometry().max_scroll_y();
    let open = if max > 0.0 {
        1.0 - sync.position() / max
    } else {
        0.0
    };
    let grid_rows = (open * f32::from(GRID_ROWS)).round() as u16;

    let mut row = 0u16;
    let put = |stdout: &mut io::Stdout, row: u16, line: String| -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(line)
        )
    };

    put(
        stdout,
        row,
        format!(
            " {}  [{:?}]  pos {:>5.0}  cal-scroll {}",
            view.selected_day().format("%B %Y"),
            view.header_state(),
            sync.position(),
            view.calendar().scroll_enabled
        ),
    )?;
    row += 1;

    // Month grid, faded out row by row as it collapses.
    let grid = month_grid(view.calendar().centered, &view.calendar().markings);
    for line in grid.iter().take(usize::from(grid_rows)) {
        put(stdout, row, format!("  {line}"))?;
        row += 1;
    }

    // Weekday strip: visible once the calendar has mostly collapsed.
    let strip = if sync.weekday_strip_opacity() > 0.5 {
        " Su Mo Tu We Th Fr Sa"
    } else {
        ""
    };
    put(stdout, row, strip.to_string())?;
    row += 1;

    let knob_row = row;
    let knob = view.render_knob().unwrap_or_default();
    put(stdout, row, format!(" {knob}"))?;
    row += 1;

    // Agenda list anchored at the top day.
    let mut day = view.top_day();
    for _ in 0..AGENDA_ROWS {
        let line = view.render_day(day).unwrap_or_default();
        put(stdout, row, format!("   {line}"))?;
        row += 1;
        day = day.checked_add_days(Days::new(1)).unwrap_or(day);
    }

    put(
        stdout,
        row,
        " drag the knob / arrows pick a day / q quits".to_string(),
    )?;
    // Drop whatever a taller previous frame left below us.
    queue!(stdout, Clear(ClearType::FromCursorDown))?;
    stdout.flush()?;
    Ok(knob_row)
}

/// Render a month as rows of day numbers, with the selection bracketed and
/// marked days starred.
fn month_grid(centered: NaiveDate, markings: &Markings) -> Vec<String> {
    let first = centered.with_day(1).unwrap_or(centered);
    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<String> = vec!["   ".to_string(); lead];

    let mut day = first;
    while day.month() == first.month() {
        let marking = markings.get(&day).copied().unwrap_or_default();
        let cell = if marking.selected {
            format!("[{:>2}]", day.day())
        } else if marking.marked {
            format!("{:>2}* ", day.day())
        } else {
            format!("{:>2}  ", day.day())
        };
        cells.push(cell);
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    cells
        .chunks(7)
        .map(|week| week.join(" "))
        .collect()
}

/// Terminal rows the knob's grab band covers.
fn knob_band_rows() -> u16 {
    (KNOB_HEIGHT / ROW_UNITS).ceil() as u16
}

/// A few seeded entries around today.
fn demo_items(today: NaiveDate) -> ItemMap<String> {
    let mut items = ItemMap::new();
    items.insert(
        today,
        Some(vec!["standup".to_string(), "design review".to_string()]),
    );
    if let Some(day) = today.checked_add_days(Days::new(2)) {
        items.insert(day, Some(vec!["dentist".to_string()]));
    }
    if let Some(day) = today.checked_add_days(Days::new(3)) {
        items.insert(day, Some(vec![]));
    }
    items
}
