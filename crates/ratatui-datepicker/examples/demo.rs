use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datepicker::calendar::CALENDAR_HEIGHT;
use ratatui_datepicker::calendar::CALENDAR_WIDTH;
use ratatui_datepicker::calendar::Calendar;
use ratatui_datepicker::calendar::CalendarAction;
use ratatui_datepicker::crossterm_input::input_event_from_crossterm;
use ratatui_datepicker::date_picker::DatePicker;
use ratatui_datepicker::date_picker::DatePickerAction;
use ratatui_datepicker::input::InputEvent;
use ratatui_datepicker::theme::Theme;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pane {
    Calendar,
    Picker,
}

struct App {
    calendar: Calendar,
    picker: DatePicker,
    pane: Pane,
    status: String,
    calendar_area: Rect,
}

fn main() -> io::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut app = App {
        calendar: Calendar::from_iso(Some("2024-01-15")),
        picker: DatePicker::new(),
        pane: Pane::Picker,
        status: String::new(),
        calendar_area: Rect::default(),
    };
    app.calendar.set_has_focus(false);
    app.picker.focus();

    let res = run(&mut terminal, &theme, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

/// Logs go to the file named by `DATEPICKER_LOG`; `RUST_LOG` picks the level.
fn init_logging() {
    let Ok(path) = std::env::var("DATEPICKER_LOG") else {
        return;
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {path}: {e}");
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);
            let [left, right] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(CALENDAR_WIDTH + 4),
                    Constraint::Min(1),
                ])
                .areas(main);

            let cal_block = Block::default()
                .title(pane_title("Calendar", app.pane == Pane::Calendar))
                .borders(Borders::ALL);
            let cal_inner = cal_block.inner(left);
            f.render_widget(cal_block, left);

            let picker_block = Block::default()
                .title(pane_title("Date picker", app.pane == Pane::Picker))
                .borders(Borders::ALL);
            let picker_inner = picker_block.inner(right);
            f.render_widget(picker_block, right);

            app.calendar_area = Rect::new(
                cal_inner.x + 1,
                cal_inner.y,
                CALENDAR_WIDTH.min(cal_inner.width.saturating_sub(1)),
                CALENDAR_HEIGHT.min(cal_inner.height),
            );
            let picker_row = Rect::new(
                picker_inner.x + 1,
                picker_inner.y + 1,
                16.min(picker_inner.width.saturating_sub(1)),
                1.min(picker_inner.height.saturating_sub(1)),
            );

            let buf = f.buffer_mut();
            app.calendar.render_ref(app.calendar_area, buf, theme);
            app.picker.render(picker_row, picker_inner, buf, theme);

            let keys = match app.pane {
                Pane::Calendar => calendar_hints(&app.calendar),
                Pane::Picker => "type digits, ↓/tab calendar".to_string(),
            };
            let line = format!(
                "value={:?}  {}  ({keys}, F2 switch pane, Ctrl-C quit)",
                app.picker.value(),
                app.status
            );
            buf.set_span(status.x, status.y, &Span::styled(line, Style::default()), status.width);

            if let Some((x, y)) = app.picker.cursor_pos() {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            if key.code == KeyCode::F(2) {
                switch_pane(app);
                continue;
            }
        }

        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        if let InputEvent::Mouse(m) = &ev {
            if m.is_left_down() && app.calendar_area.contains((m.x, m.y).into()) {
                app.pane = Pane::Calendar;
                app.calendar.set_has_focus(true);
            }
        }
        dispatch(app, ev);
    }
}

fn calendar_hints(calendar: &Calendar) -> String {
    calendar
        .options()
        .bindings
        .all()
        .iter()
        .map(|b| b.hint())
        .collect::<Vec<_>>()
        .join(", ")
}

fn pane_title(name: &str, active: bool) -> String {
    if active {
        format!("{name} *")
    } else {
        name.to_string()
    }
}

fn switch_pane(app: &mut App) {
    app.pane = match app.pane {
        Pane::Calendar => {
            app.calendar.set_has_focus(false);
            app.picker.focus();
            Pane::Picker
        }
        Pane::Picker => {
            app.picker.blur();
            app.calendar.set_has_focus(true);
            Pane::Calendar
        }
    };
}

fn dispatch(app: &mut App, ev: InputEvent) {
    let mouse = matches!(ev, InputEvent::Mouse(_));
    if mouse || app.pane == Pane::Calendar {
        if let CalendarAction::Selected(date) =
            app.calendar.handle_event_in_area(app.calendar_area, ev.clone())
        {
            app.status = format!("calendar picked {date}");
        }
    }
    if mouse || app.pane == Pane::Picker {
        if let DatePickerAction::Changed { text, date } = app.picker.handle_event(ev) {
            app.status = match date {
                Some(date) => format!("picker set {date}"),
                None => format!("editing {text}"),
            };
        }
        if app.picker.is_focused() && app.pane != Pane::Picker {
            app.pane = Pane::Picker;
            app.calendar.set_has_focus(false);
        }
    }
}
