use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_datepicker::calendar::CALENDAR_HEIGHT;
use ratatui_datepicker::calendar::CALENDAR_WIDTH;
use ratatui_datepicker::calendar::Calendar;
use ratatui_datepicker::calendar::CalendarAction;
use ratatui_datepicker::calendar::CalendarOptions;
use ratatui_datepicker::date::CalendarDate;
use ratatui_datepicker::date_picker::DatePicker;
use ratatui_datepicker::date_picker::DatePickerAction;
use ratatui_datepicker::date_picker::DatePickerOptions;
use ratatui_datepicker::element::InputHandle;
use ratatui_datepicker::handle::HandleAcceptor;
use ratatui_datepicker::input::InputEvent;
use ratatui_datepicker::input::KeyCode;
use ratatui_datepicker::input::MouseEvent;
use ratatui_datepicker::keymap;
use ratatui_datepicker::theme::Theme;
use std::cell::RefCell;
use std::rc::Rc;

const INPUT: Rect = Rect::new(0, 0, 16, 1);
const BOUNDS: Rect = Rect::new(0, 0, 40, 20);

fn d(y: i32, m: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, day).expect("valid date")
}

fn pinned_calendar() -> CalendarOptions {
    CalendarOptions {
        today: Some(d(2024, 1, 20)),
        ..Default::default()
    }
}

/// Picker with a pinned "today" and a log of every `on_change` call.
fn picker() -> (DatePicker, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_in = Rc::clone(&log);
    let picker = DatePicker::with_options(DatePickerOptions {
        calendar: pinned_calendar(),
        ..Default::default()
    })
    .on_change(move |text| log_in.borrow_mut().push(text.to_string()));
    (picker, log)
}

fn draw(picker: &mut DatePicker) -> Buffer {
    let mut buf = Buffer::empty(BOUNDS);
    picker.render(INPUT, BOUNDS, &mut buf, &Theme::default());
    buf
}

fn type_text(picker: &mut DatePicker, text: &str) {
    for ch in text.chars() {
        picker.handle_event(InputEvent::Key(keymap::key_char(ch)));
    }
}

fn click(x: u16, y: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent::left_click(x, y))
}

#[test]
fn typing_a_valid_date_closes_and_releases_focus() {
    let (mut p, log) = picker();
    draw(&mut p);
    p.handle_event(click(4, 0));
    assert!(p.is_focused());
    assert!(p.is_open());

    type_text(&mut p, "2024-02-29");

    assert_eq!(log.borrow().last().map(String::as_str), Some("2024-02-29"));
    // One call per accepted digit; typed separators are ignored.
    assert_eq!(log.borrow().len(), 8);
    assert!(!p.is_open());
    assert!(!p.is_focused());
    assert_eq!(p.date(), Some(d(2024, 2, 29)));
}

#[test]
fn typing_an_impossible_date_keeps_the_popover() {
    let (mut p, log) = picker();
    p.focus();
    type_text(&mut p, "2023-02-29");

    assert_eq!(log.borrow().last().map(String::as_str), Some("2023-02-29"));
    assert!(p.is_open());
    assert!(p.is_focused());
    assert_eq!(p.date(), None);
}

#[test]
fn standalone_calendar_trailing_cell_moves_to_next_month() {
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let seen_in = Rc::clone(&seen);
    let mut c = Calendar::with_options(Some(d(2024, 1, 15)), pinned_calendar())
        .on_select(move |iso| seen_in.borrow_mut().push(iso.to_string()));
    let area = Rect::new(0, 0, CALENDAR_WIDTH, CALENDAR_HEIGHT);
    let mut buf = Buffer::empty(area);
    c.render_ref(area, &mut buf, &Theme::default());

    // Fifth week row (y = 2 + 4), Saturday column: the "3" of February.
    assert_eq!(buf[(19, 6)].symbol(), "3");
    let act = c.handle_event_in_area(area, click(19, 6));

    assert_eq!(act, CalendarAction::Selected(d(2024, 2, 3)));
    assert_eq!(*seen.borrow(), vec!["2024-02-03".to_string()]);
    assert_eq!(c.title(), "February 2024");
}

#[test]
fn picking_in_the_popover_reports_once_and_closes() {
    let (mut p, log) = picker();
    draw(&mut p);
    p.handle_event(click(4, 0));
    let buf = draw(&mut p);

    // Bordered popover below the input; the calendar starts at (1, 2), days at y = 4.
    assert_eq!(buf[(20, 8)].symbol(), "3");
    let act = p.handle_event(click(20, 8));

    assert_eq!(
        act,
        DatePickerAction::Changed {
            text: "2024-02-03".to_string(),
            date: Some(d(2024, 2, 3)),
        }
    );
    assert_eq!(*log.borrow(), vec!["2024-02-03".to_string()]);
    assert_eq!(p.value(), "2024-02-03");
    assert!(!p.is_open());
}

#[test]
fn popover_navigation_clicks_stay_open() {
    let (mut p, log) = picker();
    draw(&mut p);
    p.handle_event(click(4, 0));
    draw(&mut p);

    // "<" in the calendar header.
    assert_eq!(p.handle_event(click(2, 2)), DatePickerAction::Redraw);
    assert!(p.is_open());
    assert_eq!(p.calendar().map(Calendar::title).as_deref(), Some("December 2023"));
    assert!(log.borrow().is_empty());
}

#[test]
fn outside_click_dismisses_and_input_click_reopens() {
    let (mut p, _log) = picker();
    draw(&mut p);
    p.handle_event(click(4, 0));
    draw(&mut p);
    assert!(p.is_open());

    assert_eq!(p.handle_event(click(35, 15)), DatePickerAction::Redraw);
    assert!(!p.is_open());
    assert!(!p.is_focused());

    p.handle_event(click(4, 0));
    assert!(p.is_open());
    assert!(p.is_focused());
}

#[test]
fn controlled_value_wins_over_typed_text() {
    let (mut p, log) = picker();
    p.set_value(Some("2024-05-06".to_string()));
    p.focus();
    assert_eq!(p.calendar().and_then(Calendar::selected), Some(d(2024, 5, 6)));

    p.handle_event(InputEvent::Key(keymap::key(KeyCode::Home)));
    p.handle_event(InputEvent::Key(keymap::key_char('1')));
    assert_eq!(*log.borrow(), vec!["1024-05-06".to_string()]);
    // The caller did not accept the change, so the controlled text stays.
    assert_eq!(p.value(), "2024-05-06");

    let accepted = log.borrow()[0].clone();
    p.set_value(Some(accepted.clone()));
    assert_eq!(p.value(), accepted);

    p.set_value(None);
    assert_eq!(p.value(), accepted);
}

#[test]
fn rendered_value_follows_controlled_text() {
    let (mut p, _log) = picker();
    p.set_value(Some("2024-0M-DD".to_string()));
    let buf = draw(&mut p);
    let row: String = (0..INPUT.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
    assert!(row.contains("2024-0M-DD"), "{row:?}");
}

#[test]
fn external_handle_observes_and_drives_focus() {
    let seen = Rc::new(RefCell::new(Vec::<Option<InputHandle>>::new()));
    let seen_in = Rc::clone(&seen);
    let (p, _log) = picker();
    let mut p = p.with_handle(HandleAcceptor::callback(move |h| seen_in.borrow_mut().push(h)));

    let handle = seen
        .borrow()
        .last()
        .cloned()
        .flatten()
        .expect("handle delivered");
    assert!(handle.ptr_eq(&p.input_handle()));

    handle.focus();
    draw(&mut p);
    assert!(p.is_open());

    type_text(&mut p, "2024-01-02");
    assert!(!handle.is_focused());
    assert_eq!(handle.value(), "2024-01-02");

    drop(p);
    assert!(matches!(seen.borrow().last(), Some(None)));
}
