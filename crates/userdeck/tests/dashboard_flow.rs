#![forbid(unsafe_code)]

//! End-to-end flows: fetch decode → key-driven filtering → rendered frames.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;

use udeck_core::normalize_records;
use udeck_fetch::decode_records;
use userdeck::app::{App, Cmd, Msg};
use userdeck::render::Buffer;
use userdeck::view;

fn press(app: &mut App, code: KeyCode) -> Cmd {
    app.update(Msg::Term(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))))
}

fn screen(app: &App) -> String {
    let mut buf = Buffer::new(80, 24);
    view::draw(app, &mut buf);
    (0..buf.height())
        .map(|y| buf.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn seed_records() -> Vec<udeck_core::Record> {
    normalize_records(vec![
        json!({ "id": 1, "name": "Ana", "email": "ana@x.com", "address": { "city": "Rio" } }),
        json!({ "id": 2, "name": "Bo", "email": "bo@x.com", "address": { "city": "Rio" } }),
    ])
}

#[test]
fn city_then_email_scenario_through_keys() {
    let mut app = App::new();
    app.update(Msg::RecordsLoaded(Ok(seed_records())));

    // City is the sixth catalog entry; one extra row for "(all fields)".
    for _ in 0..6 {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard().options(), vec!["Rio"]);

    // Choosing "Rio" keeps both records.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard().filtered().len(), 2);
    assert!(screen(&app).contains("City = Rio · 2/2"));

    // Switching the field to Email resets the value and re-derives options.
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    for _ in 0..4 {
        press(&mut app, KeyCode::Up); // from City down to row 2 = Email
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard().selection().value(), "");
    assert_eq!(app.dashboard().options(), vec!["ana@x.com", "bo@x.com"]);

    // "bo@x.com" narrows to record 2.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    let matched = app.dashboard().filtered();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id(), 2);

    let frame = screen(&app);
    assert!(frame.contains("Bo"));
    assert!(frame.contains("Email = bo@x.com · 1/2"));
}

#[test]
fn empty_record_set_renders_empty_dashboard() {
    let mut app = App::new();
    app.update(Msg::RecordsLoaded(Ok(Vec::new())));

    // Choosing a field derives no options, so the value pane never shows.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert!(app.dashboard().options().is_empty());

    let frame = screen(&app);
    assert!(frame.contains("No users matched"));
    assert!(frame.contains("press r to show all"));
    assert!(!frame.contains("(any value)"));
}

#[test]
fn record_without_id_gets_ordinal_and_reveals_independently() {
    let body = r#"[
        { "id": 1, "name": "Ana", "username": "ana" },
        { "id": 2, "name": "Bo", "username": "bo" },
        { "name": "Cy", "username": "cy" }
    ]"#;
    let records = decode_records(body).unwrap();
    assert_eq!(records[2].id(), 3);

    let mut app = App::new();
    app.update(Msg::RecordsLoaded(Ok(records)));

    // Walk to the third card and double-activate it.
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert!(app.dashboard().is_revealed(3));
    assert!(!app.dashboard().is_revealed(1));
    assert!(!app.dashboard().is_revealed(2));
}

#[test]
fn reveal_round_trip_changes_rendered_frame() {
    let mut app = App::new();
    app.update(Msg::RecordsLoaded(Ok(seed_records())));

    let masked = screen(&app);
    assert!(!masked.contains("ana@x.com"));

    press(&mut app, KeyCode::Tab); // no options yet: straight to cards
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    let revealed = screen(&app);
    assert!(revealed.contains("ana@x.com"));

    // Toggle back: masked again, no automatic transition involved.
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    let masked_again = screen(&app);
    assert!(!masked_again.contains("ana@x.com"));
}

#[test]
fn quit_from_any_focus() {
    let mut app = App::new();
    app.update(Msg::RecordsLoaded(Ok(seed_records())));
    press(&mut app, KeyCode::Tab);
    assert_eq!(press(&mut app, KeyCode::Char('q')), Cmd::Quit);
}
