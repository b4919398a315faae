use std::{cell::RefCell, rc::Rc};

use chrono::{Datelike, NaiveDate};
use formwidgets::{
    DatePicker, FixedClock, FnBinding, Model, ModelBinding, PickerAction, PopupRegistry,
    PopupTransition, RedrawCounter, UiEvent, ViewCursor,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn february_scenario_with_past_restriction() {
    let model = Model::new("2024-02-15");
    let picker = DatePicker::builder(model.clone())
        .attrs(json!({"format": "YYYY-MM-DD", "disablePast": true}))
        .build(&PopupRegistry::new());

    assert_eq!(picker.cursor(), ViewCursor::new(2024, 1));
    let today = picker.today();
    let weeks = picker.weeks();
    let cells: Vec<_> = weeks.iter().flatten().collect();

    let selected: Vec<_> = cells.iter().filter(|cell| cell.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].date, date(2024, 2, 15));

    for cell in &cells {
        assert_eq!(cell.disabled, cell.date < today, "{}", cell.date);
        assert_eq!(cell.offset, cell.date.month() != 2, "{}", cell.date);
    }
    assert!(cells.iter().any(|cell| cell.date.month() == 1 && cell.offset));
    assert!(cells.iter().any(|cell| cell.date.month() == 3 && cell.offset));
}

#[test]
fn twelve_steps_return_to_same_month_next_year() {
    let model = Model::new("2023-05-02");
    let mut picker = DatePicker::builder(model.clone())
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .build(&PopupRegistry::new());
    for _ in 0..12 {
        picker.next_month(&mut UiEvent::click());
    }
    assert_eq!(picker.cursor(), ViewCursor::new(2024, 4));
    assert_eq!(model.get(), "2023-05-02");
}

#[test]
fn previous_from_january_wraps_year() {
    let model = Model::new("2024-01-20");
    let mut picker = DatePicker::builder(model)
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .build(&PopupRegistry::new());
    let mut event = UiEvent::click();
    picker.previous_month(&mut event);
    assert!(event.is_propagation_stopped());
    assert_eq!(picker.cursor(), ViewCursor::new(2023, 11));
    assert_eq!(picker.title(), "DEC 2023");
}

#[test]
fn two_pickers_share_one_open_slot() {
    let registry = PopupRegistry::new();
    let mut start = DatePicker::builder(Model::default())
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .build(&registry);
    let mut end = DatePicker::builder(Model::default())
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .build(&registry);

    start.dispatch(PickerAction::Toggle, &mut UiEvent::click());
    assert!(start.is_open());

    let transition = end.dispatch(PickerAction::Toggle, &mut UiEvent::click());
    assert_eq!(
        transition,
        PopupTransition::Opened {
            replaced: Some(start.binder().id())
        }
    );
    assert!(!start.is_open());
    assert!(end.is_open());

    // Closing a popup that is not current leaves the registry alone.
    assert_eq!(start.binder().close(), PopupTransition::Unchanged);
    assert!(end.is_open());

    // A second click on the same anchor closes its own popup.
    end.dispatch(PickerAction::Toggle, &mut UiEvent::click());
    assert!(!end.is_open());
    assert_eq!(registry.current(), None);
}

#[test]
fn navigation_inside_open_popup_does_not_close_it() {
    let registry = PopupRegistry::new();
    let mut picker = DatePicker::builder(Model::default())
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .build(&registry);
    picker.dispatch(PickerAction::Toggle, &mut UiEvent::click());
    for action in [PickerAction::Next, PickerAction::Previous, PickerAction::Next] {
        let mut event = UiEvent::click();
        assert_eq!(picker.dispatch(action, &mut event), PopupTransition::Unchanged);
        assert!(event.is_propagation_stopped());
    }
    assert!(picker.is_open());
}

#[test]
fn host_binding_receives_formatted_selection() {
    let store = Rc::new(RefCell::new(String::from("03.01.2022")));
    let reader = Rc::clone(&store);
    let writer = Rc::clone(&store);
    let binding = FnBinding::new(
        move || reader.borrow().clone(),
        move |value| *writer.borrow_mut() = value,
    );
    let redraw = RedrawCounter::new();
    let mut picker = DatePicker::builder(binding)
        .attrs(json!({"format": "DD.MM.YYYY", "hideOffset": true}))
        .clock(FixedClock(date(2022, 1, 10)))
        .redraw(redraw.clone())
        .build(&PopupRegistry::new());

    assert_eq!(picker.selected_date(), Some(date(2022, 1, 3)));
    assert!(picker.select(date(2022, 1, 28)));
    assert_eq!(store.borrow().as_str(), "28.01.2022");
    assert!(redraw.take());

    // Dec 26..31 are offset cells of January 2022 and hidden.
    assert!(!picker.select(date(2021, 12, 31)));
    assert_eq!(store.borrow().as_str(), "28.01.2022");
}

#[test]
fn external_write_is_picked_up_before_render() {
    let model = Model::new("");
    let mut picker = DatePicker::builder(model.clone())
        .attrs(json!({"format": "YYYY-MM-DD"}))
        .clock(FixedClock(date(2024, 6, 1)))
        .build(&PopupRegistry::new());
    assert_eq!(picker.cursor(), ViewCursor::new(2024, 5));

    model.set("2030-11-05".to_string());
    picker.render();
    assert_eq!(picker.cursor(), ViewCursor::new(2030, 10));
    assert_eq!(picker.selected_date(), Some(date(2030, 11, 5)));

    model.set("garbage".to_string());
    picker.render();
    assert_eq!(picker.cursor(), ViewCursor::new(2024, 5));
    assert_eq!(picker.selected_date(), None);
}

#[test]
fn wrong_attribute_types_fall_back_to_defaults() {
    let picker = DatePicker::builder(Model::new("2024-02-15"))
        .attrs(json!({"format": 12, "disablePast": "yes", "label": "Start"}))
        .clock(FixedClock(date(2024, 2, 20)))
        .build(&PopupRegistry::new());
    assert_eq!(picker.pattern().as_str(), "YYYY-MM-DD");
    assert!(!picker.attrs().disable_past);
    assert_eq!(picker.field().label(), Some("Start"));
    assert_eq!(picker.field().issues().len(), 2);
    assert_eq!(picker.selected_date(), Some(date(2024, 2, 15)));
}
