use std::sync::{Arc, Mutex};

use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtButton, MouseEvent,
    MouseEventKind,
};
use fieldgrid::prelude::*;
use tuidom::element::find_element;
use tuidom::{apply_focus, Element, Event, FocusState, Key, LayoutResult, Modifiers, Rect, Size};

#[derive(Clone, Debug)]
struct Item {
    name: &'static str,
}

fn items() -> Vec<Item> {
    vec![Item { name: "pear" }, Item { name: "apple" }, Item { name: "fig" }]
}

fn key(code: KeyCode) -> CtEvent {
    CtEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse_down(x: u16, y: u16) -> CtEvent {
    CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(CtButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    })
}

/// A search field above a selectable table, driven like the demo loop.
struct Page {
    query: State<String>,
    search: State<FieldState>,
    table: State<TableState>,
    selected: Arc<Mutex<Vec<String>>>,
    registry: HandlerRegistry,
    focus: FocusState,
    root: Element,
    layout: LayoutResult,
}

impl Page {
    fn new() -> Self {
        let mut page = Self {
            query: State::new(String::new()),
            search: State::new(FieldState::default()),
            table: State::new(TableState::default()),
            selected: Arc::new(Mutex::new(Vec::new())),
            registry: HandlerRegistry::new(),
            focus: FocusState::new(),
            root: Element::box_(),
            layout: LayoutResult::new(),
        };
        page.rebuild();
        page
    }

    fn rebuild(&mut self) {
        self.registry.clear();
        let query = self.query.get();
        let query_state = self.query.clone();
        let selected = self.selected.clone();
        let columns = [Column::new("name", "Name", |i: &Item| i.name).sortable()];

        let mut root = Element::col()
            .id("page")
            .width(Size::Fill)
            .height(Size::Fill)
            .child(
                Field::new()
                    .id("search")
                    .value(&query)
                    .clearable(true)
                    .on_change(move |text: &str| query_state.set(text.to_string()))
                    .state(&self.search)
                    .build(&self.registry),
            )
            .child(
                Table::new()
                    .id("items")
                    .rows(&items())
                    .columns(&columns)
                    .selectable(true)
                    .row_key(|i: &Item| i.name.to_string())
                    .on_row_select(move |rows: &[Item]| {
                        *selected.lock().unwrap() = rows.iter().map(|i| i.name.to_string()).collect();
                    })
                    .state(&self.table)
                    .build(&self.registry),
            );

        self.focus.retain_in(&root);
        apply_focus(&mut root, self.focus.focused());
        self.layout = tuidom::layout::layout(&root, Rect::new(0, 0, 40, 12));
        self.root = root;
    }

    /// Feed raw terminal events through focus and dispatch, rebuilding after each.
    fn send(&mut self, raw: &[CtEvent]) -> usize {
        let mut handled = 0;
        for event in raw {
            let events = self
                .focus
                .process_events(std::slice::from_ref(event), &self.root, &self.layout);
            handled += Dispatcher::new(&self.registry, &self.root).dispatch_all(&events);
            self.rebuild();
        }
        handled
    }

    fn center_of(&self, id: &str) -> (u16, u16) {
        let rect = self.layout.get(id).unwrap();
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }
}

#[test]
fn typing_into_focused_field_updates_the_value() {
    let mut page = Page::new();

    page.send(&[key(KeyCode::Tab)]);
    assert_eq!(page.focus.focused(), Some("search-input"));

    page.send(&[
        key(KeyCode::Char('f')),
        key(KeyCode::Char('i')),
        key(KeyCode::Char('g')),
        key(KeyCode::Backspace),
    ]);
    assert_eq!(page.query.get(), "fi");
}

#[test]
fn clicking_the_clear_button_empties_the_field() {
    let mut page = Page::new();
    page.query.set("apple".into());
    page.rebuild();

    let (x, y) = page.center_of("search-clear");
    assert_eq!(page.send(&[mouse_down(x, y)]), 1);
    assert_eq!(page.query.get(), "");
    assert!(find_element(&page.root, "search-clear").is_none());
}

#[test]
fn clicking_a_header_sorts() {
    let mut page = Page::new();

    let (x, y) = page.center_of("items-header-name");
    page.send(&[mouse_down(x, y)]);

    let sort = page.table.get().sort;
    assert_eq!(sort.active.as_deref(), Some("name"));
    assert_eq!(sort.direction, SortDirection::Ascending);
    assert_eq!(page.focus.focused(), Some("items-header-name"));

    // Enter on the focused header flips it
    page.send(&[key(KeyCode::Enter)]);
    assert_eq!(page.table.get().sort.direction, SortDirection::Descending);
}

#[test]
fn enter_and_space_toggle_the_focused_row() {
    let mut page = Page::new();

    // search-input, header, then the first row
    page.send(&[key(KeyCode::Tab), key(KeyCode::Tab), key(KeyCode::Tab)]);
    assert_eq!(page.focus.focused(), Some("items-row-0"));

    page.send(&[key(KeyCode::Enter)]);
    assert_eq!(*page.selected.lock().unwrap(), ["pear"]);

    page.send(&[key(KeyCode::Tab), key(KeyCode::Char(' '))]);
    assert_eq!(*page.selected.lock().unwrap(), ["pear", "apple"]);

    page.send(&[key(KeyCode::Char(' '))]);
    assert_eq!(*page.selected.lock().unwrap(), ["pear"]);
}

#[test]
fn clicking_a_checkbox_toggles_its_row() {
    let mut page = Page::new();

    let (x, y) = page.center_of("items-select-2");
    page.send(&[mouse_down(x, y)]);

    assert_eq!(*page.selected.lock().unwrap(), ["fig"]);
    let checkbox = find_element(&page.root, "items-select-2").unwrap();
    assert_eq!(tuidom::element::text_content(checkbox), "[x]");
}

#[test]
fn events_without_handlers_are_ignored() {
    let page = Page::new();
    let dispatcher = Dispatcher::new(&page.registry, &page.root);

    assert!(!dispatcher.dispatch(&Event::Key {
        target: None,
        key: Key::Char('x'),
        modifiers: Modifiers::default(),
    }));
    assert!(!dispatcher.dispatch(&Event::Key {
        target: Some("nowhere".into()),
        key: Key::Enter,
        modifiers: Modifiers::default(),
    }));
    assert!(!dispatcher.dispatch(&Event::Resize {
        width: 80,
        height: 24,
    }));
    // Headers have no key handler besides activation
    assert!(!dispatcher.dispatch(&Event::Key {
        target: Some("items-header-name".into()),
        key: Key::Char('q'),
        modifiers: Modifiers::default(),
    }));
}

#[test]
fn modified_enter_does_not_activate() {
    let page = Page::new();
    let dispatcher = Dispatcher::new(&page.registry, &page.root);

    assert!(!dispatcher.dispatch(&Event::Key {
        target: Some("items-row-0".into()),
        key: Key::Enter,
        modifiers: Modifiers::ctrl(),
    }));
    assert!(page.table.get().selection.is_empty());
}
