use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtButton, MouseEvent,
    MouseEventKind,
};
use tuidom::element::Content;
use tuidom::{
    apply_focus, collect_focusable, hit_test, hit_test_focusable, Element, Event, FocusState, Key,
    LayoutResult, MouseButton, Rect,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
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

fn three_buttons() -> Element {
    Element::col()
        .id("root")
        .child(Element::text("A").id("a").focusable(true))
        .child(Element::text("B").id("b").focusable(true))
        .child(Element::text("C").id("c").focusable(true))
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::box_()
        .id("root")
        .clickable(true)
        .child(Element::text("Click me").id("btn").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), Some("btn".to_string()));
    assert_eq!(hit_test(&layout, &root, 5, 5), Some("root".to_string()));
    assert_eq!(hit_test(&layout, &root, 150, 150), None);
}

#[test]
fn test_hit_test_skips_non_clickable_and_disabled() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("plain").id("plain"))
        .child(Element::text("off").id("off").clickable(true).disabled(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 20, 2)),
        ("plain", Rect::new(0, 0, 20, 1)),
        ("off", Rect::new(0, 1, 20, 1)),
    ]);

    assert_eq!(hit_test(&layout, &root, 1, 0), None);
    assert_eq!(hit_test(&layout, &root, 1, 1), None);
}

#[test]
fn test_hit_test_focusable_finds_deepest() {
    let root = Element::box_()
        .id("root")
        .focusable(true)
        .child(Element::text_input("").id("input"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 20, 3)),
        ("input", Rect::new(0, 1, 20, 1)),
    ]);

    assert_eq!(hit_test_focusable(&layout, &root, 3, 1), Some("input".to_string()));
    assert_eq!(hit_test_focusable(&layout, &root, 3, 0), Some("root".to_string()));
}

// ============================================================================
// Focus State
// ============================================================================

#[test]
fn test_focus_state_focus_blur() {
    let mut state = FocusState::new();
    assert_eq!(state.focused(), None);

    assert!(state.focus("a"));
    assert!(!state.focus("a"));
    assert_eq!(state.focused(), Some("a"));

    assert!(state.blur());
    assert!(!state.blur());
}

#[test]
fn test_focus_next_wraps() {
    let root = three_buttons();
    let mut state = FocusState::new();

    assert_eq!(state.focus_next(&root), Some("a".to_string()));
    assert_eq!(state.focus_next(&root), Some("b".to_string()));
    assert_eq!(state.focus_next(&root), Some("c".to_string()));
    assert_eq!(state.focus_next(&root), Some("a".to_string()));
}

#[test]
fn test_focus_prev_wraps() {
    let root = three_buttons();
    let mut state = FocusState::new();

    assert_eq!(state.focus_prev(&root), Some("c".to_string()));
    assert_eq!(state.focus_prev(&root), Some("b".to_string()));
    state.focus("a");
    assert_eq!(state.focus_prev(&root), Some("c".to_string()));
}

#[test]
fn test_focus_single_element_does_not_change() {
    let root = Element::col().child(Element::text("only").id("only").focusable(true));
    let mut state = FocusState::new();

    assert_eq!(state.focus_next(&root), Some("only".to_string()));
    assert_eq!(state.focus_next(&root), None);
}

#[test]
fn test_collect_focusable_skips_disabled() {
    let root = Element::col()
        .child(Element::text("A").id("a").focusable(true))
        .child(Element::text("B").id("b").focusable(true).disabled(true))
        .child(
            Element::row().child(Element::text("C").id("c").focusable(true)),
        );

    assert_eq!(collect_focusable(&root), vec!["a", "c"]);
}

#[test]
fn test_retain_in_drops_missing_focus() {
    let mut state = FocusState::new();
    state.focus("gone");
    state.retain_in(&three_buttons());
    assert_eq!(state.focused(), None);

    state.focus("b");
    state.retain_in(&three_buttons());
    assert_eq!(state.focused(), Some("b"));
}

#[test]
fn test_apply_focus_marks_text_input() {
    let mut root = Element::col()
        .child(Element::text_input("x").id("input"))
        .child(Element::text("B").id("b").focusable(true));

    apply_focus(&mut root, Some("input"));

    let children = root.child_elements();
    assert!(children[0].focused);
    assert!(matches!(children[0].content, Content::TextInput { focused: true, .. }));
    assert!(!children[1].focused);

    apply_focus(&mut root, Some("b"));
    let children = root.child_elements();
    assert!(matches!(children[0].content, Content::TextInput { focused: false, .. }));
    assert!(children[1].focused);
}

// ============================================================================
// Event processing
// ============================================================================

#[test]
fn test_tab_emits_blur_then_focus() {
    let root = three_buttons();
    let layout = LayoutResult::new();
    let mut state = FocusState::new();

    let events = state.process_events(&[key(KeyCode::Tab)], &root, &layout);
    assert_eq!(events, vec![Event::Focus { target: "a".into() }]);

    let events = state.process_events(&[key(KeyCode::Tab)], &root, &layout);
    assert_eq!(
        events,
        vec![
            Event::Blur {
                target: "a".into(),
                new_target: Some("b".into())
            },
            Event::Focus { target: "b".into() },
        ]
    );

    let events = state.process_events(&[key(KeyCode::BackTab)], &root, &layout);
    assert_eq!(events.last(), Some(&Event::Focus { target: "a".into() }));
}

#[test]
fn test_keys_target_focused_element() {
    let root = three_buttons();
    let layout = LayoutResult::new();
    let mut state = FocusState::new();
    state.focus("b");

    let events = state.process_events(&[key(KeyCode::Char('x'))], &root, &layout);

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Key { target, key, .. } => {
            assert_eq!(target.as_deref(), Some("b"));
            assert_eq!(*key, Key::Char('x'));
        }
        other => panic!("expected key event, got {other:?}"),
    }
}

#[test]
fn test_click_focuses_and_targets_clickable() {
    let root = Element::col()
        .id("root")
        .child(
            Element::text("row")
                .id("row")
                .focusable(true)
                .clickable(true),
        );
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 2)),
        ("row", Rect::new(0, 1, 10, 1)),
    ]);
    let mut state = FocusState::new();

    let events = state.process_events(&[mouse_down(2, 1)], &root, &layout);

    assert_eq!(
        events,
        vec![
            Event::Focus { target: "row".into() },
            Event::Click {
                target: Some("row".into()),
                x: 2,
                y: 1,
                button: MouseButton::Left,
            },
        ]
    );
    assert_eq!(state.focused(), Some("row"));
}

#[test]
fn test_resize_passes_through() {
    let root = three_buttons();
    let mut state = FocusState::new();

    let events = state.process_events(&[CtEvent::Resize(80, 24)], &root, &LayoutResult::new());

    assert_eq!(
        events,
        vec![Event::Resize {
            width: 80,
            height: 24
        }]
    );
}
