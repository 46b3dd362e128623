use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{Content, Element};
use crate::event::{Event, Key, Modifiers};
use crate::hit::{hit_test, hit_test_focusable};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused and processes events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Drop focus if the focused element is gone from the tree or can no
    /// longer take focus (e.g. it became disabled).
    pub fn retain_in(&mut self, root: &Element) {
        if let Some(id) = &self.focused {
            if !collect_focusable(root).iter().any(|f| f == id) {
                log::debug!("[focus] dropping stale focus on {}", id);
                self.focused = None;
            }
        }
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let first = focusable.first()?;

        let new_focus = match &self.focused {
            None => first.clone(),
            Some(current) => match focusable.iter().position(|id| id == current) {
                Some(i) => focusable[(i + 1) % focusable.len()].clone(),
                None => first.clone(),
            },
        };

        self.switch_to(new_focus)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let last = focusable.last()?;

        let new_focus = match &self.focused {
            None => last.clone(),
            Some(current) => match focusable.iter().position(|id| id == current) {
                Some(0) | None => last.clone(),
                Some(i) => focusable[i - 1].clone(),
            },
        };

        self.switch_to(new_focus)
    }

    fn switch_to(&mut self, new_focus: String) -> Option<String> {
        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    /// Emit Blur/Focus for a focus move that already happened.
    fn push_move(events: &mut Vec<Event>, old: Option<String>, new: String) {
        if let Some(old) = old {
            events.push(Event::Blur {
                target: old,
                new_target: Some(new.clone()),
            });
        }
        events.push(Event::Focus { target: new });
    }

    /// Process raw crossterm events and produce high-level events.
    pub fn process_events(
        &mut self,
        raw: &[CrosstermEvent],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }

                    let key: Key = key_event.code.into();
                    let modifiers: Modifiers = key_event.modifiers.into();

                    if key == Key::Tab || key == Key::BackTab {
                        let old = self.focused.clone();
                        let moved = if key == Key::Tab {
                            self.focus_next(root)
                        } else {
                            self.focus_prev(root)
                        };
                        if let Some(new) = moved {
                            Self::push_move(&mut events, old, new);
                        }
                        continue;
                    }

                    events.push(Event::Key {
                        target: self.focused.clone(),
                        key,
                        modifiers,
                    });
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let x = mouse_event.column;
                    let y = mouse_event.row;

                    if let MouseEventKind::Down(button) = mouse_event.kind {
                        // Clicking a focusable element focuses it
                        if let Some(target) = hit_test_focusable(layout, root, x, y) {
                            let old = self.focused.clone();
                            if let Some(new) = self.switch_to(target) {
                                log::debug!("[focus] click moved focus from {:?} to {}", old, new);
                                Self::push_move(&mut events, old, new);
                            }
                        }

                        events.push(Event::Click {
                            target: hit_test(layout, root, x, y),
                            x,
                            y,
                            button: button.into(),
                        });
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        events
    }
}

/// Collect all focusable element IDs in tree order. Disabled elements are skipped.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.focusable && !element.disabled {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, result);
        }
    }
}

/// Mark the element with `focused_id` as focused (and every other one as not).
/// Text inputs also get their cursor flag set.
pub fn apply_focus(element: &mut Element, focused_id: Option<&str>) {
    let is_focused = focused_id == Some(element.id.as_str());
    element.focused = is_focused;

    match &mut element.content {
        Content::TextInput { focused, .. } => *focused = is_focused,
        Content::Children(children) => {
            for child in children {
                apply_focus(child, focused_id);
            }
        }
        _ => {}
    }
}
