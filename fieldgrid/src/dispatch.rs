//! Route tuidom events to the handlers widgets registered.

use tuidom::element::find_element;
use tuidom::{Element, Event, Key, MouseButton};

use crate::handler_context::{events, EventData, HandlerContext, HandlerRegistry};

/// Routes [`tuidom::Event`]s to handlers in a [`HandlerRegistry`].
///
/// The dispatcher needs the tree the events were produced against so it can
/// tell text inputs from other focusable elements and skip disabled ones.
///
/// | event                                  | handler        |
/// |----------------------------------------|----------------|
/// | left click on an element               | `on_click`     |
/// | Enter on an input-capturing element    | `on_submit`    |
/// | other key on an input-capturing element| `on_key`       |
/// | Enter / Space on any other element     | `on_activate`  |
/// | other key on any other element         | `on_key`       |
pub struct Dispatcher<'a> {
    registry: &'a HandlerRegistry,
    root: &'a Element,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a HandlerRegistry, root: &'a Element) -> Self {
        Self { registry, root }
    }

    /// Dispatch one event. Returns true if a handler ran.
    pub fn dispatch(&self, event: &Event) -> bool {
        match event {
            Event::Click {
                target: Some(target),
                x,
                y,
                button: MouseButton::Left,
            } => self.invoke(target, events::ON_CLICK, EventData::Click { x: *x, y: *y }),

            Event::Key {
                target: Some(target),
                key,
                modifiers,
            } => {
                let Some(element) = find_element(self.root, target) else {
                    log::trace!("[dispatch] key for unknown element {}", target);
                    return false;
                };
                let event_name = match key {
                    Key::Enter if element.captures_input => events::ON_SUBMIT,
                    _ if element.captures_input => events::ON_KEY,
                    Key::Enter | Key::Char(' ') if modifiers.none() => events::ON_ACTIVATE,
                    _ => events::ON_KEY,
                };
                let data = EventData::Key {
                    key: *key,
                    modifiers: *modifiers,
                };
                self.invoke(target, event_name, data)
            }

            _ => false,
        }
    }

    /// Dispatch a batch of events in order. Returns how many reached a handler.
    pub fn dispatch_all(&self, events: &[Event]) -> usize {
        events.iter().filter(|event| self.dispatch(event)).count()
    }

    fn invoke(&self, target: &str, event_name: &str, data: EventData) -> bool {
        if find_element(self.root, target).is_some_and(|el| el.disabled) {
            log::trace!("[dispatch] {} on disabled {}", event_name, target);
            return false;
        }
        let Some(handler) = self.registry.get(target, event_name) else {
            return false;
        };
        log::debug!("[dispatch] {} -> {}", event_name, target);
        handler(&HandlerContext::new(target, data));
        true
    }
}
