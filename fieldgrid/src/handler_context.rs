//! Handler types shared by the widgets and the dispatcher.
//!
//! - `Handler`: closure type for handlers
//! - `EventData`: what the triggering event carried
//! - `HandlerContext`: passed to every handler invocation
//! - `HandlerRegistry`: widget handlers keyed by (element_id, event_name)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tuidom::{Key, Modifiers};

// =============================================================================
// Handler Type
// =============================================================================

/// A handler closure that receives a HandlerContext.
///
/// Handlers capture whatever state handles and callbacks they need when the
/// widget is built.
pub type Handler = Arc<dyn Fn(&HandlerContext) + Send + Sync>;

/// Standard event names:
/// - `"on_click"` - mouse click on a clickable element
/// - `"on_activate"` - Enter/Space on a focused element
/// - `"on_key"` - any other key on a focused element (text input for fields)
/// - `"on_submit"` - Enter on a focused input-capturing element
pub mod events {
    pub const ON_CLICK: &str = "on_click";
    pub const ON_ACTIVATE: &str = "on_activate";
    pub const ON_KEY: &str = "on_key";
    pub const ON_SUBMIT: &str = "on_submit";
}

// =============================================================================
// Event Data
// =============================================================================

/// Event-specific data passed to handlers via HandlerContext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventData {
    /// No event data.
    #[default]
    None,
    /// Mouse click at screen coordinates.
    Click { x: u16, y: u16 },
    /// Key press on the focused element.
    Key { key: Key, modifiers: Modifiers },
}

impl EventData {
    /// The typed character, if this is a plain (no ctrl/alt) character key.
    pub fn typed_char(&self) -> Option<char> {
        match self {
            EventData::Key {
                key: Key::Char(c),
                modifiers,
            } if !modifiers.ctrl && !modifiers.alt => Some(*c),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<Key> {
        match self {
            EventData::Key { key, .. } => Some(*key),
            _ => None,
        }
    }
}

// =============================================================================
// HandlerContext
// =============================================================================

/// Context passed to widget handlers.
#[derive(Debug)]
pub struct HandlerContext<'a> {
    target: &'a str,
    event_data: EventData,
}

impl<'a> HandlerContext<'a> {
    pub fn new(target: &'a str, event_data: EventData) -> Self {
        Self { target, event_data }
    }

    /// The element id the event was routed to.
    pub fn target(&self) -> &str {
        self.target
    }

    /// Get the event data.
    pub fn event(&self) -> &EventData {
        &self.event_data
    }
}

// =============================================================================
// HandlerRegistry
// =============================================================================

/// Registry for widget event handlers.
///
/// Maps (element_id, event) to handler closures. Hosts clear it before each
/// rebuild so handlers from previous builds don't persist.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, String), Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event, replacing any previous one.
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.insert((element_id.to_string(), event.to_string()), handler);
        }
    }

    /// Register the same handler for mouse click and keyboard activation.
    pub fn register_activation(&self, element_id: &str, handler: Handler) {
        self.register(element_id, events::ON_CLICK, handler.clone());
        self.register(element_id, events::ON_ACTIVATE, handler);
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, event: &str) -> Option<Handler> {
        self.handlers
            .read()
            .ok()?
            .get(&(element_id.to_string(), event.to_string()))
            .cloned()
    }

    /// Whether a handler exists for an element event.
    pub fn contains(&self, element_id: &str, event: &str) -> bool {
        self.get(element_id, event).is_some()
    }

    /// Clear all handlers.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn activation_registers_click_and_activate() {
        let registry = HandlerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        registry.register_activation(
            "btn",
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(registry.len(), 2);
        let cx = HandlerContext::new("btn", EventData::None);
        for event in [events::ON_CLICK, events::ON_ACTIVATE] {
            let handler = registry.get("btn", event).unwrap();
            handler(&cx);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn typed_char_ignores_ctrl_combos() {
        let plain = EventData::Key {
            key: Key::Char('a'),
            modifiers: Modifiers::new(),
        };
        let ctrl = EventData::Key {
            key: Key::Char('a'),
            modifiers: Modifiers::ctrl(),
        };
        let shifted = EventData::Key {
            key: Key::Char('A'),
            modifiers: Modifiers::shift(),
        };

        assert_eq!(plain.typed_char(), Some('a'));
        assert_eq!(ctrl.typed_char(), None);
        assert_eq!(shifted.typed_char(), Some('A'));
        assert_eq!(EventData::None.typed_char(), None);
    }
}
