//! The terminal event loop.
//!
//! Synchronous: poll, route each event to completion, rebuild, render. A poll
//! timeout advances the spinner.

use std::time::Duration;

use fieldgrid::theme::widget_theme;
use fieldgrid::{Dispatcher, HandlerRegistry};
use tuidom::{apply_focus, Element, Event, FocusState, Key, Terminal};

use crate::error::DemoError;
use crate::stories::Gallery;

/// What a key means to the host rather than to the focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    NextStory,
    PrevStory,
}

impl Command {
    pub fn from_event(event: &Event) -> Option<Command> {
        let Event::Key { key, modifiers, .. } = event else {
            return None;
        };
        match key {
            Key::Escape => Some(Command::Quit),
            Key::Char('c') if modifiers.ctrl => Some(Command::Quit),
            Key::F(2) => Some(Command::PrevStory),
            Key::F(3) => Some(Command::NextStory),
            _ => None,
        }
    }
}

/// Rebuild the page and mark the focused element.
pub fn rebuild(
    gallery: &mut Gallery,
    registry: &HandlerRegistry,
    focus: &mut FocusState,
) -> Element {
    registry.clear();
    gallery.set_focus(focus.focused());
    let mut root = gallery.build(registry);
    focus.retain_in(&root);
    apply_focus(&mut root, focus.focused());
    root
}

pub fn run(gallery: &mut Gallery, tick: Duration) -> Result<(), DemoError> {
    let mut terminal = Terminal::new()?;
    let theme = widget_theme();
    let registry = HandlerRegistry::new();
    let mut focus = FocusState::new();

    let mut root = rebuild(gallery, &registry, &mut focus);
    terminal.render(&root, &theme)?;
    log::info!("opened story {}", gallery.story().name());

    loop {
        let raw = terminal.poll(Some(tick))?;
        if raw.is_empty() {
            gallery.tick();
            root = rebuild(gallery, &registry, &mut focus);
            terminal.render(&root, &theme)?;
            continue;
        }

        for raw_event in &raw {
            let events =
                focus.process_events(std::slice::from_ref(raw_event), &root, terminal.layout());

            for event in &events {
                match Command::from_event(event) {
                    Some(Command::Quit) => {
                        log::info!("quit");
                        return Ok(());
                    }
                    Some(Command::NextStory) => {
                        focus.blur();
                        gallery.set_story(gallery.story().next());
                    }
                    Some(Command::PrevStory) => {
                        focus.blur();
                        gallery.set_story(gallery.story().prev());
                    }
                    None => {
                        Dispatcher::new(&registry, &root).dispatch(event);
                    }
                }
            }

            // Handlers see the tree the event was produced against; the next
            // event sees the rebuilt one
            root = rebuild(gallery, &registry, &mut focus);
            terminal.render(&root, &theme)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use tuidom::Modifiers;

    use super::*;

    fn key(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            target: None,
            key,
            modifiers,
        }
    }

    #[test]
    fn host_commands() {
        assert_eq!(
            Command::from_event(&key(Key::Escape, Modifiers::default())),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_event(&key(Key::Char('c'), Modifiers::ctrl())),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_event(&key(Key::F(3), Modifiers::default())),
            Some(Command::NextStory)
        );
        assert_eq!(Command::from_event(&key(Key::Char('c'), Modifiers::default())), None);
        assert_eq!(Command::from_event(&Event::Resize { width: 1, height: 1 }), None);
    }
}
