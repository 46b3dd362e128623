use fieldgrid::{Dispatcher, HandlerRegistry};
use fieldgrid_demo::app::rebuild;
use fieldgrid_demo::data::sample_users;
use fieldgrid_demo::stories::{Gallery, Story};
use tuidom::element::{find_by_data, find_element, text_content};
use tuidom::{Buffer, Element, Event, FocusState, Key, Modifiers, MouseButton, Rect};

struct Host {
    gallery: Gallery,
    registry: HandlerRegistry,
    focus: FocusState,
    root: Element,
}

impl Host {
    fn new(story: Story) -> Self {
        let mut gallery = Gallery::new(story, sample_users());
        let registry = HandlerRegistry::new();
        let mut focus = FocusState::new();
        let root = rebuild(&mut gallery, &registry, &mut focus);
        Self {
            gallery,
            registry,
            focus,
            root,
        }
    }

    fn refresh(&mut self) {
        self.root = rebuild(&mut self.gallery, &self.registry, &mut self.focus);
    }

    fn type_into(&mut self, target: &str, text: &str) {
        for c in text.chars() {
            Dispatcher::new(&self.registry, &self.root).dispatch(&Event::Key {
                target: Some(target.to_string()),
                key: Key::Char(c),
                modifiers: Modifiers::default(),
            });
            self.refresh();
        }
    }

    fn click(&mut self, target: &str) {
        Dispatcher::new(&self.registry, &self.root).dispatch(&Event::Click {
            target: Some(target.to_string()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        });
        self.refresh();
    }

    fn render(&self) -> Buffer {
        let layout = tuidom::layout::layout(&self.root, Rect::new(0, 0, 80, 40));
        let mut buf = Buffer::new(80, 40);
        tuidom::render::render_to_buffer(
            &self.root,
            &layout,
            &mut buf,
            &fieldgrid::theme::widget_theme(),
        );
        buf
    }

    fn user_rows(&self) -> usize {
        (0..)
            .take_while(|i| find_element(&self.root, &format!("users-row-{}", i)).is_some())
            .count()
    }
}

#[test]
fn every_story_builds_and_renders() {
    for story in Story::ALL {
        let host = Host::new(story);
        let buf = host.render();
        assert!(
            buf.row_text(1).contains(story.title()),
            "{} missing title",
            story.name()
        );
    }
}

#[test]
fn search_filters_the_table() {
    let mut host = Host::new(Story::Demo);
    assert_eq!(host.user_rows(), 3);

    host.type_into("search-input", "ali");
    assert_eq!(host.gallery.value("search").as_deref(), Some("ali"));
    assert_eq!(host.user_rows(), 1);
    assert!(text_content(find_element(&host.root, "users-row-0").unwrap()).contains("Alice"));

    host.click("search-clear");
    assert_eq!(host.user_rows(), 3);
}

#[test]
fn search_with_no_match_shows_empty_message() {
    let mut host = Host::new(Story::Demo);
    host.type_into("search-input", "zzz");

    assert!(find_element(&host.root, "users-empty").is_some());
    assert!(host.render().find_row("No data available").is_some());
}

#[test]
fn selection_reaches_the_status_line() {
    let mut host = Host::new(Story::Demo);
    host.click("users-select-1");

    let status = find_element(&host.root, "demo-status").unwrap();
    assert_eq!(text_content(status), "Selected: Bob Smith");
    assert_eq!(host.gallery.selected().len(), 1);

    // Identity keys keep Bob selected while he is filtered out and back
    host.type_into("search-input", "alice");
    host.click("users-select-0");
    let status = find_element(&host.root, "demo-status").unwrap();
    assert_eq!(text_content(status), "Selected: Alice Johnson");

    host.click("search-clear");
    host.click("users-header-name");
    let bob = find_element(&host.root, "users-select-1").unwrap();
    assert_eq!(text_content(bob), "[x]");
}

#[test]
fn password_story_toggles_mask() {
    let mut host = Host::new(Story::FieldStates);
    assert!(find_by_data(&host.root, "label", "Show password").is_some());

    host.click("password-toggle");
    assert!(find_by_data(&host.root, "label", "Hide password").is_some());
    assert_eq!(host.gallery.value("secret").as_deref(), Some("secret"));
}

#[test]
fn clearable_story_shares_the_password_value() {
    let mut host = Host::new(Story::FieldStates);
    host.click("clearable-clear");

    assert_eq!(host.gallery.value("secret").as_deref(), Some(""));
    assert!(find_element(&host.root, "clearable-clear").is_none());
}

#[test]
fn loading_story_shows_placeholders() {
    let host = Host::new(Story::TableLoading);
    assert!(find_element(&host.root, "loading-loading-2").is_some());
    assert!(find_element(&host.root, "loading-row-0").is_none());
}

#[test]
fn story_cycle_wraps() {
    assert_eq!(Story::TableSelectable.next(), Story::Demo);
    assert_eq!(Story::Demo.prev(), Story::TableSelectable);
    assert_eq!(Story::FieldBasic.next(), Story::FieldVariants);
}
