//! Field widget: a labelled single-line text input.
//!
//! The field is controlled. It renders the value passed to [`Field::value`]
//! on this build and reports edits through `on_change`; the host stores the
//! new text and rebuilds. Only the password mask visibility lives in
//! [`FieldState`].

mod config;
mod state;

use std::sync::Arc;

pub use config::{FieldConfig, FieldSize, InputKind, Variant};
pub use state::FieldState;

use tuidom::{Border, Color, Element, Key, Size, Style};

use crate::handler_context::events;
use crate::state::State;
use crate::widgets::spinner::Spinner;
use crate::widgets::NeedsState;
use crate::HandlerRegistry;

pub type TextFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Typestate marker: field has a state reference.
pub struct HasState<'a>(&'a State<FieldState>);

/// A field widget builder.
///
/// # Example
///
/// ```ignore
/// let query = self.query.get();
/// let element = Field::new()
///     .id("search")
///     .label("Search")
///     .placeholder("Type a name or email...")
///     .helper_text("Try searching for 'alice'")
///     .clearable(true)
///     .value(&query)
///     .on_change({
///         let query = self.query.clone();
///         move |text: &str| query.set(text.to_string())
///     })
///     .state(&self.search)
///     .build(&registry);
/// ```
pub struct Field<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    value: String,
    config: FieldConfig,
    on_change: Option<TextFn>,
    on_submit: Option<TextFn>,
    focused: bool,
    spinner_frame: usize,
    width: Option<u16>,
}

impl Default for Field<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl Field<NeedsState> {
    /// Create a new field builder.
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            value: String::new(),
            config: FieldConfig::default(),
            on_change: None,
            on_submit: None,
            focused: false,
            spinner_frame: 0,
            width: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, s: &State<FieldState>) -> Field<HasState<'_>> {
        Field {
            state_marker: HasState(s),
            id: self.id,
            value: self.value,
            config: self.config,
            on_change: self.on_change,
            on_submit: self.on_submit,
            focused: self.focused,
            spinner_frame: self.spinner_frame,
            width: self.width,
        }
    }
}

impl<S> Field<S> {
    /// Set the field id. Child ids are derived from it.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The text to display.
    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Called with the proposed new text on every edit.
    pub fn on_change(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Called with the current text when Enter is pressed.
    pub fn on_submit(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Arc::new(f));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.config.helper_text = Some(text.into());
        self
    }

    /// Shown instead of the helper text while `invalid` is set.
    pub fn error_message(mut self, text: impl Into<String>) -> Self {
        self.config.error_message = Some(text.into());
        self
    }

    /// Overrides the label for assistive output.
    pub fn accessible_label(mut self, text: impl Into<String>) -> Self {
        self.config.accessible_label = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.config.invalid = invalid;
        self
    }

    /// Show a spinner and stop accepting input.
    pub fn loading(mut self, loading: bool) -> Self {
        self.config.loading = loading;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.config.clearable = clearable;
        self
    }

    /// Offer a show/hide control on password fields.
    pub fn password_toggle(mut self, toggle: bool) -> Self {
        self.config.password_toggle = toggle;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn size(mut self, size: FieldSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Replace the whole display configuration.
    pub fn config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Highlight the box border. The host passes whether the input has focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Spinner animation tick while loading.
    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Fixed width in characters. Fills the parent otherwise.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

impl<'a> Field<HasState<'a>> {
    /// Build the field element and register its handlers.
    pub fn build(self, registry: &HandlerRegistry) -> Element {
        let state = self.state_marker.0;
        let field_state = state.get();
        let field_id = self.id.clone().unwrap_or_else(|| "field".into());
        let config = &self.config;

        let width = self.width.map_or(Size::Fill, Size::Fixed);
        let mut field = Element::col()
            .id(&field_id)
            .width(width)
            .height(Size::Auto)
            .data("role", "field");

        if let Some(label) = &config.label {
            field = field.child(self.build_label(&field_id, label));
        }

        field = field.child(self.build_box(&field_id, field_state, registry, state));
        field.child(self.build_helper(&field_id))
    }

    fn build_label(&self, field_id: &str, label: &str) -> Element {
        let style = if self.config.disabled {
            Style::new().foreground(Color::var("field.disabled"))
        } else if self.value.is_empty() {
            Style::new().foreground(Color::var("field.label"))
        } else {
            Style::new().foreground(Color::var("field.label_active")).bold()
        };

        let mut el = Element::text(label)
            .id(format!("{}-label", field_id))
            .height(Size::Fixed(1))
            .style(style);
        if !self.value.is_empty() {
            el = el.data("active", "true");
        }
        el
    }

    fn box_style(&self) -> Style {
        let config = &self.config;
        let border_color = if config.invalid {
            Color::var("field.error")
        } else if self.focused && config.interactive() {
            Color::var("field.border_focused")
        } else {
            Color::var("field.border")
        };

        let mut style = match config.variant {
            Variant::Filled => Style::new().background(Color::var("field.bg")),
            Variant::Outlined => Style::new()
                .border(Border::Single)
                .border_color(border_color),
            Variant::Ghost => Style::new(),
        };
        if config.invalid {
            style = style.foreground(Color::var("field.error"));
        } else if config.disabled {
            style = style.foreground(Color::var("field.disabled")).dim();
        }
        style
    }

    fn build_box(
        &self,
        field_id: &str,
        field_state: FieldState,
        registry: &HandlerRegistry,
        state: &State<FieldState>,
    ) -> Element {
        let config = &self.config;
        let mut row = Element::row()
            .id(format!("{}-box", field_id))
            .width(Size::Fill)
            .height(Size::Auto)
            .padding(config.size.padding())
            .gap(1)
            .style(self.box_style())
            .child(self.build_input(field_id, field_state, registry));

        if config.loading {
            row = row.child(
                Spinner::new()
                    .id(format!("{}-spinner", field_id))
                    .frame(self.spinner_frame)
                    .build(),
            );
        }

        if config.clear_visible(&self.value) {
            let clear_id = format!("{}-clear", field_id);
            row = row.child(action(&clear_id, "✕", "Clear input"));

            let on_change = self.on_change.clone();
            registry.register_activation(
                &clear_id,
                Arc::new(move |_hx| {
                    log::debug!("[field] cleared");
                    if let Some(notify) = &on_change {
                        notify("");
                    }
                }),
            );
        }

        if config.toggle_visible() {
            let toggle_id = format!("{}-toggle", field_id);
            let (text, label) = if field_state.mask_visible {
                ("show", "Show password")
            } else {
                ("hide", "Hide password")
            };
            row = row.child(action(&toggle_id, text, label));

            let state_clone = state.clone();
            registry.register_activation(
                &toggle_id,
                Arc::new(move |_hx| {
                    state_clone.update(FieldState::toggle_mask);
                }),
            );
        }

        row
    }

    fn build_input(
        &self,
        field_id: &str,
        field_state: FieldState,
        registry: &HandlerRegistry,
    ) -> Element {
        let config = &self.config;
        let input_id = format!("{}-input", field_id);
        let interactive = config.interactive();

        let mut input = Element::text_input(&self.value)
            .id(&input_id)
            .width(Size::Fill)
            .disabled(!interactive)
            .style_disabled(Style::new().foreground(Color::var("field.disabled")).dim());

        if let Some(placeholder) = &config.placeholder {
            input = input.placeholder(placeholder);
        }
        if config.kind.is_password_like() && field_state.mask_visible {
            input = input.password();
        }
        if let Some(label) = config.accessible_label() {
            input = input.data("label", label);
        }
        if config.invalid {
            input = input.data("invalid", "true");
        }
        if config.loading {
            input = input.data("busy", "true");
        }

        if interactive {
            let value = self.value.clone();
            let on_change = self.on_change.clone();
            registry.register(
                &input_id,
                events::ON_KEY,
                Arc::new(move |hx| {
                    let next = match hx.event().key() {
                        Some(Key::Backspace) if !value.is_empty() => {
                            let mut next = value.clone();
                            next.pop();
                            next
                        }
                        _ => match hx.event().typed_char() {
                            Some(c) => format!("{}{}", value, c),
                            None => return,
                        },
                    };
                    log::trace!("[field] {} -> {:?}", hx.target(), next);
                    if let Some(notify) = &on_change {
                        notify(&next);
                    }
                }),
            );

            if let Some(on_submit) = self.on_submit.clone() {
                let value = self.value.clone();
                registry.register(
                    &input_id,
                    events::ON_SUBMIT,
                    Arc::new(move |_hx| on_submit(&value)),
                );
            }
        }

        input
    }

    fn build_helper(&self, field_id: &str) -> Element {
        let color = if self.config.shows_error() {
            Color::var("field.error")
        } else {
            Color::var("field.helper")
        };
        let mut helper = Element::text(self.config.helper_line().unwrap_or(""))
            .id(format!("{}-helper", field_id))
            .width(Size::Fill)
            .height(Size::Fixed(1))
            .style(Style::new().foreground(color));
        if self.config.shows_error() {
            helper = helper.data("error", "true");
        }
        helper
    }
}

/// A small clickable control inside the box.
fn action(id: &str, text: &str, label: &str) -> Element {
    Element::text(text)
        .id(id)
        .height(Size::Fixed(1))
        .clickable(true)
        .focusable(true)
        .data("label", label)
        .style(Style::new().foreground(Color::var("field.action")))
        .style_focused(
            Style::new()
                .foreground(Color::var("field.action_focused"))
                .bold(),
        )
}
