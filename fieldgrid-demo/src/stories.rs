//! The story gallery: one page per widget configuration.
//!
//! [`Gallery`] owns every piece of widget state for the session so values
//! typed on one story are still there after switching away and back.

use std::collections::HashMap;

use clap::ValueEnum;
use fieldgrid::prelude::*;
use serde::{Deserialize, Serialize};
use tuidom::{Color, Edges, Element, Size, Style};

use crate::data::{filter_users, User};

/// Width of the field stories.
const FIELD_WIDTH: u16 = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Story {
    #[default]
    Demo,
    FieldBasic,
    FieldVariants,
    FieldStates,
    TableBasic,
    TableLoading,
    TableEmpty,
    TableSelectable,
}

impl Story {
    pub const ALL: [Story; 8] = [
        Story::Demo,
        Story::FieldBasic,
        Story::FieldVariants,
        Story::FieldStates,
        Story::TableBasic,
        Story::TableLoading,
        Story::TableEmpty,
        Story::TableSelectable,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Story::Demo => "demo",
            Story::FieldBasic => "field-basic",
            Story::FieldVariants => "field-variants",
            Story::FieldStates => "field-states",
            Story::TableBasic => "table-basic",
            Story::TableLoading => "table-loading",
            Story::TableEmpty => "table-empty",
            Story::TableSelectable => "table-selectable",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Story::Demo => "Search users",
            Story::FieldBasic => "Field / Basic",
            Story::FieldVariants => "Field / Variants",
            Story::FieldStates => "Field / States",
            Story::TableBasic => "Table / Basic",
            Story::TableLoading => "Table / Loading",
            Story::TableEmpty => "Table / Empty",
            Story::TableSelectable => "Table / Selectable",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Story {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Story {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name", |u: &User| u.name.clone()).sortable(),
        Column::new("email", "Email", |u: &User| u.email.clone())
            .sortable()
            .flex(2),
        Column::new("role", "Role", |u: &User| u.role.to_string()).sortable(),
    ]
}

pub struct Gallery {
    story: Story,
    users: Vec<User>,
    frame: usize,
    focused: Option<String>,
    values: HashMap<String, State<String>>,
    fields: HashMap<String, State<FieldState>>,
    tables: HashMap<String, State<TableState>>,
    selected: State<Vec<User>>,
}

impl Gallery {
    pub fn new(story: Story, users: Vec<User>) -> Self {
        Self {
            story,
            users,
            frame: 0,
            focused: None,
            values: HashMap::new(),
            fields: HashMap::new(),
            tables: HashMap::new(),
            selected: State::new(Vec::new()),
        }
    }

    pub fn story(&self) -> Story {
        self.story
    }

    pub fn set_story(&mut self, story: Story) {
        if story != self.story {
            log::info!("story {} -> {}", self.story.name(), story.name());
            self.story = story;
        }
    }

    /// Advance the spinner animation.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// The focused element id, used to highlight the field box around it.
    pub fn set_focus(&mut self, focused: Option<&str>) {
        self.focused = focused.map(str::to_string);
    }

    /// Current text of a field, by field id.
    pub fn value(&self, field_id: &str) -> Option<String> {
        self.values.get(field_id).map(State::get)
    }

    /// Rows reported by the demo table's last selection change.
    pub fn selected(&self) -> Vec<User> {
        self.selected.get()
    }

    /// Build the page for the current story.
    pub fn build(&mut self, registry: &HandlerRegistry) -> Element {
        let content = match self.story {
            Story::Demo => self.demo(registry),
            Story::FieldBasic => self.field_basic(registry),
            Story::FieldVariants => self.field_variants(registry),
            Story::FieldStates => self.field_states(registry),
            Story::TableBasic => self.table_story("basic", registry, |t| t),
            Story::TableLoading => self.table_story("loading", registry, |t| t.loading(true)),
            Story::TableEmpty => self.table_story("empty", registry, |t| t),
            Story::TableSelectable => self.table_story("selectable", registry, |t| {
                t.selectable(true).on_row_select(|rows: &[User]| {
                    let names: Vec<&str> = rows.iter().map(|u| u.name.as_str()).collect();
                    log::info!("selected {:?}", names);
                })
            }),
        };

        Element::col()
            .id("page")
            .width(Size::Fill)
            .height(Size::Fill)
            .padding(Edges::symmetric(1, 2))
            .gap(1)
            .style(
                Style::new()
                    .background(Color::var("background"))
                    .foreground(Color::var("foreground")),
            )
            .child(
                Element::text(format!("fieldgrid · {}", self.story.title()))
                    .style(Style::new().foreground(Color::var("primary")).bold()),
            )
            .child(
                Element::text("F2/F3 switch story · Tab move focus · Esc quit")
                    .style(Style::new().foreground(Color::var("muted"))),
            )
            .child(content)
    }

    // =========================================================================
    // State handles
    // =========================================================================

    fn value_state(&mut self, field_id: &str, initial: &str) -> State<String> {
        self.values
            .entry(field_id.to_string())
            .or_insert_with(|| State::new(initial.to_string()))
            .clone()
    }

    fn field_state(&mut self, field_id: &str, kind: InputKind) -> State<FieldState> {
        self.fields
            .entry(field_id.to_string())
            .or_insert_with(|| State::new(FieldState::for_kind(kind)))
            .clone()
    }

    fn table_state(&mut self, table_id: &str) -> State<TableState> {
        self.tables
            .entry(table_id.to_string())
            .or_insert_with(|| State::new(TableState::default()))
            .clone()
    }

    /// A field bound to a stored value: current text plus its id, value and
    /// change notifier already set.
    fn bound_field(&mut self, field_id: &str, initial: &str) -> (String, Field) {
        let value = self.value_state(field_id, initial);
        let text = value.get();
        let field = Field::new()
            .id(field_id)
            .value(&text)
            .focused(self.is_focused(field_id))
            .width(FIELD_WIDTH)
            .on_change(move |next: &str| value.set(next.to_string()));
        (text, field)
    }

    // =========================================================================
    // Stories
    // =========================================================================

    fn demo(&mut self, registry: &HandlerRegistry) -> Element {
        let (query, search) = self.bound_field("search", "");
        let search_state = self.field_state("search", InputKind::Search);
        let search = search
            .label("Search")
            .placeholder("Type a name or email...")
            .helper_text("Try searching for 'alice'")
            .accessible_label("Search input")
            .kind(InputKind::Search)
            .variant(Variant::Outlined)
            .size(FieldSize::Medium)
            .clearable(true)
            .state(&search_state)
            .build(registry);

        let rows = filter_users(&self.users, &query);
        let table_state = self.table_state("users");
        let selected = self.selected.clone();
        let table = Table::new()
            .id("users")
            .rows(&rows)
            .columns(&user_columns())
            .selectable(true)
            .row_key(|u: &User| u.id.to_string())
            .on_row_select(move |rows: &[User]| {
                let names: Vec<&str> = rows.iter().map(|u| u.name.as_str()).collect();
                log::info!("selected rows: {:?}", names);
                selected.set(rows.to_vec());
            })
            .state(&table_state)
            .build(registry);

        let selected = self.selected.get();
        let status = if selected.is_empty() {
            "Selected: none".to_string()
        } else {
            let names: Vec<&str> = selected.iter().map(|u| u.name.as_str()).collect();
            format!("Selected: {}", names.join(", "))
        };

        Element::col()
            .id("demo")
            .width(Size::Fill)
            .gap(1)
            .child(search)
            .child(table)
            .child(
                Element::text(status)
                    .id("demo-status")
                    .style(Style::new().foreground(Color::var("muted"))),
            )
    }

    fn field_basic(&mut self, registry: &HandlerRegistry) -> Element {
        let (_, name) = self.bound_field("name", "");
        let state = self.field_state("name", InputKind::Text);
        name.label("Name")
            .placeholder("Enter your name")
            .helper_text("This is helper text")
            .state(&state)
            .build(registry)
    }

    fn field_variants(&mut self, registry: &HandlerRegistry) -> Element {
        let variants = [
            ("filled", "Filled", Variant::Filled),
            ("outlined", "Outlined", Variant::Outlined),
            ("ghost", "Ghost", Variant::Ghost),
        ];

        let mut col = Element::col().id("variants").width(Size::Fill);
        for (id, label, variant) in variants {
            let (_, field) = self.bound_field(id, "");
            let state = self.field_state(id, InputKind::Text);
            col = col.child(
                field
                    .label(label)
                    .variant(variant)
                    .state(&state)
                    .build(registry),
            );
        }
        col
    }

    fn field_states(&mut self, registry: &HandlerRegistry) -> Element {
        let mut col = Element::col().id("states").width(Size::Fill);

        let disabled = self.field_state("disabled", InputKind::Text);
        col = col.child(
            Field::new()
                .id("disabled")
                .label("Disabled")
                .placeholder("Disabled")
                .disabled(true)
                .width(FIELD_WIDTH)
                .state(&disabled)
                .build(registry),
        );

        let (_, invalid) = self.bound_field("invalid", "");
        let invalid_state = self.field_state("invalid", InputKind::Text);
        col = col.child(
            invalid
                .label("Invalid")
                .invalid(true)
                .error_message("This field is required")
                .state(&invalid_state)
                .build(registry),
        );

        let loading = self.field_state("loading", InputKind::Text);
        col = col.child(
            Field::new()
                .id("loading")
                .label("Loading")
                .placeholder("Loading...")
                .loading(true)
                .spinner_frame(self.frame)
                .width(FIELD_WIDTH)
                .state(&loading)
                .build(registry),
        );

        // Password and clearable share one value
        let secret = self.value_state("secret", "secret");
        let text = secret.get();
        let password = self.field_state("password", InputKind::Password);
        let on_password = secret.clone();
        col = col.child(
            Field::new()
                .id("password")
                .label("Password")
                .kind(InputKind::Password)
                .password_toggle(true)
                .value(&text)
                .focused(self.is_focused("password"))
                .on_change(move |next: &str| on_password.set(next.to_string()))
                .width(FIELD_WIDTH)
                .state(&password)
                .build(registry),
        );

        let clearable = self.field_state("clearable", InputKind::Text);
        col.child(
            Field::new()
                .id("clearable")
                .label("Clearable")
                .clearable(true)
                .value(&text)
                .focused(self.is_focused("clearable"))
                .on_change(move |next: &str| secret.set(next.to_string()))
                .width(FIELD_WIDTH)
                .state(&clearable)
                .build(registry),
        )
    }

    fn is_focused(&self, field_id: &str) -> bool {
        self.focused
            .as_deref()
            .is_some_and(|id| id.strip_suffix("-input") == Some(field_id))
    }

    fn table_story(
        &mut self,
        table_id: &str,
        registry: &HandlerRegistry,
        configure: impl FnOnce(Table<User>) -> Table<User>,
    ) -> Element {
        let rows = match self.story {
            Story::TableLoading | Story::TableEmpty => Vec::new(),
            _ => self.users.clone(),
        };
        let state = self.table_state(table_id);
        configure(Table::new().id(table_id).rows(&rows).columns(&user_columns()))
            .state(&state)
            .build(registry)
    }
}
