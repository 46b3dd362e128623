//! Table widget: sortable columns and optional multi-row selection.
//!
//! The table reads rows from the caller and never mutates them. Sorting
//! produces a derived index order; selection changes are reported through
//! `on_row_select` with the selected rows materialized in view order.
//!
//! Selection is keyed by position in the sorted view unless a row key is
//! configured with [`Table::row_key`]. With position keys, resorting while
//! rows are selected changes which records appear selected. Row keys follow
//! the record across resorts and filtering.

mod column;
mod state;

use std::sync::Arc;

pub use column::{validate_columns, Accessor, CellValue, Column, ColumnWidth};
pub use state::{
    selected_rows, selection_key, sorted_indices, SelectionKey, SortDirection, SortState,
    TableState,
};

use tuidom::{Border, Color, Edges, Element, Size, Style, TextAlign};

use crate::error::ColumnError;
use crate::state::State;
use crate::widgets::NeedsState;
use crate::HandlerRegistry;

/// Number of placeholder rows shown while loading.
pub const LOADING_ROWS: usize = 3;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Width of the leading checkbox column.
const CHECKBOX_WIDTH: u16 = 4;

pub type RowKeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
pub type RowSelectFn<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Typestate marker: table has a state reference.
pub struct HasState<'a>(&'a State<TableState>);

/// A table widget builder.
///
/// Uses typestate pattern to enforce `state()` is called before `build()`.
///
/// # Example
///
/// ```ignore
/// let element = Table::new()
///     .id("users")
///     .rows(&users)
///     .columns(&columns)
///     .selectable(true)
///     .row_key(|u: &User| u.id.to_string())
///     .on_row_select(|rows: &[User]| log::info!("{} selected", rows.len()))
///     .state(&self.table)
///     .build(&registry);
/// ```
pub struct Table<T, S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    rows: Arc<Vec<T>>,
    columns: Arc<Vec<Column<T>>>,
    loading: bool,
    selectable: bool,
    empty_message: String,
    row_key: Option<RowKeyFn<T>>,
    on_row_select: Option<RowSelectFn<T>>,
    style: Option<Style>,
    header_style: Option<Style>,
    row_style_selected: Option<Style>,
}

impl<T> Default for Table<T, NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T, NeedsState> {
    /// Create a new table builder.
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            rows: Arc::new(Vec::new()),
            columns: Arc::new(Vec::new()),
            loading: false,
            selectable: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            row_key: None,
            on_row_select: None,
            style: None,
            header_style: None,
            row_style_selected: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, s: &State<TableState>) -> Table<T, HasState<'_>> {
        Table {
            state_marker: HasState(s),
            id: self.id,
            rows: self.rows,
            columns: self.columns,
            loading: self.loading,
            selectable: self.selectable,
            empty_message: self.empty_message,
            row_key: self.row_key,
            on_row_select: self.on_row_select,
            style: self.style,
            header_style: self.header_style,
            row_style_selected: self.row_style_selected,
        }
    }
}

impl<T, S> Table<T, S> {
    /// Set the table id. Child ids are derived from it.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn rows(mut self, rows: &[T]) -> Self
    where
        T: Clone,
    {
        self.rows = Arc::new(rows.to_vec());
        self
    }

    pub fn columns(mut self, columns: &[Column<T>]) -> Self {
        self.columns = Arc::new(columns.to_vec());
        self
    }

    /// Show placeholder rows instead of data.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Add a checkbox column and allow toggling rows.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Key selection by row identity instead of view position.
    pub fn row_key(mut self, key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.row_key = Some(Arc::new(key_of));
        self
    }

    /// Called with every selected row (in view order) after each toggle.
    pub fn on_row_select(mut self, callback: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Arc::new(callback));
        self
    }

    /// Set the table container style.
    pub fn style(mut self, s: Style) -> Self {
        self.style = Some(s);
        self
    }

    /// Set the header row style.
    pub fn header_style(mut self, s: Style) -> Self {
        self.header_style = Some(s);
        self
    }

    /// Set the style for selected rows.
    pub fn row_style_selected(mut self, s: Style) -> Self {
        self.row_style_selected = Some(s);
        self
    }
}

impl<'a, T: Clone + Send + Sync + 'static> Table<T, HasState<'a>> {
    /// Build the table element and register its handlers.
    pub fn build(self, registry: &HandlerRegistry) -> Element {
        let state = self.state_marker.0;
        let table_id = self.id.clone().unwrap_or_else(|| "table".into());

        if let Err(ColumnError::DuplicateKey(key)) = validate_columns(&self.columns) {
            log::warn!(
                "table '{}' has duplicate column key '{}', sorting uses the first",
                table_id,
                key
            );
        }

        let current = state.get();
        let header = self.build_header(&table_id, &current.sort, registry, state);

        let body_id = format!("{}-body", table_id);
        let body = if self.loading {
            self.build_placeholders(&table_id)
        } else if self.rows.is_empty() {
            vec![self.build_empty_row(&table_id)]
        } else {
            self.build_rows(&table_id, &current, registry, state)
        };

        let container_style = self.style.clone().unwrap_or_else(|| {
            Style::new()
                .border(Border::Rounded)
                .border_color(Color::var("table.border"))
        });

        let mut table = Element::col()
            .id(&table_id)
            .width(Size::Fill)
            .height(Size::Auto)
            .style(container_style)
            .data("role", "table")
            .child(header)
            .child(
                Element::col()
                    .id(&body_id)
                    .width(Size::Fill)
                    .height(Size::Auto)
                    .children(body),
            );
        if self.loading {
            table = table.data("busy", "true");
        }
        table
    }

    /// Columns a full-width row spans, counting the checkbox column.
    fn span(&self) -> usize {
        self.columns.len() + usize::from(self.selectable)
    }

    fn build_header(
        &self,
        table_id: &str,
        sort: &SortState,
        registry: &HandlerRegistry,
        state: &State<TableState>,
    ) -> Element {
        let header_style = self
            .header_style
            .clone()
            .unwrap_or_else(|| Style::new().background(Color::var("table.header_bg")).bold());

        let mut row = Element::row()
            .id(format!("{}-header", table_id))
            .width(Size::Fill)
            .height(Size::Fixed(1))
            .style(header_style);

        if self.selectable {
            row = row.child(Element::text("").width(Size::Fixed(CHECKBOX_WIDTH)));
        }

        for col in self.columns.iter() {
            let cell_id = format!("{}-header-{}", table_id, col.key);
            let title = match col.sortable.then(|| sort.direction_for(&col.key)).flatten() {
                Some(direction) => format!("{} {}", col.title, direction.indicator()),
                None => col.title.clone(),
            };

            let mut cell = Element::text(title)
                .id(&cell_id)
                .width(col.width.size())
                .padding(Edges::new(0, 1, 0, 0));

            if col.sortable {
                cell = cell
                    .clickable(true)
                    .focusable(true)
                    .data("label", format!("Sort by {}", col.title))
                    .style_focused(
                        Style::new()
                            .background(Color::var("table.header_focused"))
                            .underline(),
                    );

                let state_clone = state.clone();
                let key = col.key.clone();
                registry.register_activation(
                    &cell_id,
                    Arc::new(move |_hx| {
                        state_clone.update(|s| s.toggle_sort(&key));
                        let sort = state_clone.with(|s| s.sort.clone());
                        log::debug!("[table] sort by {:?} {:?}", sort.active, sort.direction);
                    }),
                );
            }

            row = row.child(cell);
        }

        row
    }

    fn build_placeholders(&self, table_id: &str) -> Vec<Element> {
        (0..LOADING_ROWS)
            .map(|i| {
                Element::row()
                    .id(format!("{}-loading-{}", table_id, i))
                    .width(Size::Fill)
                    .height(Size::Fixed(1))
                    .data("colspan", self.span().to_string())
                    .data("placeholder", "true")
                    .child(
                        Element::box_()
                            .width(Size::Fill)
                            .height(Size::Fixed(1))
                            .style(Style::new().background(Color::var("table.placeholder"))),
                    )
            })
            .collect()
    }

    fn build_empty_row(&self, table_id: &str) -> Element {
        Element::text(&self.empty_message)
            .id(format!("{}-empty", table_id))
            .width(Size::Fill)
            .height(Size::Fixed(1))
            .text_align(TextAlign::Center)
            .data("colspan", self.span().to_string())
            .style(Style::new().foreground(Color::var("table.empty")).italic())
    }

    fn build_rows(
        &self,
        table_id: &str,
        current: &TableState,
        registry: &HandlerRegistry,
        state: &State<TableState>,
    ) -> Vec<Element> {
        let order = sorted_indices(&self.rows, &self.columns, &current.sort);

        order
            .iter()
            .enumerate()
            .map(|(position, &idx)| {
                let row_data = &self.rows[idx];
                let key = selection_key(row_data, position, self.row_key.as_deref());
                let is_selected = current.selection.is_selected(&key);
                let row_id = format!("{}-row-{}", table_id, position);

                let mut row = Element::row()
                    .id(&row_id)
                    .width(Size::Fill)
                    .height(Size::Fixed(1))
                    .data("position", position.to_string())
                    .style_focused(Style::new().background(Color::var("table.row_focused")));

                if self.selectable {
                    let select_id = format!("{}-select-{}", table_id, position);
                    let mark = if is_selected { "[x]" } else { "[ ]" };
                    row = row.focusable(true).clickable(true).child(
                        Element::text(mark)
                            .id(&select_id)
                            .width(Size::Fixed(CHECKBOX_WIDTH))
                            .clickable(true)
                            .data("label", format!("Select row {}", position + 1))
                            .data("checked", is_selected.to_string()),
                    );

                    let handler = self.toggle_handler(key, state);
                    registry.register_activation(&select_id, handler.clone());
                    registry.register_activation(&row_id, handler);
                }

                for col in self.columns.iter() {
                    row = row.child(
                        Element::text(col.value(row_data).to_string())
                            .width(col.width.size())
                            .padding(Edges::new(0, 1, 0, 0)),
                    );
                }

                let style = if is_selected {
                    self.row_style_selected.clone().unwrap_or_else(|| {
                        Style::new()
                            .background(Color::var("table.row_selected"))
                            .foreground(Color::var("text.inverted"))
                    })
                } else if position % 2 == 1 {
                    Style::new().background(Color::var("table.row_alt"))
                } else {
                    Style::new()
                };
                if is_selected {
                    row = row.data("selected", "true");
                }

                row.style(style)
            })
            .collect()
    }

    /// Handler that flips one row and reports the new selection.
    fn toggle_handler(&self, key: SelectionKey, state: &State<TableState>) -> crate::Handler {
        let state = state.clone();
        let rows = Arc::clone(&self.rows);
        let columns = Arc::clone(&self.columns);
        let row_key = self.row_key.clone();
        let on_row_select = self.on_row_select.clone();

        Arc::new(move |_hx| {
            state.update(|s| {
                s.toggle_selection(key.clone());
            });

            let current = state.get();
            let order = sorted_indices(&rows, &columns, &current.sort);
            let selected = selected_rows(&rows, &order, &current.selection, row_key.as_deref());
            log::debug!(
                "[table] toggled {:?}, {} row(s) selected",
                key,
                selected.len()
            );

            if let Some(callback) = &on_row_select {
                callback(&selected);
            }
        })
    }
}
