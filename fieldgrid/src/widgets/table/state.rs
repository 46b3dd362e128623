//! Table widget state: sort order and selection.

use crate::widgets::selection::Selection;

use super::column::Column;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header glyph for the active column.
    pub fn indicator(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}

/// The active sort column (if any) and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub active: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header activation: a new column becomes active ascending, the active
    /// column flips direction. There is no unsorted third state.
    pub fn toggle(&mut self, key: &str) {
        if self.active.as_deref() == Some(key) {
            self.direction = self.direction.flip();
        } else {
            self.active = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction if `key` is the active column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.active.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// How a selected row is remembered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionKey {
    /// Index in the sorted view. Resorting changes which record it points at.
    Position(usize),
    /// Caller-supplied row identity; follows the record across resorts.
    Row(String),
}

/// Interaction state of one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort: SortState,
    pub selection: Selection<SelectionKey>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            selection: Selection::new(),
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    /// Flip one row's selection. Returns true if the row is selected afterwards.
    pub fn toggle_selection(&mut self, key: SelectionKey) -> bool {
        self.selection.toggle(key)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

/// Row indices in display order for the current sort.
///
/// The sort is stable, so rows with equal values keep their input order in
/// both directions. A sort key that matches no column leaves input order.
/// When several columns share a key, the first one decides.
pub fn sorted_indices<T>(rows: &[T], columns: &[Column<T>], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let Some(key) = sort.active.as_deref() else {
        return order;
    };
    let Some(column) = columns.iter().find(|c| c.key == key) else {
        log::trace!("sort key '{}' matches no column", key);
        return order;
    };

    let values: Vec<_> = rows.iter().map(|row| column.value(row)).collect();
    order.sort_by(|&a, &b| {
        let ord = values[a].cmp(&values[b]);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}

/// The key a row is selected under at view position `position`.
pub fn selection_key<T>(
    row: &T,
    position: usize,
    row_key: Option<&(dyn Fn(&T) -> String + Send + Sync)>,
) -> SelectionKey {
    match row_key {
        Some(key_of) => SelectionKey::Row(key_of(row)),
        None => SelectionKey::Position(position),
    }
}

/// Selected rows in view order. Keys that match no row in `order` are
/// skipped (they stay in the selection).
pub fn selected_rows<T: Clone>(
    rows: &[T],
    order: &[usize],
    selection: &Selection<SelectionKey>,
    row_key: Option<&(dyn Fn(&T) -> String + Send + Sync)>,
) -> Vec<T> {
    order
        .iter()
        .enumerate()
        .filter(|&(position, &idx)| selection.is_selected(&selection_key(&rows[idx], position, row_key)))
        .map(|(_, &idx)| rows[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: &'static str,
        group: i64,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "a", group: 2 },
            Item { id: "b", group: 1 },
            Item { id: "c", group: 2 },
            Item { id: "d", group: 1 },
        ]
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "Id", |i: &Item| i.id).sortable(),
            Column::new("group", "Group", |i: &Item| i.group).sortable(),
        ]
    }

    fn ids(rows: &[Item], order: &[usize]) -> Vec<&'static str> {
        order.iter().map(|&i| rows[i].id).collect()
    }

    #[test]
    fn toggle_cycles_between_two_directions() {
        let mut sort = SortState::default();
        sort.toggle("group");
        assert_eq!(sort.direction_for("group"), Some(SortDirection::Ascending));
        sort.toggle("group");
        assert_eq!(sort.direction_for("group"), Some(SortDirection::Descending));
        sort.toggle("group");
        assert_eq!(sort.direction_for("group"), Some(SortDirection::Ascending));

        sort.toggle("id");
        assert_eq!(sort.direction_for("id"), Some(SortDirection::Ascending));
        assert_eq!(sort.direction_for("group"), None);
    }

    #[test]
    fn stable_in_both_directions() {
        let rows = items();
        let mut sort = SortState::default();

        sort.toggle("group");
        assert_eq!(ids(&rows, &sorted_indices(&rows, &columns(), &sort)), ["b", "d", "a", "c"]);

        sort.toggle("group");
        assert_eq!(ids(&rows, &sorted_indices(&rows, &columns(), &sort)), ["a", "c", "b", "d"]);
    }

    #[test]
    fn unknown_key_keeps_input_order() {
        let rows = items();
        let sort = SortState {
            active: Some("missing".into()),
            direction: SortDirection::Descending,
        };
        assert_eq!(sorted_indices(&rows, &columns(), &sort), vec![0, 1, 2, 3]);
    }

    #[test]
    fn duplicate_key_sorts_by_first_column() {
        let rows = items();
        let cols = vec![
            Column::new("k", "Group", |i: &Item| i.group),
            Column::new("k", "Id", |i: &Item| i.id),
        ];
        let mut sort = SortState::default();
        sort.toggle("k");
        assert_eq!(ids(&rows, &sorted_indices(&rows, &cols, &sort)), ["b", "d", "a", "c"]);
    }

    #[test]
    fn position_keys_follow_view_order() {
        let rows = items();
        let mut state = TableState::new();
        state.toggle_selection(SelectionKey::Position(2));
        state.toggle_selection(SelectionKey::Position(0));

        let order = sorted_indices(&rows, &columns(), &state.sort);
        let selected = selected_rows(&rows, &order, &state.selection, None);
        assert_eq!(selected.iter().map(|i| i.id).collect::<Vec<_>>(), ["a", "c"]);

        // Same positions after a resort point at different records
        state.toggle_sort("group");
        let order = sorted_indices(&rows, &columns(), &state.sort);
        let selected = selected_rows(&rows, &order, &state.selection, None);
        assert_eq!(selected.iter().map(|i| i.id).collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn row_keys_follow_identity_and_survive_missing_rows() {
        let rows = items();
        let key_of = |i: &Item| i.id.to_string();
        let mut state = TableState::new();
        state.toggle_selection(SelectionKey::Row("c".into()));
        state.toggle_selection(SelectionKey::Row("zz".into()));

        state.toggle_sort("group");
        let order = sorted_indices(&rows, &columns(), &state.sort);
        let selected = selected_rows(&rows, &order, &state.selection, Some(&key_of));

        assert_eq!(selected, vec![Item { id: "c", group: 2 }]);
        assert_eq!(state.selection.len(), 2);
    }

    #[test]
    fn default_state_toggles_rows_in_and_out() {
        let mut state = TableState::default();
        assert!(state.toggle_selection(SelectionKey::Position(1)));
        assert!(state.toggle_selection(SelectionKey::Position(3)));
        assert!(!state.toggle_selection(SelectionKey::Position(1)));

        assert!(state.selection.is_selected(&SelectionKey::Position(3)));
        assert_eq!(state.selection.len(), 1);

        state.clear_selection();
        assert!(state.selection.is_empty());
    }
}
