//! Field and Table widgets rendered through tuidom.
//!
//! Widgets are builders that produce a [`tuidom::Element`] and register their
//! event handlers in a [`HandlerRegistry`]. The host owns the widget state
//! (`State<FieldState>`, `State<TableState>`), rebuilds the tree after every
//! event and routes terminal events back through a [`Dispatcher`].

pub mod dispatch;
pub mod error;
pub mod handler_context;
pub mod state;
pub mod theme;
pub mod widgets;

pub use dispatch::Dispatcher;
pub use error::ColumnError;
pub use handler_context::{EventData, Handler, HandlerContext, HandlerRegistry};
pub use state::State;

pub mod prelude {
    pub use crate::dispatch::Dispatcher;
    pub use crate::error::ColumnError;
    pub use crate::handler_context::{EventData, Handler, HandlerContext, HandlerRegistry};
    pub use crate::state::State;
    pub use crate::widgets::field::{Field, FieldSize, FieldState, InputKind, Variant};
    pub use crate::widgets::spinner::Spinner;
    pub use crate::widgets::table::{
        CellValue, Column, SelectionKey, SortDirection, SortState, Table, TableState,
        validate_columns,
    };
}
