//! Built-in widgets.
//!
//! Each widget is a builder that produces a tuidom Element. Interactive
//! widgets take a `State<_>` handle via `state()` before `build()` can be
//! called, and register their handlers in the `HandlerRegistry` passed to
//! `build()`.

pub mod field;
pub mod selection;
pub mod spinner;
pub mod table;

pub use field::Field;
pub use selection::Selection;
pub use spinner::Spinner;
pub use table::Table;

/// Typestate marker: the builder still needs a state reference.
pub struct NeedsState;
