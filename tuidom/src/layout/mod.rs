mod flex;
mod rect;

pub(crate) use flex::content_rect;
pub use flex::{layout, LayoutResult};
pub use rect::Rect;
