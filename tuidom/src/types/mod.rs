mod color;
mod edges;
mod enums;
mod style;
mod theme;

pub use color::{Color, ColorOp, Rgb};
pub use edges::Edges;
pub use enums::{Border, Direction, Size, TextAlign, TextStyle};
pub use style::Style;
pub use theme::{ColorContext, DefaultTheme, EmptyTheme, Theme, ThemeMap};
