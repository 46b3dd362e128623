#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// Single-line text field. The value is owned by whoever built the element;
    /// the renderer only draws it.
    TextInput {
        value: String,
        placeholder: Option<String>,
        /// When set, every character of the value is drawn as this glyph.
        mask: Option<char>,
        /// Draws the cursor at the end of the value.
        focused: bool,
    },
}
