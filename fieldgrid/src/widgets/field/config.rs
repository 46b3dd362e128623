use tuidom::Edges;

/// Visual treatment of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Surface background, no border.
    Filled,
    /// Single-line border.
    #[default]
    Outlined,
    /// No background, no border.
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FieldSize {
    /// Padding inside the input box.
    pub fn padding(self) -> Edges {
        match self {
            FieldSize::Small => Edges::horizontal(1),
            FieldSize::Medium => Edges::horizontal(2),
            FieldSize::Large => Edges::symmetric(1, 3),
        }
    }
}

/// What the field holds. Only affects masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Search,
    Number,
}

impl InputKind {
    pub fn is_password_like(self) -> bool {
        matches!(self, InputKind::Password)
    }
}

/// Display configuration of a field, separate from its value and callbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfig {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub error_message: Option<String>,
    pub accessible_label: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub loading: bool,
    pub clearable: bool,
    pub password_toggle: bool,
    pub variant: Variant,
    pub size: FieldSize,
    pub kind: InputKind,
}

impl FieldConfig {
    /// Text for the line below the box: the error message when invalid,
    /// otherwise the helper text.
    pub fn helper_line(&self) -> Option<&str> {
        match (&self.error_message, &self.helper_text) {
            (Some(error), _) if self.invalid => Some(error.as_str()),
            (_, Some(helper)) => Some(helper.as_str()),
            _ => None,
        }
    }

    /// True when the helper line is showing an error.
    pub fn shows_error(&self) -> bool {
        self.invalid && self.error_message.is_some()
    }

    /// Neither disabled nor loading.
    pub fn interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    pub fn clear_visible(&self, value: &str) -> bool {
        self.clearable && !value.is_empty() && self.interactive()
    }

    pub fn toggle_visible(&self) -> bool {
        self.password_toggle && self.kind.is_password_like()
    }

    pub fn accessible_label(&self) -> Option<&str> {
        self.accessible_label.as_deref().or(self.label.as_deref())
    }
}
