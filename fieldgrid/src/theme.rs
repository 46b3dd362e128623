//! Color variables the widgets draw with.
//!
//! Widgets only reference `Color::var(..)` names; [`install`] maps those names
//! onto the base palette so any `ThemeMap` can be extended with them.

use tuidom::{Color, ThemeMap};

/// Add the widget variables to `theme`. Existing entries are overwritten.
pub fn install(theme: &mut ThemeMap) {
    let vars = [
        // Field
        ("field.bg", Color::var("surface")),
        ("field.border", Color::var("border")),
        ("field.border_focused", Color::var("primary")),
        ("field.label", Color::var("muted")),
        ("field.label_active", Color::var("primary")),
        ("field.helper", Color::var("muted")),
        ("field.error", Color::var("error")),
        ("field.disabled", Color::var("muted").darken(0.2)),
        ("field.action", Color::var("muted")),
        ("field.action_focused", Color::var("primary")),
        // Table
        ("table.border", Color::var("border")),
        ("table.header_bg", Color::var("surface")),
        ("table.header_focused", Color::var("primary").darken(0.25)),
        ("table.row_alt", Color::var("background").lighten(0.04)),
        ("table.row_selected", Color::var("primary").darken(0.2)),
        ("table.row_focused", Color::var("surface").lighten(0.08)),
        ("table.placeholder", Color::var("surface").lighten(0.05)),
        ("table.empty", Color::var("muted")),
        // Shared
        ("text.inverted", Color::var("background")),
        ("spinner", Color::var("primary")),
    ];
    for (name, color) in vars {
        theme.insert(name, color);
    }
}

/// Base palette plus the widget variables.
pub fn widget_theme() -> ThemeMap {
    let mut theme = ThemeMap::new();
    install(&mut theme);
    theme
}

#[cfg(test)]
mod tests {
    use tuidom::{ColorContext, Theme};

    use super::*;

    #[test]
    fn widget_vars_resolve_through_base_palette() {
        let theme = widget_theme();
        let ctx = ColorContext::new(&theme);

        let error = ctx.resolve(&Color::var("field.error"));
        let base = ctx.resolve(&Color::var("error"));
        assert_eq!(error, base);
        assert!(theme.resolve("table.row_selected").is_some());
    }
}
