use std::collections::HashMap;

use crate::types::{Color, ColorOp};

/// A theme provides named color variables.
pub trait Theme: Send + Sync {
    /// Resolve a color variable name to a concrete color.
    /// Returns None if the variable is not defined.
    fn resolve(&self, name: &str) -> Option<&Color>;
}

/// Default empty theme that resolves nothing.
pub struct EmptyTheme;

impl Theme for EmptyTheme {
    fn resolve(&self, _name: &str) -> Option<&Color> {
        None
    }
}

/// Minimal default theme providing basic readable colors.
pub struct DefaultTheme {
    pub background: Color,
    pub foreground: Color,
    pub surface: Color,
    pub border: Color,
    pub primary: Color,
    pub muted: Color,
    pub error: Color,
}

impl DefaultTheme {
    pub const fn new() -> Self {
        Self {
            background: Color::Oklch { l: 0.16, c: 0.01, h: 250.0 },
            foreground: Color::Oklch { l: 0.95, c: 0.0, h: 0.0 },
            surface: Color::Oklch { l: 0.24, c: 0.01, h: 250.0 },
            border: Color::Oklch { l: 0.45, c: 0.0, h: 0.0 },
            primary: Color::Oklch { l: 0.65, c: 0.2, h: 310.0 },
            muted: Color::Oklch { l: 0.62, c: 0.0, h: 0.0 },
            error: Color::Oklch { l: 0.63, c: 0.21, h: 25.0 },
        }
    }
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DefaultTheme {
    fn resolve(&self, name: &str) -> Option<&Color> {
        match name {
            "background" => Some(&self.background),
            "foreground" => Some(&self.foreground),
            "surface" => Some(&self.surface),
            "border" => Some(&self.border),
            "primary" => Some(&self.primary),
            "muted" => Some(&self.muted),
            "error" => Some(&self.error),
            _ => None,
        }
    }
}

/// Theme backed by a map of variables, falling back to [`DefaultTheme`].
///
/// Variables may reference other variables (`Color::var("primary")`); they
/// are resolved recursively by [`ColorContext`].
#[derive(Default)]
pub struct ThemeMap {
    vars: HashMap<String, Color>,
    base: DefaultTheme,
}

impl ThemeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, color: Color) -> Self {
        self.vars.insert(name.into(), color);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.vars.insert(name.into(), color);
    }
}

impl Theme for ThemeMap {
    fn resolve(&self, name: &str) -> Option<&Color> {
        self.vars.get(name).or_else(|| self.base.resolve(name))
    }
}

/// Maximum variable indirection before giving up (guards against cycles).
const MAX_VAR_DEPTH: usize = 16;

/// Context for resolving color variables and derived colors.
pub struct ColorContext<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ColorContext<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    /// Resolve a color to a concrete Color (no Var or Derived variants).
    pub fn resolve(&self, color: &Color) -> Color {
        self.resolve_depth(color, 0)
    }

    fn resolve_depth(&self, color: &Color, depth: usize) -> Color {
        if depth > MAX_VAR_DEPTH {
            log::warn!("color variable chain too deep: {:?}", color);
            return Color::BLACK;
        }
        match color {
            Color::Var(name) => match self.theme.resolve(name) {
                Some(resolved) => self.resolve_depth(resolved, depth + 1),
                None => {
                    log::trace!("unresolved color variable '{}'", name);
                    Color::BLACK
                }
            },
            Color::Derived { base, ops } => {
                let (mut l, mut c, mut h) = self.resolve_depth(base, depth + 1).to_lch();
                for op in ops {
                    match op {
                        ColorOp::Lighten(amount) => l = (l + amount).clamp(0.0, 1.0),
                        ColorOp::Darken(amount) => l = (l - amount).clamp(0.0, 1.0),
                        ColorOp::Mix(other, amount) => {
                            let (ol, oc, oh) = self.resolve_depth(other, depth + 1).to_lch();
                            l = l * (1.0 - amount) + ol * amount;
                            c = c * (1.0 - amount) + oc * amount;
                            // Interpolate hue along the shorter arc
                            let mut diff = oh - h;
                            if diff > 180.0 {
                                diff -= 360.0;
                            } else if diff < -180.0 {
                                diff += 360.0;
                            }
                            h = (h + diff * amount).rem_euclid(360.0);
                        }
                    }
                }
                Color::Oklch { l, c, h }
            }
            Color::Oklch { .. } | Color::Rgb { .. } => color.clone(),
        }
    }
}
