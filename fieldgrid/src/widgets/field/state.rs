use super::config::InputKind;

/// Local state of a field. The text itself is owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState {
    /// Password characters are obscured while true.
    pub mask_visible: bool,
}

impl Default for FieldState {
    fn default() -> Self {
        Self { mask_visible: true }
    }
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a field of the given kind.
    pub fn for_kind(kind: InputKind) -> Self {
        Self {
            mask_visible: kind.is_password_like(),
        }
    }

    pub fn toggle_mask(&mut self) {
        self.mask_visible = !self.mask_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_fields_start_masked() {
        assert!(FieldState::for_kind(InputKind::Password).mask_visible);
        assert!(!FieldState::for_kind(InputKind::Search).mask_visible);
    }

    #[test]
    fn toggle_flips() {
        let mut state = FieldState::new();
        state.toggle_mask();
        assert!(!state.mask_visible);
        state.toggle_mask();
        assert!(state.mask_visible);
    }
}
