/// Checkbox and enablement state baked into the menu on every rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub codemap_visible: bool,
    pub save_enabled: bool,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            codemap_visible: true,
            save_enabled: true,
        }
    }
}

impl MenuState {
    pub fn new(codemap_visible: bool) -> Self {
        Self {
            codemap_visible,
            ..Self::default()
        }
    }

    /// Flip the codemap checkbox and return the new value.
    pub fn toggle_codemap(&mut self) -> bool {
        self.codemap_visible = !self.codemap_visible;
        self.codemap_visible
    }

    pub fn set_save_enabled(&mut self, enabled: bool) {
        self.save_enabled = enabled;
    }
}
