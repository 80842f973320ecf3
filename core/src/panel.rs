//! Collapsible panel state

/// Expand/collapse state of a section panel. Panels start collapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
    collapsed: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self { collapsed: true }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded() -> Self {
        Self { collapsed: false }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_starts_collapsed_and_toggles() {
        let mut panel = PanelState::new();
        assert!(panel.is_collapsed());
        panel.toggle();
        assert_eq!(panel, PanelState::expanded());
        panel.toggle();
        assert!(panel.is_collapsed());
    }
}
