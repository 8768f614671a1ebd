/// Which grid is on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GalleryView {
    #[default]
    Main,
    /// Drill-down into the members of one block
    Block(String),
}

/// Main/block view switch. Exactly one view is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    current: GalleryView,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &GalleryView {
        &self.current
    }

    pub fn active_block(&self) -> Option<&str> {
        match &self.current {
            GalleryView::Block(key) => Some(key.as_str()),
            GalleryView::Main => None,
        }
    }

    pub fn is_main(&self) -> bool {
        self.current == GalleryView::Main
    }

    /// Switch to the drill-down of `key`; returns false when already there
    pub fn enter_block(&mut self, key: &str) -> bool {
        if self.active_block() == Some(key) {
            return false;
        }
        self.current = GalleryView::Block(key.to_string());
        true
    }

    /// Return to the main grid; a second call is a no-op and returns false
    pub fn back(&mut self) -> bool {
        if self.is_main() {
            return false;
        }
        self.current = GalleryView::Main;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_is_idempotent() {
        let mut view = ViewState::new();
        assert!(view.enter_block("B7"));
        assert_eq!(view.active_block(), Some("B7"));

        assert!(view.back());
        assert!(!view.back());
        assert!(view.is_main());
    }

    #[test]
    fn test_switching_blocks() {
        let mut view = ViewState::new();
        view.enter_block("B7");
        assert!(!view.enter_block("B7"));
        assert!(view.enter_block("B9"));
        assert_eq!(view.current(), &GalleryView::Block("B9".to_string()));
    }

    #[test]
    fn test_noop_transitions_report_no_change() {
        let mut view = ViewState::new();
        assert!(!view.back());
        assert!(view.enter_block("B7"));
        assert!(!view.enter_block("B7"));
        assert!(view.back());
        assert!(!view.back());
    }
}
