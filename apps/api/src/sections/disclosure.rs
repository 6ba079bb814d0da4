use crate::content::models::DEFAULT_INITIAL_DISPLAY;
use crate::sections::EditContext;

/// How many gallery entries a visitor currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    initial: usize,
    count: usize,
}

impl DisplayWindow {
    pub fn new(initial_display: usize) -> Self {
        let initial = if initial_display == 0 {
            DEFAULT_INITIAL_DISPLAY
        } else {
            initial_display
        };
        Self {
            initial,
            count: initial,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Editors always see every entry.
    pub fn visible_len(&self, total: usize, ctx: EditContext) -> usize {
        if ctx.is_editing() {
            total
        } else {
            self.count.min(total)
        }
    }

    pub fn has_more(&self, total: usize, ctx: EditContext) -> bool {
        !ctx.is_editing() && total > self.count
    }

    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.count)
    }

    pub fn load_more(&mut self, step: usize, total: usize) {
        self.count = self.count.saturating_add(step).min(total);
    }

    pub fn reset(&mut self, initial_display: usize) {
        *self = Self::new(initial_display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_projects_six_then_three() {
        let total = 10;
        let mut window = DisplayWindow::new(6);
        assert_eq!(window.visible_len(total, EditContext::VIEWING), 6);
        assert!(window.has_more(total, EditContext::VIEWING));
        assert_eq!(window.remaining(total), 4);

        window.load_more(3, total);
        assert_eq!(window.visible_len(total, EditContext::VIEWING), 9);
        assert!(window.has_more(total, EditContext::VIEWING));

        window.load_more(3, total);
        assert_eq!(window.visible_len(total, EditContext::VIEWING), 10);
        assert!(!window.has_more(total, EditContext::VIEWING));
        assert_eq!(window.remaining(total), 0);
    }

    #[test]
    fn test_edit_mode_shows_everything_without_load_more() {
        let window = DisplayWindow::new(6);
        assert_eq!(window.visible_len(10, EditContext::EDITING), 10);
        assert!(!window.has_more(10, EditContext::EDITING));
    }

    #[test]
    fn test_zero_initial_display_falls_back() {
        assert_eq!(DisplayWindow::new(0).count(), DEFAULT_INITIAL_DISPLAY);
    }

    #[test]
    fn test_reset_returns_to_initial() {
        let mut window = DisplayWindow::new(2);
        window.load_more(5, 20);
        assert_eq!(window.count(), 7);
        window.reset(4);
        assert_eq!(window.count(), 4);
    }

    #[test]
    fn test_huge_step_clamps_to_total() {
        let mut window = DisplayWindow::new(6);
        window.load_more(usize::MAX, 10);
        assert_eq!(window.count(), 10);
        assert_eq!(window.visible_len(10, EditContext::VIEWING), 10);
        assert!(!window.has_more(10, EditContext::VIEWING));
    }

    #[test]
    fn test_short_list_needs_no_more() {
        let mut window = DisplayWindow::new(6);
        assert_eq!(window.visible_len(3, EditContext::VIEWING), 3);
        assert!(!window.has_more(3, EditContext::VIEWING));
        window.load_more(3, 3);
        assert_eq!(window.visible_len(3, EditContext::VIEWING), 3);
    }
}
