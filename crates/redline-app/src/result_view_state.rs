//! Result view state - scroll position and viewport bounds.
//!
//! Scroll commands come from the handler layer; the content and viewport
//! sizes are filled in by the TUI during render.

#[derive(Debug, Default, Clone)]
pub struct ResultViewState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Total number of lines (set during render)
    pub total_lines: usize,
    /// Visible lines (set during render)
    pub visible_lines: usize,
}

impl ResultViewState {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_down(page);
    }

    /// Update with new content size, clamping the offset if content shrank
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Back to the top for new content
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(total: usize, visible: usize) -> ResultViewState {
        let mut state = ResultViewState::new();
        state.update_content_size(total, visible);
        state
    }

    #[test]
    fn test_scroll_down_clamps() {
        let mut state = sized(30, 10);
        state.scroll_down(50);
        assert_eq!(state.offset, 20);
    }

    #[test]
    fn test_scroll_up_saturates() {
        let mut state = sized(30, 10);
        state.scroll_down(3);
        state.scroll_up(10);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_page_moves_by_viewport() {
        let mut state = sized(100, 12);
        state.page_down();
        assert_eq!(state.offset, 10);
        state.page_up();
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_bottom_and_top() {
        let mut state = sized(40, 15);
        state.scroll_to_bottom();
        assert_eq!(state.offset, 25);
        state.scroll_to_top();
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_content_shrink_clamps_offset() {
        let mut state = sized(100, 10);
        state.scroll_to_bottom();
        state.update_content_size(20, 10);
        assert_eq!(state.offset, 10);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut state = sized(5, 10);
        state.scroll_down(3);
        assert_eq!(state.offset, 0);
    }
}
