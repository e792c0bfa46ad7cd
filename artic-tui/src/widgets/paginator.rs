//! Paginator: page links, rows-per-page and the "first–last of total" report.

use artic_lib::model::PageWindow;
use crossterm::style::Color;

use crate::render::{Buffer, Style};

/// Number of page links shown around the current page.
pub const PAGE_LINK_SIZE: usize = 5;

/// What the paginator shows for one window and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    window: PageWindow,
    total: u64,
}

impl Paginator {
    pub fn new(window: PageWindow, total: u64) -> Self {
        Self { window, total }
    }

    pub fn page_count(&self) -> usize {
        self.window.page_count(self.total)
    }

    pub fn has_prev(&self) -> bool {
        self.window.index() > 0
    }

    pub fn has_next(&self) -> bool {
        self.window.index() + 1 < self.page_count()
    }

    /// Index of the last page, if there is any page at all.
    pub fn last_index(&self) -> Option<usize> {
        self.page_count().checked_sub(1)
    }

    /// Zero-based indexes of the page links, centered on the current page.
    pub fn page_links(&self) -> std::ops::Range<usize> {
        let count = self.page_count();
        let visible = PAGE_LINK_SIZE.min(count);
        let start = self
            .window
            .index()
            .saturating_sub(PAGE_LINK_SIZE / 2)
            .min(count - visible);
        start..start + visible
    }

    /// `first–last of total` in one-based row numbers; `0 of 0` when empty.
    pub fn report(&self) -> String {
        if self.total == 0 {
            return "0 of 0".to_string();
        }
        let first = self.window.first() as u64 + 1;
        let last = (self.window.first() as u64 + self.window.size() as u64).min(self.total);
        if first > self.total {
            return format!("– of {}", self.total);
        }
        format!("{}–{} of {}", first, last, self.total)
    }

    /// Draws the paginator on row `y`, centered in `width` columns.
    pub fn render(&self, buf: &mut Buffer, y: u16, width: u16) {
        let enabled = Style::new();
        let disabled = Style::new().dim();
        let current = Style::new().fg(Color::Black).bg(Color::Cyan).bold();

        let mut parts: Vec<(String, Style)> = Vec::new();
        let prev = if self.has_prev() { enabled } else { disabled };
        let next = if self.has_next() { enabled } else { disabled };
        parts.push(("«".into(), prev));
        parts.push(("‹".into(), prev));
        for index in self.page_links() {
            let style = if index == self.window.index() { current } else { enabled };
            parts.push((format!(" {} ", index + 1), style));
        }
        parts.push(("›".into(), next));
        parts.push(("»".into(), next));
        parts.push((format!("{} / page", self.window.size()), enabled));
        parts.push((self.report(), Style::new().dim()));

        let total_width: usize = parts
            .iter()
            .map(|(text, _)| crate::render::display_width(text))
            .sum::<usize>()
            + parts.len().saturating_sub(1);
        let mut x = (width as usize).saturating_sub(total_width) as u16 / 2;

        for (text, style) in parts {
            x += buf.put_str(x, y, &text, width.saturating_sub(x), style);
            x += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(index: usize, size: usize, total: u64) -> Paginator {
        Paginator::new(PageWindow::new(index, size).unwrap(), total)
    }

    #[test]
    fn test_report() {
        assert_eq!(paginator(0, 10, 0).report(), "0 of 0");
        assert_eq!(paginator(0, 10, 25).report(), "1–10 of 25");
        assert_eq!(paginator(2, 10, 25).report(), "21–25 of 25");
    }

    #[test]
    fn test_navigation_bounds() {
        let first = paginator(0, 10, 25);
        assert!(!first.has_prev());
        assert!(first.has_next());
        assert_eq!(first.last_index(), Some(2));

        let last = paginator(2, 10, 25);
        assert!(last.has_prev());
        assert!(!last.has_next());

        let empty = paginator(0, 10, 0);
        assert!(!empty.has_prev());
        assert!(!empty.has_next());
        assert_eq!(empty.last_index(), None);
        assert!(empty.page_links().is_empty());
    }

    #[test]
    fn test_page_links_follow_current_page() {
        assert_eq!(paginator(0, 10, 1000).page_links(), 0..5);
        assert_eq!(paginator(10, 10, 1000).page_links(), 8..13);
        assert_eq!(paginator(99, 10, 1000).page_links(), 95..100);
        assert_eq!(paginator(1, 10, 25).page_links(), 0..3);
    }

    #[test]
    fn test_render_empty() {
        let mut buf = Buffer::new(60, 1);
        paginator(0, 10, 0).render(&mut buf, 0, 60);
        let row = buf.row_text(0);
        assert!(row.contains("0 of 0"), "{row:?}");
        assert!(row.contains("10 / page"));
    }
}
