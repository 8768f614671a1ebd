/// Scroll position of the result container, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn near_end(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold
    }

    /// False while the content fits without a scrollbar; no scroll event can fire then
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }
}

/// Infinite scroll over an eagerly fetched result: only the first `page * page_size` items
/// are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_len(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_len(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_len(total) < total
    }

    /// Append one page when more items remain
    pub fn next_page(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Scroll handler: loads the next page when the container nears its end
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, threshold: f64, total: usize) -> bool {
        if !metrics.near_end(threshold) {
            return false;
        }
        self.next_page(total)
    }

    /// Keeps appending pages, one per call, until the container gets a scrollbar
    pub fn fill_viewport(&mut self, metrics: ScrollMetrics, total: usize) -> bool {
        if metrics.overflows() {
            return false;
        }
        self.next_page(total)
    }

    /// Back to the first page, called on every filter change
    pub fn reset(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTTOM: ScrollMetrics = ScrollMetrics {
        scroll_top: 900.0,
        client_height: 600.0,
        scroll_height: 1600.0,
    };

    #[test]
    fn test_visible_len_is_bounded_and_monotonic() {
        let total = 50;
        let mut paginator = Paginator::new(24);
        let mut previous = 0;
        for page in 1..=5 {
            let len = paginator.visible_len(total);
            assert_eq!(len, (page * 24).min(total));
            assert!(len >= previous);
            assert!(len <= total);
            previous = len;
            paginator.next_page(total);
        }
        assert_eq!(paginator.page(), 3);
    }

    #[test]
    fn test_scroll_near_bottom_appends_page() {
        let mut paginator = Paginator::new(10);
        assert!(paginator.on_scroll(BOTTOM, 200.0, 25));
        assert_eq!(paginator.visible_len(25), 20);

        let top = ScrollMetrics {
            scroll_top: 0.0,
            ..BOTTOM
        };
        assert!(!paginator.on_scroll(top, 200.0, 25));
        assert_eq!(paginator.page(), 2);
    }

    #[test]
    fn test_scroll_is_noop_when_everything_shown() {
        let mut paginator = Paginator::new(10);
        assert!(!paginator.on_scroll(BOTTOM, 200.0, 8));
        assert_eq!(paginator.page(), 1);
    }

    #[test]
    fn test_reset_and_slice() {
        let items: Vec<u32> = (0..30).collect();
        let mut paginator = Paginator::new(12);
        paginator.next_page(items.len());
        assert_eq!(paginator.visible(&items).len(), 24);
        paginator.reset();
        assert_eq!(paginator.visible(&items), &items[..12]);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }

    #[test]
    fn test_short_first_page_fills_viewport() {
        let short = ScrollMetrics {
            scroll_top: 0.0,
            client_height: 800.0,
            scroll_height: 800.0,
        };
        let mut paginator = Paginator::new(4);
        assert!(paginator.fill_viewport(short, 10));
        assert!(paginator.fill_viewport(short, 10));
        assert_eq!(paginator.visible_len(10), 10);
        assert!(!paginator.fill_viewport(short, 10));

        let mut paginator = Paginator::new(4);
        assert!(!paginator.fill_viewport(BOTTOM, 10));
        assert_eq!(paginator.page(), 1);
    }
}
