use std::ops::Range;

/// Page cursor over the active match set. `page` counts the batches shown so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    pub remaining: usize,
    pub disabled: bool,
}

impl Pagination {
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

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Range of the first batch, rendered right after a reset.
    pub fn first_range(&self, total: usize) -> Range<usize> {
        0..self.page_size.min(total)
    }

    /// Moves to the next page and returns the newly visible range.
    pub fn advance(&mut self, total: usize) -> Range<usize> {
        let start = self.shown().min(total);
        self.page += 1;
        let end = self.shown().min(total);
        start..end
    }

    pub fn visible_count(&self, total: usize) -> usize {
        self.shown().min(total)
    }

    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.shown())
    }

    pub fn show_more(&self, total: usize) -> ShowMore {
        let remaining = self.remaining(total);
        ShowMore {
            remaining,
            disabled: remaining == 0,
        }
    }

    fn shown(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_books_two_per_page() {
        let mut pagination = Pagination::new(2);
        assert_eq!(pagination.first_range(5), 0..2);
        assert_eq!(
            pagination.show_more(5),
            ShowMore {
                remaining: 3,
                disabled: false
            }
        );

        assert_eq!(pagination.advance(5), 2..4);
        assert_eq!(pagination.visible_count(5), 4);
        assert_eq!(pagination.remaining(5), 1);

        assert_eq!(pagination.advance(5), 4..5);
        assert_eq!(pagination.visible_count(5), 5);
        assert!(pagination.show_more(5).disabled);
    }

    #[test]
    fn visible_count_after_k_advances() {
        for total in [0usize, 1, 7, 12, 13] {
            let mut pagination = Pagination::new(3);
            pagination.reset();
            for k in 1..=6 {
                assert_eq!(pagination.visible_count(total), (k * 3).min(total));
                assert_eq!(pagination.show_more(total).disabled, total <= k * 3);
                pagination.advance(total);
            }
        }
    }

    #[test]
    fn remaining_never_negative() {
        let mut pagination = Pagination::new(10);
        pagination.advance(4);
        pagination.advance(4);
        assert_eq!(pagination.remaining(4), 0);
        assert_eq!(pagination.advance(4), 4..4);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut pagination = Pagination::new(2);
        pagination.advance(10);
        pagination.advance(10);
        assert_eq!(pagination.page(), 3);
        pagination.reset();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.visible_count(10), 2);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let pagination = Pagination::new(0);
        assert_eq!(pagination.page_size(), 1);
    }
}
