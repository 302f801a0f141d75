use super::types::Cursor;

/// Page sizes offered by the transactions table
pub const PAGE_SIZES: [u32; 3] = [25, 50, 100];

/// Server-side pagination for the transactions table.
///
/// The indexer's cursors double as absolute positions counting down from the
/// newest transaction, so page `n` is requested at
/// `total_count - (n - 1) * per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePager {
    per_page: u32,
    page: u32,
}

impl TablePager {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            page: 1,
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Current page, 1-based
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self, total_count: u64) -> u32 {
        let per_page = u64::from(self.per_page);
        let pages = total_count.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Cursor for `page` at `per_page` rows per page
    pub fn offset_cursor(total_count: u64, page: u32, per_page: u32) -> Cursor {
        let skipped = u64::from(page.saturating_sub(1)) * u64::from(per_page);
        Cursor::from_offset(total_count.saturating_sub(skipped))
    }

    /// Jump to `page`. Returns the cursor and row count to fetch, or `None`
    /// when the page is out of range.
    pub fn go_to(&mut self, page: u32, total_count: u64) -> Option<(Cursor, u32)> {
        if page == 0 || page > self.page_count(total_count) {
            return None;
        }
        self.page = page;
        Some((
            Self::offset_cursor(total_count, page, self.per_page),
            self.per_page,
        ))
    }

    pub fn next_page(&mut self, total_count: u64) -> Option<(Cursor, u32)> {
        self.go_to(self.page + 1, total_count)
    }

    pub fn prev_page(&mut self, total_count: u64) -> Option<(Cursor, u32)> {
        self.go_to(self.page.saturating_sub(1), total_count)
    }

    /// Switch to `new_per_page` rows per page.
    ///
    /// The position is recomputed from the total count using the page size
    /// that was in effect before the change, not resumed from the last seen
    /// cursor. Rows can be skipped or repeated if the total moved since the
    /// last fetch.
    pub fn change_page_size(&mut self, new_per_page: u32, total_count: u64) -> (Cursor, u32) {
        let cursor = Self::offset_cursor(total_count, self.page, self.per_page);
        self.per_page = new_per_page.max(1);
        self.page = self.page.min(self.page_count(total_count));
        (cursor, self.per_page)
    }

    /// Next size up in [`PAGE_SIZES`], if any
    pub fn larger_page_size(&self) -> Option<u32> {
        PAGE_SIZES.iter().copied().find(|&size| size > self.per_page)
    }

    /// Next size down in [`PAGE_SIZES`], if any
    pub fn smaller_page_size(&self) -> Option<u32> {
        PAGE_SIZES
            .iter()
            .rev()
            .copied()
            .find(|&size| size < self.per_page)
    }
}

impl Default for TablePager {
    fn default() -> Self {
        Self::new(PAGE_SIZES[0])
    }
}
