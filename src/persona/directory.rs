//! Derived search and pagination over the persona catalog
//!
//! Pure computation from (catalog, query, page, page size) to a visible
//! slice; the only state is those three explicit inputs. Changing the
//! query or the page size always snaps back to the first page.

use std::fmt;
use std::str::FromStr;

use super::catalog::{catalog, PersonaEntry};

// ─────────────────────────────────────────────────────────────────
// Page Size
// ─────────────────────────────────────────────────────────────────

/// Allowed page sizes. `All` disables pagination math entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Nine,
    Fifty,
    All,
}

impl PageSize {
    /// Entries per page, or `None` for the show-all sentinel
    pub fn limit(&self) -> Option<usize> {
        match self {
            PageSize::Nine => Some(9),
            PageSize::Fifty => Some(50),
            PageSize::All => None,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Nine
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Nine => write!(f, "9"),
            PageSize::Fifty => write!(f, "50"),
            PageSize::All => write!(f, "all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "9" => Ok(PageSize::Nine),
            "50" => Ok(PageSize::Fifty),
            "all" => Ok(PageSize::All),
            other => Err(format!(
                "Invalid page size '{}'. Valid: 9, 50, all",
                other
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Directory View
// ─────────────────────────────────────────────────────────────────

/// A searched, paginated window over the persona catalog
#[derive(Debug, Clone)]
pub struct DirectoryView {
    entries: &'static [PersonaEntry],
    query: String,
    page: usize,
    page_size: PageSize,
}

impl DirectoryView {
    /// View over the full catalog, first page, default page size
    pub fn new() -> Self {
        Self {
            entries: catalog(),
            query: String::new(),
            page: 1,
            page_size: PageSize::default(),
        }
    }

    /// Replace the search query; the cursor snaps back to page 1
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch the page size; the cursor snaps back to page 1
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Move the cursor, clamped to the valid page range. A no-op under
    /// the show-all sentinel.
    pub fn set_page(&mut self, page: usize) {
        if self.page_size.limit().is_none() {
            return;
        }
        let total = self.total_pages();
        if total == 0 {
            self.page = 1;
        } else {
            self.page = page.clamp(1, total);
        }
    }

    /// Advance one page
    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    /// Go back one page
    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1).max(1));
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// All entries matching the query, in catalog order.
    ///
    /// Case-insensitive substring match against title and description;
    /// an empty query matches everything.
    pub fn filtered(&self) -> Vec<&'static PersonaEntry> {
        let needle = self.query.to_lowercase();
        self.entries
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Number of pages for the current query and page size. A query with
    /// zero matches has zero pages; the show-all sentinel collapses any
    /// non-empty result to one page.
    pub fn total_pages(&self) -> usize {
        let count = self.filtered().len();
        if count == 0 {
            return 0;
        }
        match self.page_size.limit() {
            Some(per_page) => count.div_ceil(per_page),
            None => 1,
        }
    }

    /// The slice of entries currently on screen
    pub fn visible(&self) -> Vec<&'static PersonaEntry> {
        let filtered = self.filtered();
        match self.page_size.limit() {
            Some(per_page) => {
                let start = (self.page - 1) * per_page;
                filtered.into_iter().skip(start).take(per_page).collect()
            }
            None => filtered,
        }
    }

    /// Whether pagination controls should be rendered at all
    pub fn pagination_visible(&self) -> bool {
        self.page_size.limit().is_some() && self.total_pages() > 1
    }
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
