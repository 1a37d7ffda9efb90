//! Query State Controller
//!
//! Owns the (page, per_page, search_term) triple for one screen and keeps it
//! valid. It performs no I/O; the screen compares descriptors before and after
//! an update to decide whether to fetch.

use std::fmt;

use crate::logic::pagination;

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PerPage {
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PerPage {
    pub const ALL: [PerPage; 4] = [PerPage::Ten, PerPage::Twenty, PerPage::Fifty, PerPage::Hundred];

    pub fn get(self) -> u32 {
        match self {
            PerPage::Ten => 10,
            PerPage::Twenty => 20,
            PerPage::Fifty => 50,
            PerPage::Hundred => 100,
        }
    }

    /// Next size in the cycle 10 → 20 → 50 → 100 → 10
    pub fn next(self) -> PerPage {
        match self {
            PerPage::Ten => PerPage::Twenty,
            PerPage::Twenty => PerPage::Fifty,
            PerPage::Fifty => PerPage::Hundred,
            PerPage::Hundred => PerPage::Ten,
        }
    }
}

impl TryFrom<u32> for PerPage {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PerPage::ALL
            .into_iter()
            .find(|p| p.get() == value)
            .ok_or_else(|| anyhow::anyhow!("page size must be one of 10, 20, 50, 100 (got {})", value))
    }
}

impl fmt::Display for PerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Which slice of a remote collection to show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    pub page: u32,
    pub per_page: PerPage,
    pub search_term: String,
}

impl QueryDescriptor {
    pub fn new(per_page: PerPage) -> Self {
        Self {
            page: 1,
            per_page,
            search_term: String::new(),
        }
    }
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::new(PerPage::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryStateController {
    descriptor: QueryDescriptor,
}

impl QueryStateController {
    pub fn new(per_page: PerPage) -> Self {
        Self {
            descriptor: QueryDescriptor::new(per_page),
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn page(&self) -> u32 {
        self.descriptor.page
    }

    pub fn per_page(&self) -> PerPage {
        self.descriptor.per_page
    }

    pub fn search_term(&self) -> &str {
        &self.descriptor.search_term
    }

    /// Replace the search term and go back to page 1
    ///
    /// An empty term means "no filter".
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.descriptor.search_term = term.into();
        self.descriptor.page = 1;
    }

    /// Go to page `n` if it exists for a collection of `total` records
    ///
    /// Out-of-range requests are ignored. Returns whether the page was applied.
    pub fn set_page(&mut self, n: u32, total: u64) -> bool {
        if !pagination::page_in_range(n, total, self.descriptor.per_page.get()) {
            return false;
        }
        self.descriptor.page = n;
        true
    }

    /// Replace the page size and go back to page 1
    pub fn set_per_page(&mut self, per_page: PerPage) {
        self.descriptor.per_page = per_page;
        self.descriptor.page = 1;
    }

    pub fn next_page(&mut self, total: u64) -> bool {
        let next = self.descriptor.page.saturating_add(1);
        self.set_page(next, total)
    }

    pub fn prev_page(&mut self, total: u64) -> bool {
        if self.descriptor.page <= 1 {
            return false;
        }
        let prev = self.descriptor.page - 1;
        self.set_page(prev, total)
    }

    /// Pull the page back into range after the collection shrank
    ///
    /// Returns true when the page moved, meaning the screen must refetch.
    pub fn reconcile_total(&mut self, total: u64) -> bool {
        let last = pagination::total_pages(total, self.descriptor.per_page.get());
        if self.descriptor.page > last {
            self.descriptor.page = last;
            return true;
        }
        false
    }
}
