//! Offset-based paging over the observations listing.
//!
//! Pages are 1-based and fetched strictly in order. A run stops once the
//! page cap is hit or the pages already fetched cover `total_results`.

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Page cap used when none is configured
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// Parameters for a single page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub page_number: u32,
}

impl PageRequest {
    /// The first page of a run
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size,
            page_number: 1,
        }
    }

    /// The page after this one
    pub fn next(self) -> Self {
        Self {
            page_number: self.page_number + 1,
            ..self
        }
    }

    /// Query string pairs as the API expects them
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("per_page", self.page_size.to_string()),
            ("page", self.page_number.to_string()),
        ]
    }
}

/// Page size and page cap for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Pagination {
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size,
            max_pages,
        }
    }

    /// Request for the first page of a run
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }

    /// Decide, after `page_number` has been processed, whether another page is due.
    ///
    /// Both conditions must hold: the cap has not been reached, and the pages
    /// fetched so far don't yet cover `total_results`.
    pub fn should_continue(&self, page_number: u32, total_results: u64) -> bool {
        let covered = u64::from(page_number) * u64::from(self.page_size);
        page_number < self.max_pages && covered < total_results
    }

    /// Number of requests a run makes when `total_results` stays stable.
    ///
    /// Always at least one: the first page is fetched before anything is known.
    pub fn expected_requests(&self, total_results: u64) -> u32 {
        let pages_needed = match self.page_size {
            0 if total_results > 0 => u64::MAX,
            0 => 1,
            size => total_results.div_ceil(u64::from(size)).max(1),
        };
        // bounded by max_pages, which is a u32
        pages_needed.min(u64::from(self.max_pages)).max(1) as u32
    }
}
