//! Result page number and its transitions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A 1-based page number. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Page(u64);

impl Page {
    pub const FIRST: Page = Page(1);

    pub fn new(number: u64) -> Self {
        Page(number.max(1))
    }

    pub fn number(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Page(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Self {
        Page::new(self.0.saturating_sub(1))
    }

    /// Parses a `page` parameter; anything unusable falls back to the first page.
    pub fn parse_param(raw: &str) -> Self {
        raw.trim().parse::<u64>().map(Page::new).unwrap_or_default()
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}

impl From<u64> for Page {
    fn from(value: u64) -> Self {
        Page::new(value)
    }
}

impl From<Page> for u64 {
    fn from(value: Page) -> Self {
        value.0
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks the current page. `next` is unconditional; the caller decides
/// whether to offer it based on the last result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationController {
    page: Page,
}

impl PaginationController {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn next(&mut self) -> Page {
        self.page = self.page.next();
        self.page
    }

    pub fn prev(&mut self) -> Page {
        self.page = self.page.prev();
        self.page
    }

    pub fn reset_on_filter_change(&mut self) {
        self.page = Page::FIRST;
    }
}
