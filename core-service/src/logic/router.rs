//! Page Router
//!
//! Finite-state view selector over the four pages. Navigation is total;
//! the only guarded page is `Results`, which resolves to nothing when no
//! detection result exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::scan::DetectionResult;

// ============================================================================
// PAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    Results,
    About,
    HowItWorks,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Results, Page::About, Page::HowItWorks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Results => "results",
            Page::About => "about",
            Page::HowItWorks => "how-it-works",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Results => "Results",
            Page::About => "About",
            Page::HowItWorks => "How It Works",
        }
    }

    /// Pages listed in the navigation bar, in display order
    pub fn nav_items() -> [Page; 3] {
        [Page::Home, Page::HowItWorks, Page::About]
    }

    /// Nav entry highlighted while this page is shown
    pub fn nav_highlight(&self) -> Page {
        match self {
            Page::Results => Page::Home,
            other => *other,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown page: {0}")]
pub struct UnknownPage(pub String);

impl std::str::FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

// ============================================================================
// ROUTER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PageRouter {
    current: Page,
}

impl PageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Unconditional switch to `page`
    pub fn navigate(&mut self, page: Page) -> Page {
        if page != self.current {
            log::debug!("Navigate {} -> {}", self.current, page);
        }
        self.current = page;
        self.current
    }

    /// Scan completed: show its result
    pub fn on_scan_complete(&mut self) -> Page {
        self.navigate(Page::Results)
    }

    /// "Scan another URL" from the Results view. The stored result is
    /// untouched; only the page changes.
    pub fn new_scan(&mut self) -> Page {
        self.navigate(Page::Home)
    }

    /// Page that actually renders. `None` when `Results` is current but
    /// no result exists.
    pub fn resolve(&self, result: Option<&DetectionResult>) -> Option<Page> {
        match (self.current, result) {
            (Page::Results, None) => None,
            (page, _) => Some(page),
        }
    }
}
