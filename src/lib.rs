//! Stay-price calculation engine for the hotel back office.
//!
//! The core lives in [`pricing`]; [`cache`] holds the optional rate-index
//! cache and [`error`] the HTTP error boundary.

pub mod cache;
pub mod error;
pub mod pricing;

use cache::AppCache;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: AppCache,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cache: AppCache::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
