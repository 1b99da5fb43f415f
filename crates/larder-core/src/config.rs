use tracing::warn;

use crate::pagination::{PaginationQuery, ALL_ITEMS, DEFAULT_QUERY_PER_PAGE};

pub const DEFAULT_PER_PAGE_ENV: &str = "LARDER_DEFAULT_PER_PAGE";
pub const MAX_PER_PAGE_ENV: &str = "LARDER_MAX_PER_PAGE";

/// Server-wide pagination defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Page size used when a client does not ask for one.
    pub default_per_page: i64,
    /// Upper bound on the page size a client may request. `None` leaves
    /// requests uncapped, including "all items".
    pub max_per_page: Option<i64>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_QUERY_PER_PAGE,
            max_per_page: None,
        }
    }
}

impl PaginationConfig {
    /// Build from `LARDER_DEFAULT_PER_PAGE` and `LARDER_MAX_PER_PAGE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Values that are not positive
    /// integers are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_per_page: positive_int(&lookup, DEFAULT_PER_PAGE_ENV)
                .unwrap_or(defaults.default_per_page),
            max_per_page: positive_int(&lookup, MAX_PER_PAGE_ENV).or(defaults.max_per_page),
        }
    }

    /// Build a query for `page`, filling in the default page size and
    /// applying the cap.
    pub fn query(&self, page: Option<i64>, per_page: Option<i64>) -> PaginationQuery {
        let mut per_page = per_page.unwrap_or(self.default_per_page);
        if let Some(max) = self.max_per_page {
            if per_page == ALL_ITEMS || per_page > max {
                per_page = max;
            }
        }
        PaginationQuery {
            page: page.unwrap_or(1),
            per_page,
            ..Default::default()
        }
    }
}

fn positive_int(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<i64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!("ignoring {key}={raw:?}: expected a positive integer");
            None
        }
    }
}
