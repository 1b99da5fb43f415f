//! Generic pagination envelope and the query that produces it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;
use url::{Position, Url};

use crate::error::{Result, ValidationError};

/// `per_page` value requesting every item on a single page.
pub const ALL_ITEMS: i64 = -1;

pub const DEFAULT_QUERY_PER_PAGE: i64 = 50;
pub const DEFAULT_ENVELOPE_PER_PAGE: i64 = 10;

// Base used to resolve path-only routes such as `/api/groups/labels`.
const RELATIVE_BASE: &str = "http://localhost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(OrderDirection::Asc),
            "desc" => Some(OrderDirection::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging and ordering requested by a client on a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationQuery {
    pub page: i64,
    pub per_page: i64,
    pub order_by: Option<String>,
    pub order_direction: OrderDirection,
    pub query_filter: Option<String>,
    pub pagination_seed: Option<String>,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_QUERY_PER_PAGE,
            order_by: None,
            order_direction: OrderDirection::Asc,
            query_filter: None,
            pagination_seed: None,
        }
    }
}

impl PaginationQuery {
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ValidationError::InvalidPagination(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }
        if self.per_page == 0 || self.per_page < ALL_ITEMS {
            return Err(ValidationError::InvalidPagination(format!(
                "per_page must be positive or {ALL_ITEMS}, got {}",
                self.per_page
            )));
        }
        Ok(())
    }
}

/// A page of items plus the metadata needed to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationBase<T> {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_envelope_per_page")]
    pub per_page: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub total_pages: i64,
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_envelope_per_page() -> i64 {
    DEFAULT_ENVELOPE_PER_PAGE
}

impl<T> PaginationBase<T> {
    /// Wrap one page of items. `total` is the item count across all pages;
    /// `total_pages` is derived from it.
    pub fn new(items: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: page.max(1),
            per_page,
            total,
            total_pages: total_pages(total, per_page),
            items,
            next: None,
            previous: None,
        }
    }

    pub fn from_query(items: Vec<T>, query: &PaginationQuery, total: i64) -> Self {
        Self::new(items, query.page, query.per_page, total)
    }

    /// Re-type the items, keeping the page metadata.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> PaginationBase<U> {
        PaginationBase {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
            previous: self.previous,
        }
    }

    /// Fill `next` and `previous` with links to the neighbouring pages.
    ///
    /// `route` may be an absolute URL or a bare path. `query_params` are the
    /// query parameters the client sent; keys are camelized before being
    /// merged into the route's own query string.
    pub fn set_pagination_guides(&mut self, route: &str, query_params: &[(&str, &str)]) -> Result<()> {
        self.page = self.page.max(1);

        let params: Vec<(String, String)> = query_params
            .iter()
            .map(|(k, v)| (camelize(k), v.to_string()))
            .collect();

        self.next = if self.page >= self.total_pages {
            None
        } else {
            Some(page_link(route, &params, self.page + 1)?)
        };

        self.previous = if self.page <= 1 {
            None
        } else {
            Some(page_link(route, &params, self.page - 1)?)
        };

        trace!(
            "pagination guides for {route} page {}/{}: next={:?} previous={:?}",
            self.page,
            self.total_pages,
            self.next,
            self.previous
        );
        Ok(())
    }
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        0
    } else if per_page <= 0 {
        1
    } else {
        (total - 1) / per_page + 1
    }
}

fn page_link(route: &str, params: &[(String, String)], page: i64) -> Result<String> {
    let mut params = params.to_vec();
    params.push(("page".to_string(), page.to_string()));
    merge_query_parameters(route, &params)
}

/// Merge `params` into the query string of `route`. A key already present is
/// replaced in place (all of its values); new keys are appended.
pub fn merge_query_parameters(route: &str, params: &[(String, String)]) -> Result<String> {
    let (mut url, relative) = match Url::parse(route) {
        Ok(url) => (url, false),
        Err(url::ParseError::RelativeUrlWithoutBase) if route.starts_with("//") => {
            return Err(ValidationError::InvalidRoute(format!(
                "{route}: scheme-relative routes are not supported"
            )));
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = Url::parse(RELATIVE_BASE)
                .and_then(|base| base.join(route))
                .map_err(|e| ValidationError::InvalidRoute(format!("{route}: {e}")))?;
            (url, true)
        }
        Err(e) => return Err(ValidationError::InvalidRoute(format!("{route}: {e}"))),
    };

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (key, value) in params {
        match pairs.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                pairs[pos].1 = value.clone();
                let mut idx = 0;
                pairs.retain(|(k, _)| {
                    let keep = idx == pos || k != key;
                    idx += 1;
                    keep
                });
            }
            None => pairs.push((key.clone(), value.clone())),
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }

    if relative {
        let link = &url[Position::BeforePath..];
        // Joining against the base roots the path; keep the route as given.
        match link.strip_prefix('/') {
            Some(rest) if !route.starts_with('/') => Ok(rest.to_string()),
            _ => Ok(link.to_string()),
        }
    } else {
        Ok(url.to_string())
    }
}

/// `per_page` -> `perPage`. Keys without underscores pass through.
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
