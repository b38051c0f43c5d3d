//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use url::Url;

use crate::types::{PageRequest, DEFAULT_PER_PAGE};

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and free-text search.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Returns the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_per_page(mut self, per_page: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().per_page = per_page;
        self
    }

    /// Sets the free-text search term (`q`).
    fn with_search(mut self, search: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().search = Some(search.to_string());
        self
    }

    /// The page this query asks for, used as the normalization fallback.
    /// Matches the `page` and `per_page` sent on the wire.
    fn page_request(&self) -> PageRequest {
        self.common().page_request()
    }
}

/// Fields shared by all query types: pagination and search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u64,
    /// Results per page. Defaults to 12 and is always sent.
    pub per_page: u64,
    /// Free-text search. Empty strings are not sent.
    pub search: Option<String>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: None,
        }
    }
}

impl QueryCommon {
    /// Zero values are raised to 1, the same way on the wire and in the fallback.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    /// Appends the common pagination and search parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let request = self.page_request();
        append_opt(&mut url, "q", self.search.as_deref());
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("per_page", &request.per_page.to_string());
        url
    }
}

/// Appends `key=value` unless the value is absent or blank.
pub(crate) fn append_opt(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.trim().is_empty() {
            url.query_pairs_mut().append_pair(key, value);
        }
    }
}

/// Appends a boolean filter as `1` / `0`.
pub(crate) fn append_flag(url: &mut Url, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        url.query_pairs_mut()
            .append_pair(key, if value { "1" } else { "0" });
    }
}
