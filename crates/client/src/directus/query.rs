//! Query parameters for collection reads.

use url::Url;

/// Field selection, paging and ordering for a collection read.
///
/// ```
/// use creators_corner_client::Query;
///
/// let query = Query::new().fields(["id", "title"]).limit(10).sort("-date_created");
/// assert_eq!(query.limit_value(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    fields: Vec<String>,
    limit: Option<u32>,
    sort: Vec<String>,
}

impl Query {
    /// An empty query: default fields, server-side limit and order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request only these fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Return at most `limit` items.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort by `field`; prefix with `-` for descending. May be repeated.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort.push(field.into());
        self
    }

    /// The configured limit.
    #[must_use]
    pub const fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Write the query string onto `url`, using `default_fields` when no
    /// fields were picked.
    pub(crate) fn apply(&self, url: &mut Url, default_fields: &[&str]) {
        let fields = if self.fields.is_empty() {
            default_fields.join(",")
        } else {
            self.fields.join(",")
        };

        let mut pairs = url.query_pairs_mut();
        if !fields.is_empty() {
            pairs.append_pair("fields", &fields);
        }
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if !self.sort.is_empty() {
            pairs.append_pair("sort", &self.sort.join(","));
        }
    }
}
