//! URL composition and query strings.

use url::Url;

use crate::error::{Error, Result};

/// Joins a base URL and a relative path with exactly one slash between them.
///
/// ```
/// use mesh_sdk::dispatch::join_url;
///
/// assert_eq!(
///     join_url("https://api.example.com/v3/", "/agents/123"),
///     "https://api.example.com/v3/agents/123"
/// );
/// ```
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Ordered query-string parameters.
///
/// Values are percent-encoded when the URL is built. Absent optional
/// values are skipped rather than sent empty.
///
/// ```
/// use mesh_sdk::dispatch::Query;
///
/// let query = Query::new()
///     .push("limit", 100)
///     .push_opt("status", Some("active"))
///     .push_opt("type", None::<&str>);
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Appends a parameter when a value is present.
    #[must_use]
    pub fn push_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Appends a comma-joined list when it is non-empty.
    #[must_use]
    pub fn push_list<V: AsRef<str>>(self, key: impl Into<String>, values: &[V]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.push(key, joined)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (key, value)| query.push(key, value))
    }
}

/// Builds the full request URL from a base, a path and a query.
pub(crate) fn build_url(base: &str, path: &str, query: &Query) -> Result<Url> {
    let joined = join_url(base, path);
    let mut url = Url::parse(&joined)
        .map_err(|e| Error::Config(format!("invalid request URL '{joined}': {e}")))?;

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.pairs());
    }

    Ok(url)
}
