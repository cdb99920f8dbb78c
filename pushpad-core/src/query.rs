//! Ordered query parameters.
//!
//! Array-valued filters repeat their key (`uids[]=a&uids[]=b`), so the
//! parameters are an ordered sequence of pairs rather than a map.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters is encoded.
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Keys additionally keep the `[]` array suffix readable.
const KEY_ENCODE_SET: &AsciiSet = &VALUE_ENCODE_SET.remove(b'[').remove(b']');

/// Ordered list of `(key, value)` query pairs; keys may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Appends every pair of `other` after the current ones.
    pub fn extend(&mut self, other: QueryParams) {
        self.pairs.extend(other.pairs);
    }

    /// Returns the pairs in order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Renders `k=v&k=v` with percent-encoding (spaces become `%20`).
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, KEY_ENCODE_SET),
                    utf8_percent_encode(v, VALUE_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query string to `endpoint`; no pairs means no `?`.
    pub fn apply_to(&self, endpoint: &str) -> String {
        if self.pairs.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}
