//! Audience filters.
//!
//! Tags come in two shapes: a flat list, sent as repeated `tags[]` pairs, or
//! a boolean expression string, sent verbatim as a single `tags` pair. The
//! expression grammar belongs to the service and is never parsed here.

use serde::{Deserialize, Serialize};

use crate::constants::{TAGS_EXPRESSION_PARAM, TAGS_LIST_PARAM, UIDS_PARAM};
use crate::query::QueryParams;

/// Tag filter: a list or a boolean expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    /// Flat tag set, serialized as a JSON array.
    List(Vec<String>),
    /// Boolean expression such as `"sports || travel"`, serialized as a string.
    Expression(String),
}

impl Tags {
    /// Builds a tag list.
    pub fn list<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Tags::List(tags.into_iter().map(Into::into).collect())
    }

    /// Builds a boolean expression.
    pub fn expression(expr: impl Into<String>) -> Self {
        Tags::Expression(expr.into())
    }

    /// Appends this filter's query pairs.
    pub fn append_to(&self, params: &mut QueryParams) {
        match self {
            Tags::List(tags) => {
                for tag in tags {
                    params.push(TAGS_LIST_PARAM, tag);
                }
            }
            Tags::Expression(expr) => params.push(TAGS_EXPRESSION_PARAM, expr),
        }
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Tags::List(tags)
    }
}

impl From<Vec<&str>> for Tags {
    fn from(tags: Vec<&str>) -> Self {
        Tags::list(tags)
    }
}

impl From<&str> for Tags {
    fn from(expr: &str) -> Self {
        Tags::Expression(expr.into())
    }
}

impl From<String> for Tags {
    fn from(expr: String) -> Self {
        Tags::Expression(expr)
    }
}

/// Uid and tag filters narrowing which subscribers are addressed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AudienceFilter {
    /// Uids, in caller order, duplicates kept
    pub uids: Vec<String>,
    /// Optional tag filter
    pub tags: Option<Tags>,
}

impl AudienceFilter {
    /// Creates an empty filter (everyone).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uids.push(uid.into());
        self
    }

    /// Adds several uids.
    pub fn with_uids<I, S>(mut self, uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uids.extend(uids.into_iter().map(Into::into));
        self
    }

    /// Sets the tag filter.
    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Renders the filter: every uid first, then the tags.
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        for uid in &self.uids {
            params.push(UIDS_PARAM, uid);
        }
        if let Some(tags) = &self.tags {
            tags.append_to(&mut params);
        }
        params
    }
}
