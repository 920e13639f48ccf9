//! Query string assembly.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone};
use std::fmt::Display;

/// Ordered query parameters.
///
/// Absent values and empty strings are skipped, lists repeat their key once
/// per element, and dates are rendered the way the ABAX API expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value unconditionally (unless it renders empty).
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    /// Append a value when present.
    pub fn opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Append every element under the same key, in order.
    pub fn list<V: Display>(self, key: &str, values: impl IntoIterator<Item = V>) -> Self {
        values
            .into_iter()
            .fold(self, |params, value| params.push(key, value))
    }

    /// Append a calendar date as `yyyy-MM-dd`.
    pub fn date(self, key: &str, value: Option<NaiveDate>) -> Self {
        self.opt(key, value.map(|d| d.format("%Y-%m-%d")))
    }

    /// Append an instant as RFC 3339 with an explicit offset (`+00:00`, never `Z`).
    pub fn datetime<Tz>(self, key: &str, value: Option<&DateTime<Tz>>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.opt(
            key,
            value.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, false)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Render as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}
