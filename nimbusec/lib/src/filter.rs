//! Filter expressions for search operations.
//!
//! Filters are written in the service's own query language (for example
//! `severity ge 2` or `name eq "example.com"`). The client never parses
//! them; they are passed through in the `q` query parameter.

use std::fmt;

/// The filter that matches every record.
///
/// Searching with this filter sends no `q` parameter at all.
pub const EMPTY_FILTER: &str = "";

/// Query parameter that carries the filter expression.
pub(crate) const FILTER_PARAM: &str = "q";

/// An opaque, server-interpreted filter expression.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::Filter;
///
/// let filter = Filter::equals("name", "example.com");
/// assert_eq!(filter.as_str(), r#"name eq "example.com""#);
///
/// assert!(Filter::empty().is_empty());
/// assert_eq!(Filter::from(""), Filter::empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filter(String);

impl Filter {
    /// Creates a filter from a raw expression.
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// Returns the filter that matches everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a `field eq "value"` expression.
    ///
    /// Backslashes and double quotes in `value` are escaped with a backslash.
    pub fn equals(field: &str, value: &str) -> Self {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if matches!(c, '"' | '\\') {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');

        Self(format!("{field} eq {quoted}"))
    }

    /// Returns `true` if this is the match-everything filter.
    pub fn is_empty(&self) -> bool {
        self.0 == EMPTY_FILTER
    }

    /// Returns the raw expression.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the query parameter for this filter, or `None` when empty.
    pub(crate) fn query(&self) -> Option<(&'static str, &str)> {
        (!self.is_empty()).then_some((FILTER_PARAM, self.0.as_str()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Filter {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for Filter {
    fn from(expression: String) -> Self {
        Self(expression)
    }
}

impl From<&Filter> for Filter {
    fn from(filter: &Filter) -> Self {
        filter.clone()
    }
}
