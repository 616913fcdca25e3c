//! HTTP verbs used by the nimbusec API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods issued against the nimbusec API.
///
/// The service only uses the four CRUD verbs.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::RestMethod;
///
/// let method = RestMethod::Put;
/// assert!(method.has_body());
/// assert_eq!(method.to_string(), "PUT");
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Read a record or search a collection.
    Get,
    /// Create a record or append to a log.
    Post,
    /// Replace a record.
    Put,
    /// Remove a record.
    Delete,
}

impl RestMethod {
    /// Returns `true` if requests with this method carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Post.to_string(), "POST");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse() {
        assert_eq!("PUT".parse::<RestMethod>().unwrap(), RestMethod::Put);
        assert!("PATCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_has_body() {
        assert!(!RestMethod::Get.has_body());
        assert!(RestMethod::Post.has_body());
        assert!(RestMethod::Put.has_body());
        assert!(!RestMethod::Delete.has_body());
    }

    #[test]
    fn test_to_reqwest() {
        let converted: Vec<reqwest::Method> = RestMethod::iter().map(Into::into).collect();
        assert_eq!(
            converted,
            vec![
                reqwest::Method::GET,
                reqwest::Method::POST,
                reqwest::Method::PUT,
                reqwest::Method::DELETE,
            ]
        );
    }
}
