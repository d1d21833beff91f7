//! Route verbs.

use crate::error::RegistrationError;
use std::{fmt, str::FromStr};

/// The verbs a route can be registered for.
///
/// [`Method::All`] is a wildcard: a route stored with it matches every
/// concrete verb as well as an explicit `"all"` lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// Any verb.
    All,
}

impl Method {
    /// Every supported verb, wildcard last.
    pub const VERBS: [Method; 6] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Head,
        Method::All,
    ];

    /// Parses a verb, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "delete" => Ok(Method::Delete),
            "head" => Ok(Method::Head),
            "all" => Ok(Method::All),
            _ => Err(RegistrationError::UnsupportedMethod(raw.to_string())),
        }
    }

    /// The normalized, lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::All => "all",
        }
    }

    /// Whether a route stored with `self` serves a lookup for `requested`.
    pub fn accepts(self, requested: Method) -> bool {
        self == requested || self == Method::All
    }
}

impl FromStr for Method {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(Method::parse("GET"), Ok(Method::Get));
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(Method::parse("  get "), Ok(Method::Get));
    }

    #[test]
    fn test_parse_rejects_unknown_verbs() {
        assert_eq!(
            Method::parse("invalidMethod"),
            Err(RegistrationError::UnsupportedMethod("invalidMethod".into()))
        );
        assert!("patch".parse::<Method>().is_err());
    }

    #[test]
    fn test_verbs_round_trip_names() {
        assert_eq!(Method::VERBS.len(), 6);
        for verb in Method::VERBS {
            assert_eq!(Method::parse(verb.as_str()), Ok(verb));
        }
    }

    #[test]
    fn test_all_accepts_every_verb() {
        for verb in Method::VERBS {
            assert!(Method::All.accepts(verb));
        }
        assert!(Method::Get.accepts(Method::Get));
        assert!(!Method::Get.accepts(Method::Post));
        assert!(!Method::Get.accepts(Method::All));
    }
}
