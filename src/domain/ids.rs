//! Domain identifier types with validation
//!
//! Canonical records carry opaque string ids, while SWAPI records are only
//! addressable through their reference URL. [`ReferenceId`] is the numeric
//! identifier recovered from such a URL.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)/$").expect("trailing id pattern is valid"));

/// Numeric identifier embedded in a SWAPI reference URL
///
/// Reference URLs follow the pattern `.../<kind>/<positive-integer>/`; the
/// numeric suffix is the only information extracted from them.
///
/// # Examples
///
/// ```
/// use holonet::domain::ids::ReferenceId;
///
/// let id = ReferenceId::from_url("https://swapi.py4e.com/api/planets/2/").unwrap();
/// assert_eq!(id.get(), 2);
/// assert!(ReferenceId::from_url("/people/bad/").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceId(u32);

impl ReferenceId {
    /// Creates a new ReferenceId
    ///
    /// # Returns
    ///
    /// Returns `Err` for zero; identifiers are strictly positive
    pub fn new(id: u32) -> Result<Self, String> {
        if id == 0 {
            return Err("Reference ID must be a positive integer".to_string());
        }
        Ok(Self(id))
    }

    /// Extracts the identifier from a reference URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not end in `/<digits>/` or the
    /// digits are not a positive integer that fits in a `u32`.
    pub fn from_url(url: &str) -> Result<Self, String> {
        let digits = TRAILING_ID
            .captures(url)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| format!("No numeric identifier in reference URL: {url}"))?;

        let id = digits
            .as_str()
            .parse::<u32>()
            .map_err(|e| format!("Invalid identifier in reference URL {url}: {e}"))?;

        Self::new(id)
    }

    /// Returns the raw numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReferenceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("Invalid reference ID '{s}': {e}"))?;
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://swapi.py4e.com/api/people/1/", 1 ; "absolute url")]
    #[test_case("/people/1/", 1 ; "relative path")]
    #[test_case("https://swapi.py4e.com/api/films/42/", 42 ; "multi digit")]
    #[test_case("planets/007/", 7 ; "leading zeros")]
    fn test_reference_id_from_url(url: &str, expected: u32) {
        assert_eq!(ReferenceId::from_url(url).unwrap().get(), expected);
    }

    #[test_case("/people/bad/" ; "non numeric")]
    #[test_case("/people/1" ; "missing trailing slash")]
    #[test_case("/people/0/" ; "zero")]
    #[test_case("" ; "empty")]
    #[test_case("/people/99999999999/" ; "overflow")]
    fn test_reference_id_from_url_rejects(url: &str) {
        assert!(ReferenceId::from_url(url).is_err());
    }

    #[test]
    fn test_reference_id_from_str() {
        let id: ReferenceId = "12".parse().unwrap();
        assert_eq!(id.get(), 12);
        assert!("0".parse::<ReferenceId>().is_err());
        assert!("abc".parse::<ReferenceId>().is_err());
    }

    #[test]
    fn test_reference_id_display() {
        let id = ReferenceId::new(5).unwrap();
        assert_eq!(id.to_string(), "5");
    }
}
