//! Code for handling zone identifiers.
//!
//! A zone labels the geographic/market area a dataset describes (e.g. "KR").
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::rc::Rc;

/// The ID of a geographic/market zone
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ZoneID(Rc<str>);

impl ZoneID {
    /// Create a new zone ID from a string slice
    pub fn new(id: &str) -> Self {
        ZoneID(Rc::from(id))
    }
}

impl std::borrow::Borrow<str> for ZoneID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ZoneID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneID {
    fn from(s: &str) -> Self {
        ZoneID(Rc::from(s))
    }
}

impl From<String> for ZoneID {
    fn from(s: String) -> Self {
        ZoneID(Rc::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let zone = ZoneID::new("KR");
        assert_eq!(zone.to_string(), "KR");
        assert_eq!(zone, "KR".into());
    }
}
