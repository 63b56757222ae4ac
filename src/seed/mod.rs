//! Advocate dataset bundled into the binary.

use crate::domain::advocate::NewAdvocate;

const ADVOCATES_JSON: &str = include_str!("advocates.json");

/// Parses the bundled advocates in file order.
pub fn advocates() -> Result<Vec<NewAdvocate>, serde_json::Error> {
    serde_json::from_str(ADVOCATES_JSON)
}
