//! Candidate extraction from a provider response.
//!
//! A response carries up to two independently-formatted representations of
//! the same coordinates. Each extractor is a pure function of the response:
//! an absent or malformed representation yields no candidate, never an
//! error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{point::Point, provider::ProviderResponse};

static WKT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^POINT\((\S+)\s+(\S+)\)$").expect("WKT pattern should compile"));

/// Candidate from the well-known-text attribute, `POINT(<x> <y>)`.
pub fn wkt_candidate(address: &str, response: &ProviderResponse) -> Option<Point> {
    let captures = WKT_PATTERN.captures(response.wkt.as_deref()?)?;
    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = captures.get(2)?.as_str().parse().ok()?;
    Some(Point::new(address, x, y))
}

/// Candidate from the structured mapping attribute, keys `x` and `y`.
pub fn structured_candidate(address: &str, response: &ProviderResponse) -> Option<Point> {
    let mapping = response.structured.as_ref()?;
    let x = numeric(mapping.get("x")?)?;
    let y = numeric(mapping.get("y")?)?;
    Some(Point::new(address, x, y))
}

/// Providers return coordinates as JSON numbers or as numeric strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
