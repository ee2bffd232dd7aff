use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping between an address and its resolved coordinates.
///
/// The axes are provider-defined: both candidate representations of a
/// response must use the same axis order, but the crate itself never
/// interprets `x` and `y` beyond comparing them.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub address: String,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(address: impl Into<String>, x: f64, y: f64) -> Self {
        Self { address: address.into(), x, y }
    }

    /// Coordinate pair without the address label.
    #[must_use]
    pub const fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
