//! Cross-validation of the two candidate representations of one response.

use thiserror::Error;

use crate::point::Point;

pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Validated relative tolerance for the closeness test.
///
/// The tolerance is the maximum allowed difference between the `x` and `y`
/// values of the two candidate sources, relative to the larger absolute
/// value of the pair. The default of `1e-9` requires agreement within about
/// nine decimal digits.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Fails on a zero, negative, or NaN tolerance.
    pub fn new(rel_tol: f64) -> Result<Self, InvalidTolerance> {
        if rel_tol > 0.0 {
            Ok(Self(rel_tol))
        } else {
            Err(InvalidTolerance { rel_tol })
        }
    }

    #[must_use]
    pub const fn relative(self) -> f64 {
        self.0
    }

    /// Symmetric, scale-aware closeness test:
    /// `|a − b| ≤ rel_tol × max(|a|, |b|)`.
    #[must_use]
    pub fn is_close(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.0 * a.abs().max(b.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_REL_TOL)
    }
}

#[derive(Debug, Error)]
#[error("relative tolerance must be greater than zero, got {rel_tol}")]
pub struct InvalidTolerance {
    pub rel_tol: f64,
}

/// The two candidate sources are both present and contradict each other.
///
/// Fatal for the batch that produced it: the caller decides how to handle
/// the contradiction, it is never silently resolved.
#[derive(Debug, Error)]
#[error("coordinate sources disagree for `{address}`: WKT={wkt}, structured={structured}")]
pub struct Disagreement {
    pub address: String,
    pub wkt: Point,
    pub structured: Point,
}

/// Derive the authoritative point from the two candidates of one address.
///
/// When both candidates agree within the tolerance on both axes, the WKT
/// candidate wins; the preference is arbitrary but fixed, both being equally
/// valid at that point. A single candidate is returned as-is, and no
/// candidate at all is simply "no geocode found".
pub fn reconcile(
    wkt: Option<Point>,
    structured: Option<Point>,
    tolerance: Tolerance,
) -> Result<Option<Point>, Disagreement> {
    match (wkt, structured) {
        (Some(wkt), Some(structured)) => {
            if tolerance.is_close(wkt.x, structured.x) && tolerance.is_close(wkt.y, structured.y) {
                Ok(Some(wkt))
            } else {
                Err(Disagreement { address: wkt.address.clone(), wkt, structured })
            }
        }
        (wkt, structured) => Ok(wkt.or(structured)),
    }
}
