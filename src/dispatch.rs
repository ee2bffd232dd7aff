//! Runs one provider over a batch of addresses.

use crate::{
    client,
    diagnostics::Diagnostic,
    extract,
    point::Point,
    prelude::*,
    provider::{Provider, ProviderId},
    reconcile::{reconcile, Tolerance},
};

/// What to do with addresses that produced no geocode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NullPolicy {
    /// Remove unresolved addresses from the returned sequence.
    #[default]
    Drop,

    /// Keep one position per input address, so results can be zipped with
    /// the addresses positionally.
    Keep,
}

/// Shape of a single-provider batch result.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Nothing survived the null policy.
    None,

    /// Exactly one result survived.
    One(Option<Point>),

    /// Two or more results, in input address order.
    Many(Vec<Option<Point>>),
}

impl Resolution {
    /// Collapse per-address results into the calling convention, applying
    /// the null policy first.
    pub(crate) fn collapse(mut results: Vec<Option<Point>>, policy: NullPolicy) -> Self {
        if policy == NullPolicy::Drop {
            results.retain(Option::is_some);
        }
        if results.len() > 1 {
            return Self::Many(results);
        }
        match results.pop() {
            Some(only) => Self::One(only),
            None => Self::None,
        }
    }
}

/// Per-address outcomes of one dispatch, aligned with the input addresses.
#[must_use]
pub(crate) struct Dispatch {
    pub results: Vec<Option<Point>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Invoke the provider once per address under one shared HTTP client.
///
/// A failed provider call is warned about, recorded as a diagnostic, and
/// nulled; it never aborts sibling calls. A [`crate::Disagreement`] does
/// abort the batch. The client is dropped on every exit path.
#[instrument(skip_all, fields(provider = %provider_id))]
pub(crate) async fn run<S: AsRef<str>>(
    addresses: &[S],
    provider_id: ProviderId,
    provider: &dyn Provider,
    tolerance: Tolerance,
) -> Result<Dispatch> {
    info!(addresses = addresses.len(), "📍 Geocoding…");
    let http = client::build_client()?;
    let mut results = Vec::with_capacity(addresses.len());
    let mut diagnostics = Vec::new();
    for address in addresses {
        let address = address.as_ref();
        match provider.geocode(address, &http).await {
            Ok(response) => {
                let wkt = extract::wkt_candidate(address, &response);
                let structured = extract::structured_candidate(address, &response);
                results.push(reconcile(wkt, structured, tolerance)?);
            }
            Err(error) => {
                warn!("⚠️ Could not get any data via `{provider_id}` for `{address}`: {error:#}");
                diagnostics.push(Diagnostic::ProviderFailure {
                    provider: provider_id,
                    address: address.to_owned(),
                    message: format!("{error:#}"),
                });
                results.push(None);
            }
        }
    }
    Ok(Dispatch { results, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(address: &str) -> Option<Point> {
        Some(Point::new(address, 1.0, 2.0))
    }

    #[test]
    fn collapse_empty_to_none() {
        assert_eq!(Resolution::collapse(Vec::new(), NullPolicy::Drop), Resolution::None);
        assert_eq!(Resolution::collapse(Vec::new(), NullPolicy::Keep), Resolution::None);
    }

    #[test]
    fn collapse_all_null_drop_to_none() {
        assert_eq!(Resolution::collapse(vec![None, None], NullPolicy::Drop), Resolution::None);
    }

    #[test]
    fn collapse_single_to_one() {
        assert_eq!(
            Resolution::collapse(vec![point("a")], NullPolicy::Drop),
            Resolution::One(point("a")),
        );
        assert_eq!(Resolution::collapse(vec![None], NullPolicy::Keep), Resolution::One(None));
    }

    #[test]
    fn collapse_drop_preserves_order() {
        let results = vec![point("a"), None, point("c")];
        assert_eq!(
            Resolution::collapse(results, NullPolicy::Drop),
            Resolution::Many(vec![point("a"), point("c")]),
        );
    }

    #[test]
    fn collapse_keep_preserves_positions() {
        let results = vec![point("a"), None, point("c")];
        assert_eq!(
            Resolution::collapse(results.clone(), NullPolicy::Keep),
            Resolution::Many(results),
        );
    }
}
