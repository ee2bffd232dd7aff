//! Structured records of recoverable conditions.
//!
//! Every condition below is also logged as a warning where it occurs, but
//! callers get the structured record back alongside the results instead of
//! having to scrape a log.

use crate::provider::ProviderId;

/// Recoverable condition hit while processing a batch.
///
/// Each variant is isolated to the smallest unit of work it concerns and
/// never aborts sibling work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// One provider call failed; the result for that address was recorded
    /// as null and the batch continued.
    ProviderFailure {
        provider: ProviderId,
        address: String,
        message: String,
    },

    /// A requested provider name is not in the configured allow-list; the
    /// provider was skipped.
    UnknownProvider { name: String },

    /// An allowed provider has no transport registered; the provider was
    /// skipped.
    UnregisteredProvider { provider: ProviderId },
}
