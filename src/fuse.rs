//! The service tying configuration, dispatch, and tabulation together.

use std::sync::Arc;

use bon::Builder;
use itertools::Itertools;

use crate::{
    diagnostics::Diagnostic,
    dispatch::{self, NullPolicy, Resolution},
    point::Point,
    prelude::*,
    provider::{Provider, ProviderId, Registry},
    reconcile::Tolerance,
    table::{Cell, ResultTable, Tabulation},
};

/// Resolves addresses through one provider or tabulates them across many.
///
/// All configuration is fixed at construction and read-only afterwards; the
/// service can be shared freely between calls.
#[must_use]
#[derive(Builder)]
pub struct Geofuse {
    /// Transports resolved at construction time.
    #[builder(default = Registry::with_default_providers())]
    registry: Registry,

    /// Providers accepted for dispatch, in row order of the tabulated
    /// output.
    #[builder(default = ProviderId::ALL.to_vec())]
    allow_list: Vec<ProviderId>,

    /// Closeness tolerance for cross-validating the two candidate sources,
    /// already validated at construction.
    #[builder(default)]
    tolerance: Tolerance,
}

impl Default for Geofuse {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Outcome of the single-provider path.
#[must_use]
#[derive(Debug)]
pub struct Resolved {
    pub resolution: Resolution,
    pub diagnostics: Vec<Diagnostic>,
}

impl Geofuse {
    /// Resolve each address through one provider.
    ///
    /// Per-address provider failures are recorded as diagnostics and nulled;
    /// a [`crate::Disagreement`] between the candidate sources of one
    /// address aborts the whole call.
    pub async fn resolve<S: AsRef<str>>(
        &self,
        addresses: &[S],
        provider: &str,
        null_policy: NullPolicy,
    ) -> Result<Resolved> {
        let mut diagnostics = Vec::new();
        let Some((id, transport)) = self.checked_provider(provider, &mut diagnostics) else {
            return Ok(Resolved { resolution: Resolution::None, diagnostics });
        };
        let dispatch = dispatch::run(addresses, id, transport.as_ref(), self.tolerance).await?;
        diagnostics.extend(dispatch.diagnostics);
        Ok(Resolved {
            resolution: Resolution::collapse(dispatch.results, null_policy),
            diagnostics,
        })
    }

    /// Tabulate each address across many providers.
    ///
    /// Defaults to the full allow-list. Each allowed provider contributes
    /// one row with one cell per address; rows and columns that are
    /// entirely null are pruned, and no surviving rows means no table.
    pub async fn tabulate<S: AsRef<str>>(
        &self,
        addresses: &[S],
        providers: Option<&[&str]>,
    ) -> Result<Tabulation> {
        let requested: Vec<String> = match providers {
            Some(names) => names.iter().map(|&name| name.to_owned()).collect(),
            None => self.allow_list.iter().map(ToString::to_string).collect(),
        };
        info!(providers = %requested.iter().join(", "), "🧮 Tabulating…");
        let mut diagnostics = Vec::new();
        let mut rows: Vec<(ProviderId, Vec<Cell>)> = Vec::new();
        for name in &requested {
            let Some((id, transport)) = self.checked_provider(name, &mut diagnostics) else {
                continue;
            };
            let dispatch = dispatch::run(addresses, id, transport.as_ref(), self.tolerance).await?;
            diagnostics.extend(dispatch.diagnostics);
            rows.push((
                id,
                dispatch.results.iter().map(|result| result.as_ref().map(Point::xy)).collect(),
            ));
        }
        Ok(Tabulation { table: ResultTable::assemble(addresses, rows), diagnostics })
    }

    /// Uniform allow-list and registry check at the dispatch boundary.
    fn checked_provider(
        &self,
        name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<(ProviderId, Arc<dyn Provider>)> {
        let allowed =
            name.parse::<ProviderId>().ok().filter(|id| self.allow_list.contains(id));
        let Some(id) = allowed else {
            warn!("⚠️ Provider `{name}` is not in the allow-list, skipping");
            diagnostics.push(Diagnostic::UnknownProvider { name: name.to_owned() });
            return None;
        };
        match self.registry.get(id) {
            Some(provider) => Some((id, provider)),
            None => {
                warn!("⚠️ No transport is registered for `{id}`, skipping");
                diagnostics.push(Diagnostic::UnregisteredProvider { provider: id });
                None
            }
        }
    }
}
