//! Tabulation of results across providers and addresses.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{diagnostics::Diagnostic, provider::ProviderId};

/// One table cell: the coordinate pair, or null where the provider produced
/// no geocode for the address.
pub type Cell = Option<(f64, f64)>;

/// Two-dimensional comparison of providers (rows) against addresses
/// (columns).
///
/// Rows keep the order in which providers were requested, columns keep the
/// input address order. Rows and columns that are entirely null are pruned
/// at assembly.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultTable {
    addresses: Vec<String>,
    rows: IndexMap<ProviderId, Vec<Cell>>,
}

impl ResultTable {
    /// Assemble the table from per-provider rows aligned with `addresses`,
    /// pruning all-null rows and columns. No surviving rows means no table.
    pub(crate) fn assemble<S: AsRef<str>>(
        addresses: &[S],
        rows: Vec<(ProviderId, Vec<Cell>)>,
    ) -> Option<Self> {
        let mut rows: IndexMap<ProviderId, Vec<Cell>> = rows
            .into_iter()
            .filter(|(_, cells)| cells.iter().any(Option::is_some))
            .collect();
        if rows.is_empty() {
            return None;
        }
        let keep: Vec<usize> = (0..addresses.len())
            .filter(|&column| rows.values().any(|cells| cells.get(column).copied().flatten().is_some()))
            .collect();
        for cells in rows.values_mut() {
            *cells = keep.iter().map(|&column| cells.get(column).copied().flatten()).collect();
        }
        let addresses = keep.iter().map(|&column| addresses[column].as_ref().to_owned()).collect();
        Some(Self { addresses, rows })
    }

    /// Column labels, in input order.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Row labels, in requested order.
    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.rows.keys().copied()
    }

    /// Cells of one provider's row, aligned with [`Self::addresses`].
    #[must_use]
    pub fn row(&self, provider: ProviderId) -> Option<&[Cell]> {
        self.rows.get(&provider).map(Vec::as_slice)
    }

    /// Cell at (provider, column), flattened: `None` for a missing row, a
    /// pruned column, or a null cell alike.
    #[must_use]
    pub fn cell(&self, provider: ProviderId, column: usize) -> Cell {
        self.rows.get(&provider).and_then(|cells| cells.get(column).copied().flatten())
    }
}

/// Outcome of the multi-provider path: the table, if any provider yielded a
/// row, plus every recoverable condition hit along the way.
#[must_use]
#[derive(Debug)]
pub struct Tabulation {
    pub table: Option<ResultTable>,
    pub diagnostics: Vec<Diagnostic>,
}
