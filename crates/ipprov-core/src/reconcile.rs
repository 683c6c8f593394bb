//! Observed-minus-resolved reconciliation.
//!
//! An address counts as resolved if any DNS answer anywhere in the log
//! produced it. Timing between the answer and the connection is not
//! considered.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::address::{Address, Exclusion};
use crate::ignore::IgnoreList;
use crate::logs::AddressSet;

/// How many candidates each filter removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionCounts {
    pub unspecified: usize,
    pub multicast: usize,
    pub reserved: usize,
    pub private: usize,
    pub ignored: usize,
}

impl ExclusionCounts {
    fn record(&mut self, reason: Exclusion) {
        match reason {
            Exclusion::Unspecified => self.unspecified += 1,
            Exclusion::Multicast => self.multicast += 1,
            Exclusion::Reserved => self.reserved += 1,
            Exclusion::Private => self.private += 1,
            Exclusion::Ignored => self.ignored += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.unspecified + self.multicast + self.reserved + self.private + self.ignored
    }
}

/// Result of reconciling the connection log against the DNS log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Distinct addresses seen in connections
    pub observed: usize,
    /// Distinct addresses produced by DNS
    pub resolved: usize,
    /// Observed addresses never produced by DNS, before filtering
    pub unresolved: usize,
    /// Candidates dropped by class or ignore list
    pub excluded: ExclusionCounts,
    /// Remaining addresses, IPv4 first, ascending
    pub hardcoded: Vec<Address>,
}

/// Reconcile and keep the per-reason counts.
pub fn reconcile_report(
    observed: &AddressSet,
    resolved: &AddressSet,
    ignore: &IgnoreList,
) -> ReconcileReport {
    let mut excluded = ExclusionCounts::default();
    let mut unresolved = 0;
    let mut hardcoded: Vec<Address> = observed
        .difference(resolved)
        .filter(|addr| {
            unresolved += 1;
            addr.exclusion(ignore).map_or(true, |reason| {
                excluded.record(reason);
                false
            })
        })
        .cloned()
        .collect();
    hardcoded.sort_unstable();

    info!(
        observed = observed.len(),
        resolved = resolved.len(),
        unresolved,
        excluded = excluded.total(),
        hardcoded = hardcoded.len(),
        "reconciliation complete"
    );

    ReconcileReport {
        observed: observed.len(),
        resolved: resolved.len(),
        unresolved,
        excluded,
        hardcoded,
    }
}

/// Addresses that were connected to but never resolved, filtered and sorted.
pub fn reconcile(observed: &AddressSet, resolved: &AddressSet, ignore: &IgnoreList) -> Vec<Address> {
    reconcile_report(observed, resolved, ignore).hardcoded
}
