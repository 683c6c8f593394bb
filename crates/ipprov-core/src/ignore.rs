//! Known infrastructure addresses excluded from reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};

use crate::address::Address;

/// Public resolvers that devices commonly contact without a lookup.
pub const DEFAULT_IGNORED: [Ipv4Addr; 2] = [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)];

/// Addresses that are never reported as hard-coded, whatever their class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList(HashSet<Address>);

impl IgnoreList {
    /// Build a list from the given addresses.
    pub fn new(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self(addresses.into_iter().collect())
    }

    /// An ignore list that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self(HashSet::new())
    }

    #[must_use]
    pub fn contains(&self, addr: &Address) -> bool {
        self.0.contains(addr)
    }

    /// Add an address to the list.
    pub fn insert(&mut self, addr: Address) {
        self.0.insert(addr);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in address order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Address> {
        let mut entries: Vec<Address> = self.0.iter().cloned().collect();
        entries.sort();
        entries
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED.map(|ip| Address::from(IpAddr::V4(ip))))
    }
}

impl Extend<Address> for IgnoreList {
    fn extend<T: IntoIterator<Item = Address>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
