//! Per-address PTR and registry attribution.
//!
//! Lookups run one address at a time in input order. A failed lookup leaves
//! that address's fields empty and the batch carries on.

use ipprov_core::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::dns::{parse_ptr_response, SuffixRule};
use crate::lookup::{Lookup, LookupService};
use crate::whois::{parse_whois_response, RegistryInfo};

/// Header of the attribution table.
pub const CSV_HEADER: [&str; 4] = ["ip", "ptr", "orgname", "netname"];

/// One row of the attribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// Address that was looked up
    pub address: Address,
    /// PTR names with the trailing dot removed
    pub ptr: Lookup<Vec<String>>,
    /// Registry ownership fields
    pub registry: Lookup<RegistryInfo>,
}

impl AttributionRecord {
    /// PTR names, empty if the lookup failed.
    #[must_use]
    pub fn ptr_names(&self) -> &[String] {
        self.ptr.answer().map(Vec::as_slice).unwrap_or_default()
    }

    /// PTR names joined with commas.
    #[must_use]
    pub fn ptr_joined(&self) -> String {
        self.ptr_names().join(",")
    }

    #[must_use]
    pub fn organization(&self) -> &str {
        self.registry
            .answer()
            .and_then(|info| info.organization.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn network(&self) -> &str {
        self.registry
            .answer()
            .and_then(|info| info.network.as_deref())
            .unwrap_or_default()
    }

    /// True if any PTR name ends with the rule's suffix.
    #[must_use]
    pub fn matches(&self, rule: &SuffixRule) -> bool {
        rule.matches_any(self.ptr_names())
    }

    /// The record as `ip,ptr,orgname,netname` fields.
    #[must_use]
    pub fn csv_fields(&self) -> [String; 4] {
        [
            self.address.to_string(),
            self.ptr_joined(),
            self.organization().to_string(),
            self.network().to_string(),
        ]
    }
}

/// Everything produced by one attribution run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// One record per input address, in input order
    pub records: Vec<AttributionRecord>,
    /// Addresses whose PTR names matched, in discovery order, once each
    pub matched: Vec<Address>,
}

/// Look up a single address.
pub async fn attribute_address<L>(addr: &Address, lookup: &L) -> AttributionRecord
where
    L: LookupService + ?Sized,
{
    let ptr = Lookup::<String>::from(lookup.reverse_dns(addr).await.map_err(|e| {
        warn!(addr = %addr, error = %e, "reverse DNS lookup failed");
        e
    }))
    .map(|text| parse_ptr_response(&text));

    let registry = Lookup::<String>::from(lookup.whois(addr).await.map_err(|e| {
        warn!(addr = %addr, error = %e, "registry lookup failed");
        e
    }))
    .map(|text| parse_whois_response(&text));

    AttributionRecord {
        address: addr.clone(),
        ptr,
        registry,
    }
}

/// Attribute every address, handing each record to `on_record` as soon as it
/// is complete.
///
/// An error from `on_record` stops the run and is returned; records already
/// handed over stay with the caller.
pub async fn attribute_with<L, F, E>(
    addresses: &[Address],
    rule: &SuffixRule,
    lookup: &L,
    mut on_record: F,
) -> Result<Attribution, E>
where
    L: LookupService + ?Sized,
    F: FnMut(&AttributionRecord) -> Result<(), E>,
{
    let mut result = Attribution::default();
    let mut seen = HashSet::new();

    for addr in addresses {
        let record = attribute_address(addr, lookup).await;
        debug!(addr = %addr, ptr = %record.ptr_joined(), org = record.organization(), "attributed");

        on_record(&record)?;

        if record.matches(rule) && seen.insert(addr.clone()) {
            result.matched.push(addr.clone());
        }
        result.records.push(record);
    }

    info!(
        addresses = result.records.len(),
        matched = result.matched.len(),
        suffix = %rule,
        "attribution complete"
    );
    Ok(result)
}

/// Attribute every address and collect the matches.
pub async fn attribute<L>(addresses: &[Address], rule: &SuffixRule, lookup: &L) -> Attribution
where
    L: LookupService + ?Sized,
{
    match attribute_with(addresses, rule, lookup, |_| Ok::<(), std::convert::Infallible>(())).await {
        Ok(result) => result,
        Err(never) => match never {},
    }
}
