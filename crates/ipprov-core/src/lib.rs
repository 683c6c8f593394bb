//! Core types for DNS provenance analysis.
//!
//! This crate finds addresses that a device connected to without ever
//! resolving them through DNS:
//!
//! - **Address model**: [`Address`] with a total order (IPv4 before IPv6) and
//!   private/multicast/unspecified predicates
//! - **Log readers**: [`read_resolved`] and [`read_observed`] fold the DNS and
//!   connection logs into address sets
//! - **Reconciliation**: [`reconcile`] computes observed minus resolved,
//!   drops reserved classes and the [`IgnoreList`], and sorts the rest
//!
//! # Example
//!
//! ```rust,ignore
//! use ipprov_core::{read_observed, read_resolved, reconcile, IgnoreList};
//!
//! let resolved = read_resolved(std::fs::File::open("tv-dns.log")?)?;
//! let observed = read_observed(std::fs::File::open("tv-connections.log")?)?;
//! for addr in reconcile(&observed, &resolved, &IgnoreList::default()) {
//!     println!("{addr}");
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ipprov-core/0.3.0")]

mod address;
mod error;
mod ignore;
pub mod list;
pub mod logs;
pub mod reconcile;

pub use address::{Address, Exclusion, IpVersion};
pub use error::{ProvenanceError, Result};
pub use ignore::{IgnoreList, DEFAULT_IGNORED};
pub use list::read_address_list;
pub use logs::{read_observed, read_resolved, AddressSet, ConnectionRecord, ResolutionRecord};
pub use reconcile::{reconcile, reconcile_report, ExclusionCounts, ReconcileReport};
