//! Reverse-DNS and registry attribution for observed addresses.
//!
//! This crate enriches addresses with PTR names and WHOIS ownership, picks
//! out those whose PTR names end with a provider suffix, and turns them into
//! a BPF filter expression.
//!
//! Lookups go through the [`LookupService`] trait. [`CommandLookup`] shells
//! out to `dig` and `whois`; tests substitute canned responses.

#![doc(html_root_url = "https://docs.rs/ipprov-recon/0.3.0")]

mod error;

pub mod attribution;
pub mod command;
pub mod dns;
pub mod filter;
pub mod lookup;
pub mod whois;

pub use attribution::{attribute, attribute_address, attribute_with, Attribution, AttributionRecord};
pub use command::CommandLookup;
pub use dns::{SuffixRule, DEFAULT_SUFFIX};
pub use error::{ReconError, ReconResult};
pub use filter::{build_filter, FilterExpression};
pub use lookup::{Lookup, LookupService};
pub use whois::RegistryInfo;
