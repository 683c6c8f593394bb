//! # ipprov-cli
//!
//! Command-line interface for DNS provenance analysis.
//!
//! ## Commands
//!
//! - **hardcoded**: list addresses from a connection log that never appeared
//!   in a DNS log, minus private, multicast, unspecified and ignored ones
//! - **classify**: PTR and WHOIS attribution for an address list, plus a BPF
//!   filter for addresses whose PTR names end with a provider suffix
//! - **config**: show the effective configuration and where it lives

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
