//! Readers for the DNS-observation and connection-observation logs.
//!
//! Both logs are comma-delimited with no header. Multi-valued answer fields
//! are quoted, e.g. `1700000000,example.com,"93.184.216.34,93.184.216.35",`.
//! A malformed token is dropped on its own; the rest of its row still counts.
//! A row too short to hold the first designated field is dropped whole.

use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, info};

use crate::address::Address;

/// Set of distinct addresses built from one log.
pub type AddressSet = HashSet<Address>;

/// Column holding A-record answers in the DNS log.
pub const DNS_A_FIELD: usize = 2;
/// Column holding AAAA-record answers in the DNS log.
pub const DNS_AAAA_FIELD: usize = 3;
/// Column holding the source address in the connection log.
pub const CONN_SRC_FIELD: usize = 1;
/// Column holding the destination address in the connection log.
pub const CONN_DST_FIELD: usize = 2;

/// The answer fields of one DNS-observation row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// Parsed A-record answers
    pub a: Vec<Address>,
    /// Parsed AAAA-record answers
    pub aaaa: Vec<Address>,
}

impl ResolutionRecord {
    /// Extract the answer fields, or `None` if the row has no A column.
    pub fn from_row(row: &ByteRecord) -> Option<Self> {
        if row.len() <= DNS_A_FIELD {
            return None;
        }
        Some(Self {
            a: parse_list(row.get(DNS_A_FIELD)),
            aaaa: parse_list(row.get(DNS_AAAA_FIELD)),
        })
    }

    /// All answers, A first.
    pub fn addresses(self) -> impl Iterator<Item = Address> {
        self.a.into_iter().chain(self.aaaa)
    }
}

/// The endpoint fields of one connection-observation row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub source: Option<Address>,
    pub destination: Option<Address>,
}

impl ConnectionRecord {
    /// Extract the endpoints, or `None` if the row has no source column.
    pub fn from_row(row: &ByteRecord) -> Option<Self> {
        if row.len() <= CONN_SRC_FIELD {
            return None;
        }
        Some(Self {
            source: parse_single(row.get(CONN_SRC_FIELD)),
            destination: parse_single(row.get(CONN_DST_FIELD)),
        })
    }

    pub fn addresses(self) -> impl Iterator<Item = Address> {
        self.source.into_iter().chain(self.destination)
    }
}

/// Collect every address produced by DNS resolution.
pub fn read_resolved<R: Read>(input: R) -> crate::Result<AddressSet> {
    let resolved = fold_rows(
        input,
        "dns",
        ResolutionRecord::from_row,
        ResolutionRecord::addresses,
    )?;
    info!(count = resolved.len(), "resolved addresses loaded");
    Ok(resolved)
}

/// Collect every source and destination address seen in connections.
pub fn read_observed<R: Read>(input: R) -> crate::Result<AddressSet> {
    let observed = fold_rows(
        input,
        "connections",
        ConnectionRecord::from_row,
        ConnectionRecord::addresses,
    )?;
    info!(count = observed.len(), "observed addresses loaded");
    Ok(observed)
}

fn fold_rows<R, T, I>(
    input: R,
    log: &'static str,
    extract: fn(&ByteRecord) -> Option<T>,
    addresses: fn(T) -> I,
) -> crate::Result<AddressSet>
where
    R: Read,
    I: Iterator<Item = Address>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut set = AddressSet::new();
    let mut row = ByteRecord::new();
    let mut line = 0u64;
    while reader.read_byte_record(&mut row)? {
        line += 1;
        match extract(&row) {
            Some(record) => set.extend(addresses(record)),
            None => debug!(log, line, fields = row.len(), "skipping short row"),
        }
    }
    Ok(set)
}

fn parse_single(field: Option<&[u8]>) -> Option<Address> {
    let token = std::str::from_utf8(field?).ok()?.trim();
    if token.is_empty() {
        return None;
    }
    match Address::parse(token) {
        Ok(addr) => Some(addr),
        Err(e) => {
            debug!(error = %e, "skipping malformed token");
            None
        }
    }
}

fn parse_list(field: Option<&[u8]>) -> Vec<Address> {
    let Some(text) = field.and_then(|f| std::str::from_utf8(f).ok()) else {
        return Vec::new();
    };
    text.split(',')
        .filter_map(|token| parse_single(Some(token.as_bytes())))
        .collect()
}
