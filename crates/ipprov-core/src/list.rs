//! Plain address lists: one literal per line.

use std::io::BufRead;
use tracing::warn;

use crate::address::Address;

/// Read an address list, keeping input order and duplicates.
///
/// Blank lines and lines starting with `#` are ignored. Lines that are not
/// an address literal, including lines that are not valid UTF-8, are skipped
/// with a warning. Only a failing reader is an error.
pub fn read_address_list<R: BufRead>(input: R) -> crate::Result<Vec<Address>> {
    let mut addresses = Vec::new();
    for (idx, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes?;
        let Ok(line) = std::str::from_utf8(&bytes) else {
            warn!(line = idx + 1, "skipping address list entry that is not UTF-8");
            continue;
        };
        let entry = line.trim();
        if entry.is_empty() || line.starts_with('#') {
            continue;
        }
        match Address::parse(entry) {
            Ok(addr) => addresses.push(addr),
            Err(e) => warn!(line = idx + 1, error = %e, "skipping address list entry"),
        }
    }
    Ok(addresses)
}
