//! Registry (WHOIS) response parsing.

use serde::{Deserialize, Serialize};

/// Ownership fields pulled from a registry response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryInfo {
    /// `OrgName` (ARIN) or `org-name` (RIPE)
    pub organization: Option<String>,
    /// `NetName` / `netname`
    pub network: Option<String>,
}

impl RegistryInfo {
    const fn is_complete(&self) -> bool {
        self.organization.is_some() && self.network.is_some()
    }
}

/// Parse `key: value` lines of a registry response.
///
/// Keys are matched case-insensitively on the text before the first colon.
/// The first non-empty value for each field wins; later records in a
/// referral chain do not override it. Scanning stops once both are known.
#[must_use]
pub fn parse_whois_response(raw: &str) -> RegistryInfo {
    let mut info = RegistryInfo::default();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim().to_lowercase().as_str() {
            "orgname" | "org-name" if info.organization.is_none() => {
                info.organization = Some(value.to_string());
            }
            "netname" if info.network.is_none() => info.network = Some(value.to_string()),
            _ => {}
        }

        if info.is_complete() {
            break;
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARIN: &str = "\
#
# ARIN WHOIS data and services are subject to the Terms of Use
#

NetRange:       93.184.216.0 - 93.184.216.255
CIDR:           93.184.216.0/24
NetName:        EDGECAST-NETBLK-03
NetHandle:      NET-93-184-216-0-1

OrgName:        Example Corp
OrgId:          EXAMP-1

OrgName:        Second Org
NetName:        LATER-NET
";

    #[test]
    fn test_first_match_wins() {
        let info = parse_whois_response(ARIN);
        assert_eq!(info.organization.as_deref(), Some("Example Corp"));
        assert_eq!(info.network.as_deref(), Some("EDGECAST-NETBLK-03"));
    }

    #[test]
    fn test_ripe_style_keys() {
        let raw = "% RIPE\ninetnum: 185.0.0.0 - 185.0.0.255\nnetname:        EXAMPLE-NET\norg-name:       Example GmbH\n";
        let info = parse_whois_response(raw);
        assert_eq!(info.organization.as_deref(), Some("Example GmbH"));
        assert_eq!(info.network.as_deref(), Some("EXAMPLE-NET"));
    }

    #[test]
    fn test_empty_values_do_not_claim_field() {
        let raw = "OrgName:\nNetName:   \nOrgName: Filled Later\nnetname: net-2\n";
        let info = parse_whois_response(raw);
        assert_eq!(info.organization.as_deref(), Some("Filled Later"));
        assert_eq!(info.network.as_deref(), Some("net-2"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let info = parse_whois_response("OrgName: Example: Networks Division\n");
        assert_eq!(info.organization.as_deref(), Some("Example: Networks Division"));
        assert_eq!(info.network, None);
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(parse_whois_response(""), RegistryInfo::default());
        assert_eq!(parse_whois_response("no colons here\n"), RegistryInfo::default());
    }
}
