//! Client address handling
//!
//! Normalization of forwarded/transport addresses and the private-range
//! gate used before geolocation lookups.

/// Prefix the socket layer adds to IPv4 peers on dual-stack listeners
const IPV4_MAPPED_PREFIX: &str = "::ffff:";

/// Literal prefixes treated as private. The 172.16/12 block is enumerated
/// segment by segment rather than parsed numerically.
const PRIVATE_PREFIXES: &[&str] = &[
    "10.", "192.168.", "172.16.", "172.17.", "172.18.", "172.19.", "172.20.", "172.21.",
    "172.22.", "172.23.", "172.24.", "172.25.", "172.26.", "172.27.", "172.28.", "172.29.",
    "172.30.", "172.31.",
];

const LOOPBACK_V4: &str = "127.0.0.1";
const LOOPBACK_V6: &str = "::1";

/// Normalize a raw forwarding-header value or transport address.
///
/// Takes the first entry of a comma-separated chain and strips an
/// IPv4-mapped-IPv6 prefix. `None` yields an empty string.
pub fn normalize_address(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let first = match raw.split_once(',') {
        Some((head, _)) => head.trim(),
        None => raw,
    };

    first
        .strip_prefix(IPV4_MAPPED_PREFIX)
        .unwrap_or(first)
        .trim()
        .to_string()
}

/// Whether the address is loopback or inside a private range.
pub fn is_private_address(address: &str) -> bool {
    address == LOOPBACK_V4
        || address == LOOPBACK_V6
        || PRIVATE_PREFIXES
            .iter()
            .any(|prefix| address.starts_with(prefix))
}
