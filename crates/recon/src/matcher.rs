use std::collections::{BTreeSet, HashSet};
use std::net::IpAddr;

/// Canonical text form of an address literal (IPv6 compressed and
/// lower-cased, IPv4-mapped IPv6 rendered as plain IPv4). Anything that does
/// not parse as an IP is returned trimmed.
///
/// The engine compares literals; collaborators call this before handing
/// their maps over.
pub fn normalize_address(addr: &str) -> String {
    let trimmed = addr.trim();
    match trimmed.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        Ok(ip) => ip.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Addresses present in both sequences. Exact string equality; order and
/// duplicates in either input are irrelevant.
pub fn shared_addresses<'a>(expected: &'a [String], actual: &[String]) -> BTreeSet<&'a str> {
    let actual: HashSet<&str> = actual.iter().map(String::as_str).collect();
    expected
        .iter()
        .map(String::as_str)
        .filter(|addr| actual.contains(addr))
        .collect()
}

/// First expected address (in expected order) that the actual sequence also holds.
pub fn first_shared_address<'a>(expected: &'a [String], actual: &[String]) -> Option<&'a str> {
    expected
        .iter()
        .map(String::as_str)
        .find(|addr| actual.iter().any(|a| a == addr))
}
