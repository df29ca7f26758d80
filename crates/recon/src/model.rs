use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Hostname → IP address literals.
///
/// Used for the expected set, the observed set and every result bucket.
/// Ordered so that iteration (and the wrong-hostname tie-break) is stable.
pub type HostMap = BTreeMap<String, Vec<String>>;

/// Lower-cased hostname used for every hostname comparison.
pub fn canonical_hostname(hostname: &str) -> String {
    hostname.to_lowercase()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Ok,
    Missing,
    WrongIp,
    WrongHostname,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Self::Ok, Self::Missing, Self::WrongIp, Self::WrongHostname];
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Missing => write!(f, "missing"),
            Self::WrongIp => write!(f, "wrong_ip"),
            Self::WrongHostname => write!(f, "wrong_hostname"),
        }
    }
}

/// Where the address of a wrong-hostname entry was actually found.
///
/// `actual_hostname` is the first observed host (ascending canonical order)
/// sharing an address; `other_candidates` are the later ones that also did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostnameMatch {
    pub actual_hostname: String,
    pub address: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_candidates: Vec<String>,
}

impl HostnameMatch {
    pub fn is_ambiguous(&self) -> bool {
        !self.other_candidates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total: usize,
    pub ok: usize,
    pub missing: usize,
    pub wrong_ip: usize,
    pub wrong_hostname: usize,
    pub ambiguous: usize,
}

/// Partition of the expected hostnames into four disjoint buckets.
///
/// Bucket keys keep the caller's spelling of the expected hostname; values
/// are the expected addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconResult {
    pub ok: HostMap,
    pub missing: HostMap,
    pub wrong_ip: HostMap,
    pub wrong_hostname: HostMap,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub hostname_matches: BTreeMap<String, HostnameMatch>,
}

impl ReconResult {
    pub fn bucket(&self, bucket: Bucket) -> &HostMap {
        match bucket {
            Bucket::Ok => &self.ok,
            Bucket::Missing => &self.missing,
            Bucket::WrongIp => &self.wrong_ip,
            Bucket::WrongHostname => &self.wrong_hostname,
        }
    }

    pub(crate) fn bucket_mut(&mut self, bucket: Bucket) -> &mut HostMap {
        match bucket {
            Bucket::Ok => &mut self.ok,
            Bucket::Missing => &mut self.missing,
            Bucket::WrongIp => &mut self.wrong_ip,
            Bucket::WrongHostname => &mut self.wrong_hostname,
        }
    }

    /// Bucket holding `hostname` (exact expected spelling).
    pub fn bucket_of(&self, hostname: &str) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.bucket(*b).contains_key(hostname))
    }

    /// Number of classified expected hostnames.
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every expected host was found with a matching address.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.wrong_ip.is_empty() && self.wrong_hostname.is_empty()
    }

    pub fn summary(&self) -> ReconSummary {
        crate::evidence::compute_summary(self)
    }
}
