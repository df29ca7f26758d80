use crate::matcher::{first_shared_address, shared_addresses};
use crate::model::{canonical_hostname, Bucket, HostMap, HostnameMatch, ReconResult};
use crate::observer::{NoopObserver, ReconObserver};

/// Classify every expected hostname against the observed inventory.
pub fn reconcile(expected: &HostMap, actual: &HostMap) -> ReconResult {
    reconcile_with(expected, actual, &mut NoopObserver)
}

/// Same as [`reconcile`], reporting each decision to `observer`.
///
/// Pass 1 looks each expected hostname up by canonical name: a shared
/// address makes it `ok`, none makes it `wrong_ip`. Hostnames not found are
/// deferred to pass 2, which scans the observed hosts in ascending canonical
/// order for any shared address: the first hit makes it `wrong_hostname`,
/// no hit makes it `missing`.
pub fn reconcile_with(
    expected: &HostMap,
    actual: &HostMap,
    observer: &mut dyn ReconObserver,
) -> ReconResult {
    let actual = canonical_index(actual);
    let mut result = ReconResult::default();
    let mut host_not_found: Vec<(&String, &Vec<String>)> = Vec::new();

    // Pass 1: direct hostname match
    for (hostname, addrs) in expected {
        let Some(observed) = actual.get(&canonical_hostname(hostname)) else {
            observer.on_deferred(hostname);
            host_not_found.push((hostname, addrs));
            continue;
        };

        let shared = shared_addresses(addrs, observed);
        let bucket = if shared.is_empty() {
            observer.on_wrong_ip(hostname, addrs, observed);
            Bucket::WrongIp
        } else {
            let shared: Vec<&str> = shared.into_iter().collect();
            observer.on_ok(hostname, &shared);
            Bucket::Ok
        };
        result.bucket_mut(bucket).insert(hostname.clone(), addrs.clone());
    }

    // Pass 2: search the deferred hosts' addresses under other hostnames
    for (hostname, addrs) in host_not_found {
        match find_by_address(addrs, &actual) {
            Some(found) => {
                observer.on_wrong_hostname(hostname, &found.actual_hostname, &found.address);
                if found.is_ambiguous() {
                    observer.on_ambiguous(hostname, &found.actual_hostname, &found.other_candidates);
                }
                result.wrong_hostname.insert(hostname.clone(), addrs.clone());
                result.hostname_matches.insert(hostname.clone(), found);
            }
            None => {
                observer.on_missing(hostname);
                result.missing.insert(hostname.clone(), addrs.clone());
            }
        }
    }

    result
}

/// Observed hosts keyed by canonical hostname. Keys that differ only by case
/// are merged.
fn canonical_index(actual: &HostMap) -> HostMap {
    let mut index = HostMap::new();
    for (hostname, addrs) in actual {
        index
            .entry(canonical_hostname(hostname))
            .or_default()
            .extend(addrs.iter().cloned());
    }
    index
}

/// First observed host (in index order) holding any of `addrs`, plus every
/// later host that also does.
fn find_by_address(addrs: &[String], actual: &HostMap) -> Option<HostnameMatch> {
    let mut found: Option<HostnameMatch> = None;

    for (actual_hostname, observed) in actual {
        let Some(address) = first_shared_address(addrs, observed) else {
            continue;
        };
        match found.as_mut() {
            None => {
                found = Some(HostnameMatch {
                    actual_hostname: actual_hostname.clone(),
                    address: address.to_string(),
                    other_candidates: Vec::new(),
                });
            }
            Some(m) => m.other_candidates.push(actual_hostname.clone()),
        }
    }

    found
}
