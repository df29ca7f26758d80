use hone_recon::{reconcile, reconcile_with, Bucket, HostMap, LogObserver};

fn hosts(entries: &[(&str, &[&str])]) -> HostMap {
    entries
        .iter()
        .map(|(h, ips)| (h.to_string(), ips.iter().map(|s| s.to_string()).collect()))
        .collect()
}

// -------------------------------------------------------------------------
// Single-host scenarios
// -------------------------------------------------------------------------

#[test]
fn case_insensitive_hostname() {
    let result = reconcile(
        &hosts(&[("Host1", &["10.0.0.1"])]),
        &hosts(&[("host1", &["10.0.0.1"])]),
    );
    assert_eq!(result.ok, hosts(&[("Host1", &["10.0.0.1"])]));
}

#[test]
fn scenario_wrong_ip() {
    let result = reconcile(&hosts(&[("h1", &["10.0.0.1"])]), &hosts(&[("h1", &["10.0.0.9"])]));
    assert_eq!(result.wrong_ip, hosts(&[("h1", &["10.0.0.1"])]));
}

#[test]
fn scenario_wrong_hostname() {
    let result = reconcile(&hosts(&[("h1", &["10.0.0.1"])]), &hosts(&[("h2", &["10.0.0.1"])]));
    assert_eq!(result.wrong_hostname, hosts(&[("h1", &["10.0.0.1"])]));
}

#[test]
fn scenario_missing() {
    let result = reconcile(&hosts(&[("h1", &["10.0.0.1"])]), &hosts(&[("h2", &["10.0.0.2"])]));
    assert_eq!(result.missing, hosts(&[("h1", &["10.0.0.1"])]));
}

#[test]
fn scenario_partial_overlap() {
    let result = reconcile(
        &hosts(&[("h1", &["10.0.0.1", "10.0.0.2"])]),
        &hosts(&[("h1", &["10.0.0.2", "10.0.0.3"])]),
    );
    assert_eq!(result.ok, hosts(&[("h1", &["10.0.0.1", "10.0.0.2"])]));
}

// -------------------------------------------------------------------------
// Inventory-sized run
// -------------------------------------------------------------------------

#[test]
fn mixed_inventory() {
    let expected = hosts(&[
        ("WEB01", &["10.1.0.11"]),
        ("web02", &["10.1.0.12", "2001:db8::12"]),
        ("db01", &["10.1.1.21"]),
        ("db02", &["10.1.1.22"]),
        ("cache01", &["10.1.2.31"]),
        ("legacy", &["10.1.9.99"]),
    ]);
    let actual = hosts(&[
        ("web01", &["10.1.0.11"]),
        ("web02", &["2001:db8::12"]),
        ("db01", &["10.1.1.200"]),
        ("db02-new", &["10.1.1.22"]),
        ("cache01", &["10.1.2.31", "10.1.2.32"]),
        ("unexpected", &["10.1.5.5"]),
    ]);

    let result = reconcile_with(&expected, &actual, &mut LogObserver);

    assert_eq!(result.bucket_of("WEB01"), Some(Bucket::Ok));
    assert_eq!(result.bucket_of("web02"), Some(Bucket::Ok));
    assert_eq!(result.bucket_of("cache01"), Some(Bucket::Ok));
    assert_eq!(result.bucket_of("db01"), Some(Bucket::WrongIp));
    assert_eq!(result.bucket_of("db02"), Some(Bucket::WrongHostname));
    assert_eq!(result.bucket_of("legacy"), Some(Bucket::Missing));
    assert_eq!(result.hostname_matches["db02"].actual_hostname, "db02-new");

    // Observed-only hosts are never reported.
    assert_eq!(result.bucket_of("unexpected"), None);

    let summary = result.summary();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.ok, 3);
    assert_eq!(summary.wrong_ip, 1);
    assert_eq!(summary.wrong_hostname, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.ambiguous, 0);
    assert!(!result.is_clean());
}

#[test]
fn expected_addresses_are_reported_not_observed_ones() {
    let result = reconcile(
        &hosts(&[("db01", &["10.1.1.21", "10.1.1.21"])]),
        &hosts(&[("db01", &["10.1.1.200"])]),
    );
    // Duplicates in the expected list survive untouched.
    assert_eq!(result.wrong_ip["db01"], vec!["10.1.1.21", "10.1.1.21"]);
}

#[test]
fn json_shape() {
    let result = reconcile(
        &hosts(&[("h1", &["10.0.0.1"]), ("h2", &["10.0.0.2"])]),
        &hosts(&[("h1", &["10.0.0.1"]), ("other", &["10.0.0.2"])]),
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["ok"]["h1"][0], "10.0.0.1");
    assert_eq!(json["wrong_hostname"]["h2"][0], "10.0.0.2");
    assert_eq!(json["hostname_matches"]["h2"]["actual_hostname"], "other");
    assert!(json["hostname_matches"]["h2"].get("other_candidates").is_none());
    assert!(json["missing"].as_object().unwrap().is_empty());
}
