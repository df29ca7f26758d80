use hone_config::ApiSettings;
use hone_sensor_client::{fetch_actual, CollectionError, SensorClient};
use httpmock::prelude::*;

// ── Mock helpers ────────────────────────────────────────────────────

fn settings(server: &MockServer, page_size: u32) -> ApiSettings {
    ApiSettings {
        endpoint: server.base_url(),
        key: "test-key".into(),
        secret: "test-secret".into(),
        page_size,
        ..ApiSettings::default()
    }
}

fn mock_agent(host: &str, ifaces: &[(&str, i64)]) -> serde_json::Value {
    let interfaces: Vec<serde_json::Value> = ifaces
        .iter()
        .map(|(ip, vrf)| {
            serde_json::json!({
                "name": "eth0",
                "ip": ip,
                "vrf_id": vrf,
                "vrf": "Default",
                "family_type": if ip.contains(':') { "IPV6" } else { "IPV4" },
                "mac": "00:50:56:aa:bb:cc"
            })
        })
        .collect();
    serde_json::json!({
        "host_name": host,
        "uuid": format!("uuid-{host}"),
        "agent_type": "ENFORCER",
        "platform": "CentOS-7.9",
        "interfaces": interfaces
    })
}

fn sensors_page(items: Vec<serde_json::Value>, offset: Option<&str>) -> serde_json::Value {
    let mut resp = serde_json::json!({ "results": items });
    if let Some(token) = offset {
        resp["offset"] = serde_json::Value::String(token.to_string());
    }
    resp
}

// ── Test: Pagination across 2 pages ─────────────────────────────────

#[test]
fn test_pagination_two_pages() {
    let server = MockServer::start();

    let page1_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param("limit", "2")
            .query_param_missing("offset")
            .header("Id", "test-key")
            .header_exists("Timestamp")
            .header_exists("Authorization");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(sensors_page(
                vec![
                    mock_agent("web01", &[("10.0.0.1", 1)]),
                    mock_agent("web02", &[("10.0.0.2", 1)]),
                ],
                Some("page2"),
            ));
    });

    let page2_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param("offset", "page2");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(sensors_page(vec![mock_agent("db01", &[("10.0.1.1", 1)])], None));
    });

    let client = SensorClient::new(&settings(&server, 2)).unwrap();
    let agents = client.list_agents().unwrap();

    page1_mock.assert();
    page2_mock.assert();
    assert_eq!(agents.len(), 3);
    assert_eq!(agents[0].host_name, "web01");
    assert_eq!(agents[2].host_name, "db01");
    assert_eq!(agents[2].interfaces[0].ip, "10.0.1.1");
}

// ── Test: Flattening for a routing domain ───────────────────────────

#[test]
fn test_fetch_actual_filters_vrf() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/openapi/v1/sensors");
        then.status(200).json_body(sensors_page(
            vec![
                mock_agent("WEB01", &[("10.0.0.1", 1), ("127.0.0.1", 1), ("172.16.0.1", 7)]),
                mock_agent("mgmt01", &[("172.16.0.2", 7)]),
                mock_agent("db01", &[("::1", 1), ("2001:db8::21", 1)]),
            ],
            None,
        ));
    });

    let hosts = fetch_actual(&settings(&server, 500), 1).unwrap();
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts["web01"], vec!["10.0.0.1"]);
    assert_eq!(hosts["db01"], vec!["2001:db8::21"]);

    let hosts = fetch_actual(&settings(&server, 500), 7).unwrap();
    assert_eq!(hosts.keys().collect::<Vec<_>>(), vec!["mgmt01", "web01"]);
}

// ── Test: Auth failure ──────────────────────────────────────────────

#[test]
fn test_auth_failure() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/openapi/v1/sensors");
        then.status(403)
            .json_body(serde_json::json!({ "error": "Invalid API key" }));
    });

    let client = SensorClient::new(&settings(&server, 500)).unwrap();
    match client.list_agents().unwrap_err() {
        CollectionError::Auth(status, msg) => {
            assert_eq!(status, 403);
            assert_eq!(msg, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Test: Upstream error is not retried ─────────────────────────────

#[test]
fn test_server_error() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/openapi/v1/sensors");
        then.status(500).body("internal error");
    });

    let client = SensorClient::new(&settings(&server, 500)).unwrap();
    let err = client.list_agents().unwrap_err();
    mock.assert();
    assert!(matches!(err, CollectionError::Http(500, ref msg) if msg == "internal error"));
    assert!(err.to_string().contains("HTTP 500"));
}

// ── Test: Malformed payload ─────────────────────────────────────────

#[test]
fn test_malformed_json() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/openapi/v1/sensors");
        then.status(200)
            .header("content-type", "application/json")
            .body("<html>maintenance</html>");
    });

    let client = SensorClient::new(&settings(&server, 500)).unwrap();
    match client.list_agents().unwrap_err() {
        CollectionError::Parse(msg) => assert!(msg.contains("maintenance")),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Test: Stuck pagination ──────────────────────────────────────────

#[test]
fn test_pagination_must_advance() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param_missing("offset");
        then.status(200)
            .json_body(sensors_page(vec![mock_agent("a", &[("10.0.0.1", 1)])], Some("same")));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param("offset", "same");
        then.status(200)
            .json_body(sensors_page(vec![mock_agent("b", &[("10.0.0.2", 1)])], Some("same")));
    });

    let client = SensorClient::new(&settings(&server, 1)).unwrap();
    assert!(matches!(client.list_agents().unwrap_err(), CollectionError::Parse(_)));
}

#[test]
fn test_pagination_cycle_is_rejected() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param_missing("offset");
        then.status(200)
            .json_body(sensors_page(vec![mock_agent("a", &[("10.0.0.1", 1)])], Some("A")));
    });
    let page_a = server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param("offset", "A");
        then.status(200)
            .json_body(sensors_page(vec![mock_agent("b", &[("10.0.0.2", 1)])], Some("B")));
    });
    let page_b = server.mock(|when, then| {
        when.method(GET)
            .path("/openapi/v1/sensors")
            .query_param("offset", "B");
        then.status(200)
            .json_body(sensors_page(vec![mock_agent("c", &[("10.0.0.3", 1)])], Some("A")));
    });

    let client = SensorClient::new(&settings(&server, 1)).unwrap();
    match client.list_agents().unwrap_err() {
        CollectionError::Parse(msg) => assert!(msg.contains("offset A")),
        other => panic!("unexpected error: {other:?}"),
    }
    page_a.assert_hits(1);
    page_b.assert_hits(1);
}

// ── Test: Unreachable endpoint ──────────────────────────────────────

#[test]
fn test_network_error() {
    let settings = ApiSettings {
        // Port 9 (discard) on localhost: nothing listens in CI.
        endpoint: "http://127.0.0.1:9".into(),
        key: "k".into(),
        secret: "s".into(),
        timeout_secs: 5,
        ..ApiSettings::default()
    };
    let client = SensorClient::new(&settings).unwrap();
    assert!(matches!(client.list_agents().unwrap_err(), CollectionError::Network(_)));
}
