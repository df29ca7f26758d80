//! Results printer: human-readable text and the `--json` document.

use std::fmt::Write;

use serde::Serialize;

use hone_recon::{canonical_hostname, HostMap, ReconResult, ReconSummary};

const RULE: &str = "----";

/// `--json` output. Buckets are flattened to the top level next to the run metadata.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub vrf: i64,
    pub engine_version: &'static str,
    pub run_at: String,
    pub summary: ReconSummary,
    #[serde(flatten)]
    pub result: &'a ReconResult,
}

impl<'a> CheckReport<'a> {
    pub fn new(vrf: i64, result: &'a ReconResult) -> Self {
        Self {
            vrf,
            engine_version: env!("CARGO_PKG_VERSION"),
            run_at: chrono::Utc::now().to_rfc3339(),
            summary: result.summary(),
            result,
        }
    }
}

/// Four sections in fixed order, hosts sorted within each.
pub fn render_text(result: &ReconResult, actual: &HostMap) -> String {
    let observed = |host: &str| -> String {
        actual
            .get(&canonical_hostname(host))
            .map(|ips| ips.join(", "))
            .unwrap_or_default()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "Hosts OK:");
    for (host, ips) in &result.ok {
        let _ = writeln!(
            out,
            "Hostname: {host}, expectedIPs: {}, actualIPs: {}",
            ips.join(", "),
            observed(host),
        );
    }
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "Hosts Missing:");
    for (host, ips) in &result.missing {
        let _ = writeln!(out, "Hostname: {host}, expectedIPs: {}", ips.join(", "));
    }
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "Hostname exists but wrong IP:");
    for (host, ips) in &result.wrong_ip {
        let _ = writeln!(
            out,
            "Hostname: {host}, expectedIPs: {}, actualIPs: {}",
            ips.join(", "),
            observed(host),
        );
    }
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "IP exists but wrong Hostname:");
    for (host, ips) in &result.wrong_hostname {
        let _ = write!(out, "Hostname: {host}, expectedIPs: {}", ips.join(", "));
        if let Some(m) = result.hostname_matches.get(host) {
            let _ = write!(out, ", foundOn: {} ({})", m.actual_hostname, m.address);
            if m.is_ambiguous() {
                let _ = write!(out, ", alsoOn: {}", m.other_candidates.join(", "));
            }
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{RULE}");

    out
}

/// One-line summary for stderr.
pub fn summary_line(summary: &ReconSummary) -> String {
    let mut line = format!(
        "{} expected host(s): {} ok, {} missing, {} wrong IP, {} wrong hostname",
        summary.total, summary.ok, summary.missing, summary.wrong_ip, summary.wrong_hostname,
    );
    if summary.ambiguous > 0 {
        let _ = write!(line, " ({} ambiguous)", summary.ambiguous);
    }
    line
}
