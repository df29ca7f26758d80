use crate::model::{ReconResult, ReconSummary};

/// Compute summary counts from a reconciliation result.
pub fn compute_summary(result: &ReconResult) -> ReconSummary {
    ReconSummary {
        total: result.len(),
        ok: result.ok.len(),
        missing: result.missing.len(),
        wrong_ip: result.wrong_ip.len(),
        wrong_hostname: result.wrong_hostname.len(),
        ambiguous: result
            .hostname_matches
            .values()
            .filter(|m| m.is_ambiguous())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HostnameMatch;

    #[test]
    fn summary_counts() {
        let mut result = ReconResult::default();
        result.ok.insert("a".into(), vec!["10.0.0.1".into()]);
        result.ok.insert("b".into(), vec!["10.0.0.2".into()]);
        result.missing.insert("c".into(), vec![]);
        result.wrong_hostname.insert("d".into(), vec!["10.0.0.4".into()]);
        result.hostname_matches.insert(
            "d".into(),
            HostnameMatch {
                actual_hostname: "e".into(),
                address: "10.0.0.4".into(),
                other_candidates: vec!["f".into()],
            },
        );

        let summary = compute_summary(&result);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.wrong_ip, 0);
        assert_eq!(summary.wrong_hostname, 1);
        assert_eq!(summary.ambiguous, 1);
    }
}
