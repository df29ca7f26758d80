//! Classification callbacks.
//!
//! The engine reports each decision to an injected observer instead of
//! logging on its own. All methods default to no-ops.

/// Receives one callback per classification decision.
pub trait ReconObserver {
    /// Hostname found and at least one address shared.
    fn on_ok(&mut self, _hostname: &str, _shared: &[&str]) {}

    /// Hostname found but no address in common.
    fn on_wrong_ip(&mut self, _hostname: &str, _expected: &[String], _actual: &[String]) {}

    /// Hostname absent from the observed set; re-examined in the address pass.
    fn on_deferred(&mut self, _hostname: &str) {}

    /// Address found under another observed hostname.
    fn on_wrong_hostname(&mut self, _hostname: &str, _actual_hostname: &str, _address: &str) {}

    /// More than one observed hostname holds an expected address.
    /// `chosen` won the tie-break; `others` were not used.
    fn on_ambiguous(&mut self, _hostname: &str, _chosen: &str, _others: &[String]) {}

    /// Neither hostname nor any address found.
    fn on_missing(&mut self, _hostname: &str) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ReconObserver for NoopObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ReconObserver for LogObserver {
    fn on_ok(&mut self, hostname: &str, shared: &[&str]) {
        log::info!("hostname and IP found: {hostname} ({})", shared.join(", "));
    }

    fn on_wrong_ip(&mut self, hostname: &str, expected: &[String], actual: &[String]) {
        log::info!(
            "hostname found but IP not found: {hostname} (expected {}, actual {})",
            expected.join(", "),
            actual.join(", "),
        );
    }

    fn on_deferred(&mut self, hostname: &str) {
        log::debug!("hostname not found, searching by address: {hostname}");
    }

    fn on_wrong_hostname(&mut self, hostname: &str, actual_hostname: &str, address: &str) {
        log::info!(
            "IP found but wrong hostname for {address}: actual hostname: {actual_hostname}, expected hostname: {hostname}"
        );
    }

    fn on_ambiguous(&mut self, hostname: &str, chosen: &str, others: &[String]) {
        log::warn!(
            "{hostname}: address also held by {} (using {chosen})",
            others.join(", "),
        );
    }

    fn on_missing(&mut self, hostname: &str) {
        log::info!("missing: {hostname}");
    }
}
