//! `hone-recon`: expected-vs-observed host inventory reconciliation.
//!
//! Pure engine crate: receives two hostname → address maps, returns the
//! expected hostnames partitioned into four buckets.
//! No CLI, IO or network dependencies.

pub mod engine;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod observer;

pub use engine::{reconcile, reconcile_with};
pub use matcher::normalize_address;
pub use model::{canonical_hostname, Bucket, HostMap, HostnameMatch, ReconResult, ReconSummary};
pub use observer::{LogObserver, NoopObserver, ReconObserver};
