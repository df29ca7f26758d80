//! OpenAPI request signing.
//!
//! Every request carries the key id, a UTC timestamp, and an HMAC-SHA256
//! signature over:
//!
//! ```text
//! METHOD \n PATH?QUERY \n CHECKSUM \n CONTENT-TYPE \n TIMESTAMP \n
//! ```
//!
//! CHECKSUM is the hex SHA-256 of the body, empty for bodiless requests.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::client::CollectionError;

pub(crate) const CONTENT_TYPE: &str = "application/json";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+0000";

type HmacSha256 = Hmac<Sha256>;

/// Header values for one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub id: String,
    pub timestamp: String,
    pub authorization: String,
}

/// Sign a bodiless request at the current time.
pub(crate) fn sign_now(
    key: &str,
    secret: &str,
    method: &str,
    path_and_query: &str,
) -> Result<SignedHeaders, CollectionError> {
    let timestamp = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();
    sign_request(key, secret, method, path_and_query, "", &timestamp)
}

/// Compute the signature headers for a request.
pub fn sign_request(
    key: &str,
    secret: &str,
    method: &str,
    path_and_query: &str,
    checksum: &str,
    timestamp: &str,
) -> Result<SignedHeaders, CollectionError> {
    let message = format!(
        "{}\n{}\n{}\n{}\n{}\n",
        method.to_uppercase(),
        path_and_query,
        checksum,
        CONTENT_TYPE,
        timestamp,
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CollectionError::Client(format!("invalid signing key: {e}")))?;
    mac.update(message.as_bytes());
    let authorization =
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    Ok(SignedHeaders {
        id: key.to_string(),
        timestamp: timestamp.to_string(),
        authorization,
    })
}
