// Expected inventory CSV import
//
// Two columns: hostname, ip. First row is a header and is discarded.
// One row per address; a host with several addresses spans several rows.

use std::io::Read;
use std::path::Path;

use hone_recon::{normalize_address, HostMap};

use crate::error::LoadError;

/// Load the expected hostname → addresses map from a CSV file.
pub fn load_expected(path: &Path) -> Result<HostMap, LoadError> {
    let content = read_file_as_utf8(path).map_err(|message| LoadError::Open {
        path: path.to_path_buf(),
        message,
    })?;
    let hosts = load_expected_from_str(&content)?;
    log::debug!("loaded {} expected host(s) from {}", hosts.len(), path.display());
    Ok(hosts)
}

pub fn load_expected_from_str(content: &str) -> Result<HostMap, LoadError> {
    load_expected_from_reader(content.trim_start_matches('\u{feff}').as_bytes())
}

/// Parse expected hosts from any reader. Extra columns are ignored; duplicate
/// (hostname, ip) rows are kept. Addresses are normalized, hostnames are not.
pub fn load_expected_from_reader(reader: impl Read) -> Result<HostMap, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    if reader.headers()?.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut hosts = HostMap::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < 2 {
            return Err(LoadError::MalformedRow { line, columns: record.len() });
        }

        let hostname = &record[0];
        let ip = &record[1];
        match (hostname.is_empty(), ip.is_empty()) {
            (true, true) => continue,
            (true, false) => return Err(LoadError::EmptyField { line, field: "hostname" }),
            (false, true) => return Err(LoadError::EmptyField { line, field: "ip" }),
            (false, false) => {}
        }

        hosts.entry(hostname.to_string()).or_default().push(normalize_address(ip));
    }

    Ok(hosts)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
