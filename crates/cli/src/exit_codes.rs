//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain     | Description                                       |
//! |------|------------|---------------------------------------------------|
//! | 0    | Universal  | Success                                           |
//! | 1    | Universal  | General error (unspecified)                       |
//! | 2    | Universal  | CLI usage error (bad args)                        |
//! | 3    | load       | Expected inventory unreadable or malformed        |
//! | 4    | config     | Missing or invalid configuration                  |
//! | 5    | collect    | Monitoring API unreachable or bad response        |
//! | 6    | collect    | Monitoring API rejected the credentials           |
//! | 7    | check      | Hosts not ok (only with `--strict`)               |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use hone_sensor_client::CollectionError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Inputs (3-6)
// =============================================================================

/// Expected-hosts CSV could not be opened or has a malformed row.
pub const EXIT_LOAD: u8 = 3;

/// Config file missing, unparseable, or lacking credentials/endpoint.
pub const EXIT_CONFIG: u8 = 4;

/// Transport failure, non-2xx status, or malformed agents payload.
pub const EXIT_COLLECT: u8 = 5;

/// HTTP 401/403 from the monitoring API.
pub const EXIT_COLLECT_AUTH: u8 = 6;

// =============================================================================
// Check (7)
// =============================================================================

/// At least one expected host is missing, has the wrong IP, or sits under
/// another hostname. Only returned with `--strict`.
pub const EXIT_MISMATCH: u8 = 7;

/// Map a collection failure to its exit code.
pub fn collection_exit_code(err: &CollectionError) -> u8 {
    match err {
        CollectionError::Auth(..) => EXIT_COLLECT_AUTH,
        CollectionError::Http(..)
        | CollectionError::Network(_)
        | CollectionError::Parse(_)
        | CollectionError::Client(_) => EXIT_COLLECT,
    }
}
