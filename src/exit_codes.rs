//! Exit code constants for the scoop CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input)
//! - 2: Validation failure (round-trip drift, invalid prompt)
//! - 3: Store failure (persistence collaborator)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or malformed input files.
pub const USER_ERROR: i32 = 1;

/// Validation failure: round-trip drift or a prompt the validator rejected.
pub const VALIDATION_FAILURE: i32 = 2;

/// Store failure: a prompt record could not be read from or written to the store.
pub const STORE_FAILURE: i32 = 3;
