//! Exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error, e.g. an empty identifier
pub const USAGE: i32 = 64;

/// The response could not be understood
pub const DATAERR: i32 = 65;

/// The credentials file cannot be read
pub const NOINPUT: i32 = 66;

/// The API could not be reached
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// The API answered with an error
pub const PROTOCOL: i32 = 76;

/// No credentials for the API host
pub const NOPERM: i32 = 77;

/// Configuration error
pub const CONFIG: i32 = 78;
