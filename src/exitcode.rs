//! Process exit codes, following BSD sysexits.h
//!
//! `check` and `links` exit with [`DATAERR`] when they report problems, so
//! they can gate documentation builds in CI.

/// Bad command line, unknown ToC format
pub const USAGE: i32 = 64;

/// Malformed ToC, lint errors, broken page references, unknown lookup path
pub const DATAERR: i32 = 65;

/// ToC file does not exist
pub const NOINPUT: i32 = 66;

/// Serialization failure
pub const SOFTWARE: i32 = 70;

/// Read or write failed
pub const IOERR: i32 = 74;

/// Unreadable or invalid settings
pub const CONFIG: i32 = 78;
