//! Data structures shared by the rebuild pipeline.
//!
//! A PUT record is what survives of a server log line once it has been
//! split: the identifier that was uploaded and the client address that
//! uploaded it.  Records are applied to the pool in file order, so the
//! last record for an identifier wins.

/// One upload observed in the server log.
///
/// The server logs `PUT <ip>:<port> : <id>`; `id` is the fourth
/// space-separated field and `ip` is the second field up to its first
/// colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecord {
    pub id: String,
    pub ip: String,
}

/// Counters collected over one pass of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Lines read from the log, PUT or not.
    pub lines: usize,
    pub put_lines: usize,
    /// Assignments made into the pool.
    pub updated: usize,
    /// PUT lines whose identifier had a broken marker.
    pub broken_matches: usize,
    /// Assignments withheld because of a broken marker.
    pub skipped: usize,
}
