//! Replay of the server log into the pool.
//!
//! The log is read one line at a time with a single reused buffer, so
//! memory stays bounded by the pool, the marker list and the longest line.
//! Each PUT line is parsed into a [`PutRecord`] and applied in file order;
//! later records for the same identifier overwrite earlier ones.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`, and every terminator is handed
//! to the parser as a single `\n`.  Bytes that are not UTF-8 abort the run.

use std::io::{self, BufRead};

use log::{debug, info, warn};

use crate::config::{LineEnding, MarkerPolicy};
use crate::error::{Error, Result};
use crate::log_line::parse_put_line;
use crate::markers::BrokenMarkers;
use crate::pool::Pool;
use crate::types::{PutRecord, Summary};

pub struct Reconciler {
    policy: MarkerPolicy,
    line_ending: LineEnding,
}

impl Reconciler {
    pub fn new(policy: MarkerPolicy, line_ending: LineEnding) -> Self {
        Self {
            policy,
            line_ending,
        }
    }

    /// Apply every PUT line from `reader` to `pool`.
    ///
    /// Stops at the first malformed PUT line; the pool may then hold a
    /// partial result and must not be emitted.
    pub fn run<R: BufRead>(
        &self,
        pool: &mut Pool,
        markers: &BrokenMarkers,
        mut reader: R,
    ) -> Result<Summary> {
        let mut summary = Summary::default();
        let mut bytes = Vec::new();
        let mut buf = String::new();

        loop {
            let line_no = summary.lines + 1;
            let read = read_text_line(&mut reader, &mut bytes, &mut buf)
                .map_err(|source| Error::ReadLog {
                    line: line_no,
                    source,
                })?;
            if read == 0 {
                break;
            }
            summary.lines = line_no;

            let Some(record) = parse_put_line(line_no, &buf, self.line_ending)? else {
                continue;
            };
            summary.put_lines += 1;
            self.apply(pool, markers, record, &mut summary);
        }

        info!(
            "Processed {} log lines: {} PUT, {} updated, {} broken ({} skipped)",
            summary.lines,
            summary.put_lines,
            summary.updated,
            summary.broken_matches,
            summary.skipped
        );
        Ok(summary)
    }

    fn apply(
        &self,
        pool: &mut Pool,
        markers: &BrokenMarkers,
        record: PutRecord,
        summary: &mut Summary,
    ) {
        if markers.is_broken(&record.id) {
            summary.broken_matches += 1;
            match self.policy {
                MarkerPolicy::AlwaysUpdate => {
                    warn!("{} has a broken marker, updating anyway", record.id);
                }
                MarkerPolicy::SkipBroken => {
                    warn!("Skipping {}: broken marker present", record.id);
                    summary.skipped += 1;
                    return;
                }
            }
        }

        debug!("{} -> {}", record.id, record.ip);
        pool.insert(&record.id, &record.ip);
        summary.updated += 1;
    }
}

/// Read one line into `line`, with its terminator normalized to `\n`.
///
/// Returns the length of `line`; zero only at end of input.
fn read_text_line<R: BufRead>(
    reader: &mut R,
    bytes: &mut Vec<u8>,
    line: &mut String,
) -> io::Result<usize> {
    bytes.clear();
    line.clear();

    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }
        let eol_at = available.iter().position(|&b| b == b'\n' || b == b'\r');
        match eol_at {
            Some(pos) => {
                let eol = available[pos];
                bytes.extend_from_slice(&available[..pos]);
                bytes.push(b'\n');
                reader.consume(pos + 1);
                if eol == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                break;
            }
            None => {
                let len = available.len();
                bytes.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }

    let text = std::str::from_utf8(&bytes[..])
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    line.push_str(text);
    Ok(line.len())
}
