//! Trace file loading and parsing.
//!
//! One trace file per core, named `<prefix>_proc<N>.trace`. Each line holds a
//! single `R`/`r`/`W`/`w` operation character, whitespace, and a 32-bit hex
//! address with or without a `0x` prefix. A missing file yields an empty
//! stream; the first malformed line is reported and ends the stream at the
//! point of error. The simulator treats an ended stream as a finished core.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::common::addr::Addr;
use crate::common::data::{MemOp, TraceEntry};
use crate::common::error::SimError;

/// Returns the trace file path for `core_id` under the given prefix.
pub fn trace_path(prefix: &str, core_id: usize) -> PathBuf {
    PathBuf::from(format!("{}_proc{}.trace", prefix, core_id))
}

/// Streaming reader over one core's memory trace.
pub struct TraceReader {
    path: String,
    lines: Option<Lines<BufReader<File>>>,
    line_no: u64,
}

impl TraceReader {
    /// Opens `path`. A file that cannot be opened is reported and read as
    /// empty, so the owning core finishes immediately.
    pub fn open(path: &Path) -> Self {
        let display = path.display().to_string();
        let lines = match File::open(path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(err) => {
                log::warn!("cannot open trace file {}: {}; treating as empty", display, err);
                None
            }
        };
        Self {
            path: display,
            lines,
            line_no: 0,
        }
    }

    /// Returns the next parsed entry, or `None` at end of stream.
    ///
    /// The first I/O failure or malformed line is logged and ends the
    /// stream; subsequent calls keep returning `None`.
    pub fn next_entry(&mut self) -> Option<TraceEntry> {
        let lines = self.lines.as_mut()?;
        let line = match lines.next()? {
            Ok(line) => line,
            Err(err) => {
                log::warn!("error reading {}: {}; ending trace", self.path, err);
                self.lines = None;
                return None;
            }
        };
        self.line_no += 1;

        match parse_line(&line) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                let err = SimError::Trace {
                    path: self.path.clone(),
                    line: self.line_no,
                    reason,
                };
                log::warn!("{}; ending trace", err);
                self.lines = None;
                None
            }
        }
    }
}

/// Parses one `<op> <hex-address>` trace line.
fn parse_line(line: &str) -> Result<TraceEntry, String> {
    let mut parts = line.split_whitespace();
    let op_token = parts.next().ok_or_else(|| "empty line".to_string())?;
    let addr_token = parts
        .next()
        .ok_or_else(|| "missing address field".to_string())?;

    let op = match op_token {
        "R" | "r" => MemOp::Read,
        "W" | "w" => MemOp::Write,
        other => return Err(format!("unknown operation '{}'", other)),
    };

    let digits = addr_token
        .strip_prefix("0x")
        .or_else(|| addr_token.strip_prefix("0X"))
        .unwrap_or(addr_token);
    let addr = u32::from_str_radix(digits, 16)
        .map_err(|err| format!("bad address '{}': {}", addr_token, err))?;

    Ok(TraceEntry {
        op,
        addr: Addr(addr),
    })
}
