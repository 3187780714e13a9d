//! JSON-lines event log.
//!
//! One serialized [`LogRecord`] per line. Logging never interrupts play: the
//! first failed write closes the log and later records are dropped.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Spawn {
        tick: u64,
        piece: u32,
        axis_color: u8,
        child_color: u8,
    },
    Lock {
        tick: u64,
        piece: u32,
        /// `(x, y, color id)` for axis and child
        cells: [(i8, i8, u8); 2],
        drop_score: u32,
    },
    Chain {
        tick: u64,
        chain: u32,
        erased: usize,
        score: u32,
        all_clear: bool,
    },
    Settled {
        tick: u64,
        chain: u32,
        score: u32,
        total: u64,
    },
    GameOver {
        tick: u64,
        pieces: u32,
        max_chain: u32,
        total: u64,
    },
}

/// Append-only writer for [`LogRecord`]s
#[derive(Debug, Default)]
pub struct EventLog {
    out: Option<BufWriter<File>>,
    buf: Vec<u8>,
    written: u64,
}

impl EventLog {
    /// A log that drops every record
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;

        Ok(Self {
            out: Some(BufWriter::new(file)),
            buf: Vec::with_capacity(256),
            written: 0,
        })
    }

    /// [`EventLog::open`] when a path is configured, disabled otherwise
    pub fn from_path(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::open(p),
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn record(&mut self, record: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).is_err() {
            self.out = None;
            return;
        }
        self.written += 1;
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush().context("failed to flush event log")?;
        }
        Ok(())
    }
}
