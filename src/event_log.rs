//! JSON-lines session event log.
//!
//! One object per line: `{"seq":3,"t_ms":1450,"type":"locked","piece":"T","hard_drop":true}`.
//! `t_ms` is session time (paused intervals excluded).

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    Started,
    Spawned {
        piece: &'static str,
    },
    Held {
        piece: &'static str,
        swapped_in: Option<&'static str>,
    },
    Locked {
        piece: &'static str,
        hard_drop: bool,
    },
    LinesCleared {
        lines: u32,
        points: u32,
        all_clear: bool,
        level: u32,
    },
    Paused,
    Resumed,
    GameOver {
        score: u32,
    },
}

impl From<SessionEvent> for EventPayload {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::Started => EventPayload::Started,
            SessionEvent::Spawned { kind } => EventPayload::Spawned {
                piece: kind.as_str(),
            },
            SessionEvent::Held { kind, swapped_in } => EventPayload::Held {
                piece: kind.as_str(),
                swapped_in: swapped_in.map(|k| k.as_str()),
            },
            SessionEvent::Locked { kind, hard_drop } => EventPayload::Locked {
                piece: kind.as_str(),
                hard_drop,
            },
            SessionEvent::LinesCleared {
                lines,
                points,
                all_clear,
                level,
            } => EventPayload::LinesCleared {
                lines,
                points,
                all_clear,
                level,
            },
            SessionEvent::Paused => EventPayload::Paused,
            SessionEvent::Resumed => EventPayload::Resumed,
            SessionEvent::GameOver { score } => EventPayload::GameOver { score },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    pub t_ms: u64,
    #[serde(flatten)]
    pub event: EventPayload,
}

pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    seq: u64,
}

impl EventLog<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: cannot open {}", path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            seq: 0,
        }
    }

    /// Records written so far
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    pub fn record(&mut self, t_ms: u64, event: SessionEvent) -> Result<()> {
        let record = EventRecord {
            seq: self.seq,
            t_ms,
            event: event.into(),
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.seq += 1;
        Ok(())
    }

    pub fn record_all(
        &mut self,
        t_ms: u64,
        events: impl IntoIterator<Item = SessionEvent>,
    ) -> Result<()> {
        for event in events {
            self.record(t_ms, event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
