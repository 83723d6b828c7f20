use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use crate::{format::format_timestamp, types::SearchHit};

/// Receives every formatted timestamp shown to the user after a search.
pub trait TimestampSink {
    fn record(&mut self, timestamp: &str) -> io::Result<()>;
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopSink;

impl TimestampSink for NoopSink {
    fn record(&mut self, _timestamp: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Appends one timestamp per line, creating the file if needed.
pub struct AppendFileSink {
    file: File,
}

impl AppendFileSink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl TimestampSink for AppendFileSink {
    fn record(&mut self, timestamp: &str) -> io::Result<()> {
        writeln!(self.file, "{}", timestamp)
    }
}

/// Writes the formatted start time of every hit, in order.
pub fn record_hits<S: TimestampSink + ?Sized>(
    sink: &mut S,
    hits: &[SearchHit],
) -> io::Result<()> {
    for hit in hits {
        sink.record(&format_timestamp(hit.start))?;
    }
    Ok(())
}
