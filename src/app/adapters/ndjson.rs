//! Newline-delimited JSON line reader and writer
//!
//! The reader decodes one JSON value per non-blank line of a buffered
//! source; the writer encodes each result record as one compact JSON line.
//! Neither knows whether the stream is a file, stdin/stdout or a test buffer.

use crate::models::ResultRecord;
use crate::{Error, Result};
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::trace;

/// Iterator over the JSON records of a line-oriented source
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buffer: String,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// 1-based number of the last line read
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.buffer.trim();
                    if line.is_empty() {
                        continue;
                    }

                    trace!(line = self.line_number, "Decoding input line");
                    return Some(
                        serde_json::from_str(line)
                            .map_err(|e| Error::malformed_line(self.line_number, e)),
                    );
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::io(
                        format!("Failed to read input line {}", self.line_number + 1),
                        e,
                    )));
                }
            }
        }
        None
    }
}

/// Sink writing one result record per line
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Encode and write a single record followed by a newline
    pub fn write_record(&mut self, record: &ResultRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| {
            if e.is_io() {
                Error::io("Failed to write result record", e.into())
            } else {
                Error::Encoding(e)
            }
        })?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| Error::io("Failed to write result record", e))?;
        self.records_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("Failed to flush output", e))
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
