//! JSON output of analysis batches.

use std::io::{self, Write};

use anyhow::Result;
use seed_qa_core::AnalysisBatch;

/// Writes analysis batches as JSON or JSON Lines.
pub struct JsonOutput<W = io::Stdout> {
    writer: W,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonOutput<W> {
    /// Creates a new JSON output writing to the given writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one compact JSON object per analysis.
    pub fn write_lines(&mut self, batch: &AnalysisBatch) -> Result<()> {
        for analysis in batch {
            serde_json::to_writer(&mut self.writer, analysis)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Writes the whole batch as a JSON array.
    pub fn write_array(&mut self, batch: &AnalysisBatch, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut self.writer, batch)?;
        } else {
            serde_json::to_writer(&mut self.writer, batch)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
