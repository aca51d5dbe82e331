//! Line sources for the export pipeline.
//!
//! Retrieval and decompression of the log object are external collaborators;
//! the pipeline only sees a stream of decompressed UTF-8 lines through the
//! [`LineSource`] trait. [`LineReader`] adapts any buffered async reader
//! (a file, stdin, or an in-memory slice in tests).

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::{ExportError, Result};

/// A sequential source of flow log lines.
#[async_trait]
pub trait LineSource: Send {
    /// Get the next line.
    ///
    /// Returns:
    /// - `Ok(Some(line))` - next line, without its terminator
    /// - `Ok(None)` - end of input (normal termination)
    /// - `Err(e)` - the stream failed; fatal for the run
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// [`LineSource`] over any `AsyncBufRead`.
pub struct LineReader<R> {
    lines: Lines<R>,
    line_no: u64,
}

impl<R: AsyncBufRead + Unpin + Send> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader { lines: reader.lines(), line_no: 0 }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineSource for LineReader<R> {
    async fn next_line(&mut self) -> Result<Option<String>> {
        self.line_no += 1;
        self.lines
            .next_line()
            .await
            .map_err(|e| ExportError::Source { line_no: self.line_no, source: e })
    }
}
