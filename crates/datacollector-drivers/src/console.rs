//! Console driver
//!
//! Writes one rendered entry per line. Defaults to stdout; tests and
//! embedders can hand in any `Write + Send` sink.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use datacollector_core::core_types::schema::OP_SET_ENCODING;
use datacollector_core::errors::ExError;
use datacollector_core::{Driver, Entry};

use crate::encoding::Encoding;
use crate::errors::io_error;

struct ConsoleState {
    out: Box<dyn Write + Send>,
    encoding: Encoding,
}

/// Driver printing entries to a line-oriented writer
pub struct ConsoleWriter {
    state: Mutex<ConsoleState>,
}

impl ConsoleWriter {
    /// Console writer on stdout with plain encoding
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out: Box::new(out),
                encoding: Encoding::Plain,
            }),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .encoding
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWriter")
            .field("encoding", &self.encoding())
            .finish_non_exhaustive()
    }
}

impl Driver for ConsoleWriter {
    fn record_log(&self, entry: &Entry) -> Result<(), ExError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let line = state.encoding.render(entry)?;
        writeln!(state.out, "{}", line).map_err(|e| io_error("console_write", e))?;
        state.out.flush().map_err(|e| io_error("console_flush", e))
    }

    fn set_encoding(&self, encoding: &str) -> Result<(), ExError> {
        let parsed: Encoding = encoding.parse()?;
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .encoding = parsed;
        tracing::debug!(
            component = module_path!(),
            op = OP_SET_ENCODING,
            encoding = parsed.as_str(),
        );
        Ok(())
    }
}
