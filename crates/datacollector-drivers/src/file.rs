//! Rotating file driver
//!
//! Entries are appended through a buffer. The buffer is flushed whenever an
//! ERROR entry is recorded, and on `flush`/`close`. Once the bytes written
//! since the last rotation exceed the limit, the next record first moves the
//! file aside to `<path>.<unix seconds>` (plus `.<n>` if that name is taken)
//! and starts a fresh file at `path`. A failed rotation is reported through
//! diagnostics and the entry is still written.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use chrono::Utc;
use datacollector_core::core_types::schema::{OP_ROTATE, OP_SET_ENCODING};
use datacollector_core::errors::{ExError, ExErrorKind};
use datacollector_core::logging_facility::elapsed_ms;
use datacollector_core::{log_op_end, log_op_error, log_op_start, Driver, Entry, Level};

use crate::encoding::Encoding;
use crate::errors::{io_error_at, Result};

/// Default rotation threshold (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

struct FileState {
    // None once closed
    buffer: Option<BufWriter<File>>,
    current_size: u64,
    encoding: Encoding,
}

/// Driver appending rendered entries to a file
pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    state: Mutex<FileState>,
}

impl FileWriter {
    /// Open (or create) `path` for appending with the default size limit
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_limit(path, MAX_FILE_SIZE)
    }

    /// Open (or create) `path` for appending, rotating past `max_bytes`
    ///
    /// The size counter starts at the file's current length, so appending
    /// to a large existing file rotates on the next record.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file or its metadata cannot be read.
    pub fn open_with_limit(path: impl Into<PathBuf>, max_bytes: u64) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let current_size = file
            .metadata()
            .map_err(|e| io_error_at("file_open", &path, e))?
            .len();

        Ok(Self {
            path,
            max_bytes,
            state: Mutex::new(FileState {
                buffer: Some(BufWriter::new(file)),
                current_size,
                encoding: Encoding::Plain,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn encoding(&self) -> Encoding {
        self.lock().encoding
    }

    /// Push buffered bytes to the file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the flush fails.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.lock();
        match state.buffer.as_mut() {
            Some(buffer) => buffer
                .flush()
                .map_err(|e| io_error_at("file_flush", &self.path, e)),
            None => Ok(()),
        }
    }

    /// Flush and release the file
    ///
    /// Closing twice is a no-op. Records after close fail with an `Io` error.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the final flush fails.
    pub fn close(&self) -> Result<()> {
        let buffer = self.lock().buffer.take();
        match buffer {
            Some(mut buffer) => buffer
                .flush()
                .map_err(|e| io_error_at("file_close", &self.path, e)),
            None => Ok(()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn closed_error(&self) -> ExError {
        ExError::new(ExErrorKind::Io)
            .with_op("file_write")
            .with_message("writer is closed")
            .with_path(self.path.display().to_string())
    }

    /// Move the current file aside and reopen a fresh one at `path`
    ///
    /// The buffer is only replaced once a new file is open, so a failure
    /// leaves a usable writer behind.
    fn rotate(&self, state: &mut FileState) -> Result<PathBuf> {
        if let Some(buffer) = state.buffer.as_mut() {
            buffer
                .flush()
                .map_err(|e| io_error_at(OP_ROTATE, &self.path, e))?;
        }

        let rotated = rotation_target(&self.path, Utc::now().timestamp());
        let renamed = fs::rename(&self.path, &rotated);

        // Reopen even when the rename failed so writes land at `path`.
        state.buffer = Some(BufWriter::new(open_append(&self.path)?));
        renamed.map_err(|e| io_error_at(OP_ROTATE, &self.path, e))?;
        Ok(rotated)
    }
}

impl Driver for FileWriter {
    fn record_log(&self, entry: &Entry) -> std::result::Result<(), ExError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        if state.buffer.is_none() {
            return Err(self.closed_error());
        }

        if state.current_size > self.max_bytes {
            let started = Instant::now();
            log_op_start!(OP_ROTATE, path = %self.path.display());
            match self.rotate(state) {
                Ok(rotated) => {
                    log_op_end!(
                        OP_ROTATE,
                        duration_ms = elapsed_ms(started),
                        rotated_to = %rotated.display()
                    );
                }
                Err(err) => {
                    log_op_error!(
                        OP_ROTATE,
                        err,
                        duration_ms = elapsed_ms(started),
                        path = %self.path.display()
                    );
                }
            }
            // A failed rotation is retried after another `max_bytes`.
            state.current_size = 0;
        }

        let line = state.encoding.render(entry)?;
        let buffer = state.buffer.as_mut().ok_or_else(|| self.closed_error())?;

        writeln!(buffer, "{}", line).map_err(|e| io_error_at("file_write", &self.path, e))?;
        state.current_size += line.len() as u64 + 1;

        if entry.level() == Level::Error {
            buffer
                .flush()
                .map_err(|e| io_error_at("file_flush", &self.path, e))?;
        }

        Ok(())
    }

    fn set_encoding(&self, encoding: &str) -> std::result::Result<(), ExError> {
        let parsed: Encoding = encoding.parse()?;
        self.lock().encoding = parsed;
        tracing::debug!(
            component = module_path!(),
            op = OP_SET_ENCODING,
            encoding = parsed.as_str(),
            path = %self.path.display(),
        );
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("encoding", &self.encoding())
            .finish_non_exhaustive()
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error_at("file_open", path, e))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `<path>.<unix seconds>`, or `<path>.<unix seconds>.<n>` if that is taken
fn rotation_target(path: &Path, unix_secs: i64) -> PathBuf {
    let base = with_suffix(path, &unix_secs.to_string());
    if !base.exists() {
        return base;
    }
    (1u32..)
        .map(|n| with_suffix(path, &format!("{}.{}", unix_secs, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}
