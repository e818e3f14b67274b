//! Output drivers for datacollector
//!
//! - [`ConsoleWriter`]: one rendered entry per line on stdout or any writer
//! - [`FileWriter`]: buffered, append-only file sink with size-based rotation
//! - [`Encoding`]: the plain and JSON renderings both drivers share

pub mod console;
pub mod encoding;
pub mod errors;
pub mod file;

pub use console::ConsoleWriter;
pub use encoding::Encoding;
pub use file::{FileWriter, MAX_FILE_SIZE};
