//! Custom driver demo
//!
//! Usage: datacollector custom-driver
//!
//! Shows that any `Driver` implementation can back an application.

use std::sync::Arc;

use clap::Args;
use datacollector_core::errors::ExError;
use datacollector_core::{with_app_name, with_log_level, App, Driver, Entry};

#[derive(Debug, Args)]
pub struct CustomDriverArgs {
    /// Application name stamped on every entry
    #[arg(long, default_value = "Custom Driver Example")]
    pub app_name: String,
}

/// Prints a one-line summary of each entry and ignores encodings
struct PrintingDriver;

impl Driver for PrintingDriver {
    fn record_log(&self, entry: &Entry) -> Result<(), ExError> {
        println!(
            "Custom driver log - {} {} [{}]: {}",
            entry.timestamp().format("%H:%M:%S"),
            entry.level(),
            entry.app_name(),
            entry.message()
        );
        Ok(())
    }

    fn set_encoding(&self, _encoding: &str) -> Result<(), ExError> {
        Ok(())
    }
}

/// Execute custom driver demo
pub fn execute(args: CustomDriverArgs, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new(
        Arc::new(PrintingDriver),
        [with_app_name(args.app_name), with_log_level(level)],
    )?;

    app.info("Application started", &[]);
    app.error("Sample error message", &[]);
    Ok(())
}
