//! Console demo
//!
//! Usage: datacollector console [--encoding <plain|json>]

use std::sync::Arc;

use clap::Args;
use datacollector_core::{with_app_name, with_log_level, App, Driver};
use datacollector_drivers::ConsoleWriter;

#[derive(Debug, Args)]
pub struct ConsoleArgs {
    /// Output encoding
    #[arg(long, default_value = "plain")]
    pub encoding: String,

    /// Application name stamped on every entry
    #[arg(long, default_value = "CLI Plain")]
    pub app_name: String,
}

/// Execute console demo
pub fn execute(args: ConsoleArgs, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let driver = Arc::new(ConsoleWriter::new());
    driver.set_encoding(&args.encoding)?;

    let app = App::new(
        driver,
        [with_app_name(args.app_name), with_log_level(level)],
    )?;

    super::walkthrough(&app)
}
