//! File demo
//!
//! Usage: datacollector file [--path <PATH>] [--encoding <plain|json>]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use datacollector_core::{with_app_name, with_log_level, App, Driver};
use datacollector_drivers::FileWriter;

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Log file to append to
    #[arg(long, default_value = "log_plain.txt")]
    pub path: PathBuf,

    /// Output encoding
    #[arg(long, default_value = "plain")]
    pub encoding: String,

    /// Application name stamped on every entry
    #[arg(long, default_value = "Example")]
    pub app_name: String,
}

/// Execute file demo
pub fn execute(args: FileArgs, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let driver = Arc::new(FileWriter::open(&args.path)?);
    driver.set_encoding(&args.encoding)?;

    let app = App::new(
        driver.clone(),
        [with_app_name(args.app_name), with_log_level(level)],
    )?;

    super::walkthrough(&app)?;
    driver.close()?;

    println!("Wrote log to {}", driver.path().display());
    Ok(())
}
