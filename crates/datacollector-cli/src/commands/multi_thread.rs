//! Concurrent file demo
//!
//! Usage: datacollector multi-thread [--workers <N>] [--path <PATH>]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use datacollector_core::{attr, with_app_name, with_log_level, App};
use datacollector_drivers::FileWriter;

#[derive(Debug, Args)]
pub struct MultiThreadArgs {
    /// Number of threads logging at once
    #[arg(long, default_value_t = 10)]
    pub workers: u32,

    /// Log file to append to
    #[arg(long, default_value = "log_file.txt")]
    pub path: PathBuf,
}

/// Execute concurrent demo
pub fn execute(args: MultiThreadArgs, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let driver = Arc::new(FileWriter::open(&args.path)?);
    let app = App::new(
        driver.clone(),
        [with_app_name("Example"), with_log_level(level)],
    )?;

    std::thread::scope(|s| {
        for worker in 0..args.workers {
            let app = &app;
            s.spawn(move || {
                app.debug(
                    "Concurrent log message",
                    &[
                        attr("worker", worker),
                        attr("timestamp", Utc::now().to_rfc3339()),
                    ],
                );
            });
        }
    });

    driver.close()?;
    println!(
        "{} workers logged to {}",
        args.workers,
        driver.path().display()
    );
    Ok(())
}
