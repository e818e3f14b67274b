use std::sync::Arc;

use datacollector_core::{App, ConfigOption, Entry, Level, MemoryDriver};

/// Build an app over a fresh in-memory driver
///
/// Returns the driver too so tests can inspect recorded entries.
#[allow(dead_code)]
pub fn memory_app<I>(options: I) -> (App, Arc<MemoryDriver>)
where
    I: IntoIterator<Item = ConfigOption>,
{
    let driver = Arc::new(MemoryDriver::new());
    let app = App::new(driver.clone(), options).expect("valid options");
    (app, driver)
}

/// Levels of the recorded entries, in order
#[allow(dead_code)]
pub fn levels(entries: &[Entry]) -> Vec<Level> {
    entries.iter().map(|e| e.level()).collect()
}

/// Messages of the recorded entries, in order
#[allow(dead_code)]
pub fn messages(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(|e| e.message().to_string()).collect()
}
