pub mod console;
pub mod custom_driver;
pub mod file;
pub mod multi_thread;

use datacollector_core::{attr, App};

/// The walkthrough shared by the console and file demos
///
/// Logs one application entry, one transaction entry, ends the transaction
/// and then logs through it once more.
pub(crate) fn walkthrough(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    app.debug(
        "Application started",
        &[
            attr("userID", "12345"),
            attr("attempt", 3),
            attr("success", true),
        ],
    );

    let transaction = app.start_transaction(&[])?;
    transaction.debug(
        "Transaction started",
        &[
            attr("database_name", "products"),
            attr("active_connections", 5),
            attr("sql", false),
        ],
    );

    transaction.end();
    transaction.info("Attempting to write to a finished transaction", &[]);
    Ok(())
}
