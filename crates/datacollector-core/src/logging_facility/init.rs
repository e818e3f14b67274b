//! Diagnostics initialization
//!
//! Provides a single initialization point for the internal diagnostics
//! subscriber. `RUST_LOG` overrides the profile's default filter.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

const DEVELOPMENT_FILTER: &str = "datacollector_core=debug,datacollector_drivers=debug";
const PRODUCTION_FILTER: &str = "datacollector_core=info,datacollector_drivers=info";

static INIT_ONCE: Once = Once::new();

/// Initialize the diagnostics subscriber
///
/// Only the first call installs a subscriber; later calls are ignored.
/// Embedding applications that install their own subscriber should not
/// call this at all.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// # Example
///
/// ```
/// use datacollector_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(DEVELOPMENT_FILTER)),
                    )
                    .try_init()
                    .ok();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(PRODUCTION_FILTER)),
                    )
                    .try_init()
                    .ok();
            }
            Profile::Test => {
                // capture layer is installed by init_test_capture()
                let _ = tracing_subscriber::registry().try_init();
            }
        }
    });
}
