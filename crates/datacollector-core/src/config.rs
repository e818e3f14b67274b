//! Application configuration
//!
//! Configuration is assembled from option functions applied in order to
//! [`Config::default`]. An option that fails records its error in the
//! config; [`Config::build`] stops at the first such error and returns it.

use std::fmt;

use crate::errors::{DataCollectorError, Result};
use crate::level::Level;

/// Default application name
pub const DEFAULT_APP_NAME: &str = "Test App";

/// Validated settings for an application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_name: String,
    pub log_level: Level,
    /// Set by an option to signal that setup has failed
    pub error: Option<DataCollectorError>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            log_level: Level::Debug,
            error: None,
        }
    }
}

impl Config {
    /// Apply `options` in order on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns the error recorded by the first failing option. Options after
    /// it are not applied.
    pub fn build<I>(options: I) -> Result<Config>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut cfg = Config::default();
        for option in options {
            option.apply(&mut cfg);
            if let Some(err) = cfg.error.take() {
                return Err(err);
            }
        }
        Ok(cfg)
    }
}

/// A single configuration step
pub struct ConfigOption(Box<dyn FnOnce(&mut Config) + Send>);

impl ConfigOption {
    pub fn new(f: impl FnOnce(&mut Config) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Run this option against `cfg`
    ///
    /// A config that already carries an error is left untouched.
    pub fn apply(self, cfg: &mut Config) {
        if cfg.error.is_some() {
            return;
        }
        (self.0)(cfg);
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfigOption")
    }
}

/// Set the application name
pub fn with_app_name(app_name: impl Into<String>) -> ConfigOption {
    let app_name = app_name.into();
    ConfigOption::new(move |cfg| cfg.app_name = app_name)
}

/// Set the minimum level that will be forwarded to the driver
///
/// Accepts a [`Level`] or its canonical name. An unknown name records
/// [`DataCollectorError::InvalidLogLevel`] and leaves the level unchanged.
pub fn with_log_level(level: impl fmt::Display) -> ConfigOption {
    let value = level.to_string();
    ConfigOption::new(move |cfg| match value.parse::<Level>() {
        Ok(level) => cfg.log_level = level,
        Err(err) => cfg.error = Some(err),
    })
}
