//! Configuration loading for the leave ledger engine.
//!
//! Leave settings are read from a YAML file in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use leave_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Monthly credit: {}", config.settings().monthly_credit);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SETTINGS_FILE_NAME};
pub use types::{LeaveSettings, LeaveSettingsFile, OverrideDetection};
