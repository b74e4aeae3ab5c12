//! Application state for the leave ledger API.

use std::sync::Arc;

use crate::config::{ConfigLoader, LeaveSettings};

/// Shared application state.
///
/// Holds the leave settings every request is computed under. Settings are
/// process-wide; requests never carry their own.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the loaded leave settings.
    pub fn settings(&self) -> &LeaveSettings {
        self.config.settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_exposes_settings() {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        let state = AppState::new(config);
        assert_eq!(state.settings().monthly_credit, 1);
        assert_eq!(state.settings(), state.config().settings());
    }
}
