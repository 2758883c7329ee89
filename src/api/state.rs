//! Application state for the CLT vs PJ Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, TaxTables};

/// Shared application state.
///
/// Holds the tax tables every handler computes against. Tables are loaded
/// once at startup and never change while the server runs.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tax tables.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a state backed by the built-in 2025 tables.
    pub fn builtin() -> Self {
        Self::new(ConfigLoader::from_tables(TaxTables::builtin().clone()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the tax tables.
    pub fn tables(&self) -> &TaxTables {
        self.config.tables()
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
    fn test_builtin_state_uses_2025_tables() {
        let state = AppState::builtin();

        assert_eq!(state.tables().metadata().fiscal_year, 2025);
        assert_eq!(state.tables(), TaxTables::builtin());
    }
}
