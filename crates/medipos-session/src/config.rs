//! # Store Configuration
//!
//! Read-only identity of the store and terminal, loaded at startup.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};

/// Store/terminal configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (displayed on receipts).
    pub store_name: String,

    /// Store address lines (for receipts).
    pub store_address: Vec<String>,

    /// GST registration number, printed on the tax invoice when present.
    pub gstin: Option<String>,

    /// Terminal identifier (a store may run several billing counters).
    pub terminal_id: String,

    /// External user/session identifier of the signed-in cashier; travels
    /// on every checkout payload.
    pub user_id: String,
}

impl Default for StoreConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        StoreConfig {
            store_name: "MediPOS Dev Pharmacy".to_string(),
            store_address: vec!["12 MG Road".to_string(), "Bengaluru 560001".to_string()],
            gstin: None,
            terminal_id: "counter-01".to_string(),
            user_id: "dev-user".to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDIPOS_STORE_NAME`: Override store name
    /// - `MEDIPOS_GSTIN`: Override GST registration number
    /// - `MEDIPOS_TERMINAL_ID`: Override terminal identifier
    /// - `MEDIPOS_USER_ID`: Override cashier identifier
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(store_name) = std::env::var("MEDIPOS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(gstin) = std::env::var("MEDIPOS_GSTIN") {
            config.gstin = Some(gstin);
        }

        if let Ok(terminal_id) = std::env::var("MEDIPOS_TERMINAL_ID") {
            config.terminal_id = terminal_id;
        }

        if let Ok(user_id) = std::env::var("MEDIPOS_USER_ID") {
            config.user_id = user_id;
        }

        config
    }
}
