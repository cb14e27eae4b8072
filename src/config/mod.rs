//! Configuration for the patient record store.
//!
//! The pipeline takes an explicit `StoreConfig`; reading the process
//! environment is confined to the `from_env` adapter so the core stays free
//! of ambient state.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Default collection holding patient documents
pub const DEFAULT_COLLECTION: &str = "patients";

/// Connection parameters for the patient record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Database name
    pub db_name: String,
    /// Collection holding patient documents
    pub collection: String,
    /// Optional CA bundle used to verify the server certificate
    pub tls_ca_file: Option<PathBuf>,
}

impl StoreConfig {
    /// Create a configuration for the default `patients` collection
    #[must_use]
    pub fn new(uri: impl Into<String>, db_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            db_name: db_name.into(),
            collection: DEFAULT_COLLECTION.to_string(),
            tls_ca_file: None,
        }
    }

    /// Load the configuration from the process environment.
    ///
    /// Reads `MONGO_URI` and `MONGO_DB_NAME` (required) and
    /// `MONGO_TLS_CA_FILE` (optional), honoring a `.env` file when one is
    /// present in the working directory.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let uri = env::var("MONGO_URI").context("MONGO_URI must be set")?;
        let db_name = env::var("MONGO_DB_NAME").context("MONGO_DB_NAME must be set")?;

        let mut config = Self::new(uri, db_name);
        if let Ok(path) = env::var("MONGO_TLS_CA_FILE") {
            config.tls_ca_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
