//! MongoDB access for patient records.
//!
//! The store is opened once per pipeline invocation and dropped when the
//! invocation returns; there is no pooling or retry layer on top of the
//! driver. Connectivity and authentication failures surface unchanged.

use bson::doc;
use futures::stream::TryStreamExt;
use log::{debug, info};
use mongodb::options::{ClientOptions, FindOptions, Tls, TlsOptions};
use mongodb::{Client, Collection};

use crate::config::StoreConfig;
use crate::error::{CohortPrepError, Result};
use crate::models::PatientRecord;

/// Client wrapper scoped to one database and collection
pub struct PatientStore {
    client: Client,
    db_name: String,
    collection_name: String,
}

impl PatientStore {
    /// Open a store handle for the configured database.
    ///
    /// When a CA bundle is configured it overrides the TLS trust settings
    /// from the connection string.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        debug!("Opening record store connection to '{}'", config.db_name);

        let mut options = ClientOptions::parse(&config.uri).await?;
        if let Some(ca_path) = &config.tls_ca_file {
            let tls = TlsOptions::builder().ca_file_path(ca_path.clone()).build();
            options.tls = Some(Tls::Enabled(tls));
        }
        let client = Client::with_options(options)?;

        Ok(Self {
            client,
            db_name: config.db_name.clone(),
            collection_name: config.collection.clone(),
        })
    }

    /// Fetch all patient documents, projected to the six consumed fields.
    ///
    /// One attempt, no retry. An empty collection is fatal to the pipeline.
    pub async fn fetch_patients(&self) -> Result<Vec<PatientRecord>> {
        let collection: Collection<PatientRecord> = self
            .client
            .database(&self.db_name)
            .collection(&self.collection_name);

        let projection = doc! {
            "_id": 0,
            "age": 1,
            "gender": 1,
            "comorbidities": 1,
            "stage": 1,
            "bmi": 1,
            "eligible": 1,
        };
        let options = FindOptions::builder().projection(projection).build();

        let cursor = collection.find(doc! {}).with_options(options).await?;
        let records: Vec<PatientRecord> = cursor.try_collect().await?;

        if records.is_empty() {
            return Err(CohortPrepError::EmptyDataset);
        }
        info!(
            "Fetched {} patient records from '{}'",
            records.len(),
            self.collection_name
        );

        Ok(records)
    }
}
