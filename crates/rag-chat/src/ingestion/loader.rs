//! Vector loader: one-time bulk preload and single-record inserts

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::providers::VectorStoreProvider;
use crate::types::{AddVectorRequest, CollectionSchema, VectorRecord};

use super::seed::{read_seed_file, to_records};

/// Largest integer a JSON consumer can hold without losing precision
const MAX_GENERATED_ID: u64 = (1 << 53) - 1;

/// What `preload` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// Collection was created and seeded
    Created { inserted: usize },
    /// Collection was already there; nothing was written
    AlreadyExists,
}

/// Populates the shared collection
pub struct VectorLoader {
    store: Arc<dyn VectorStoreProvider>,
    schema: CollectionSchema,
    seed_file: PathBuf,
    startup_delay: Duration,
}

impl VectorLoader {
    /// Create a loader for `schema`
    pub fn new(
        store: Arc<dyn VectorStoreProvider>,
        schema: CollectionSchema,
        config: &LoaderConfig,
    ) -> Self {
        Self {
            store,
            schema,
            seed_file: config.seed_file.clone(),
            startup_delay: Duration::from_secs(config.startup_delay_secs),
        }
    }

    /// Collection this loader writes to
    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Create and seed the collection unless it already exists
    ///
    /// Sleeps for the configured startup delay first. An existing collection
    /// is left untouched, so repeated runs never duplicate records.
    pub async fn preload(&self) -> Result<PreloadOutcome> {
        if !self.startup_delay.is_zero() {
            tracing::info!("Waiting {:?} for the vector store to be ready...", self.startup_delay);
            tokio::time::sleep(self.startup_delay).await;
        }

        tracing::info!("Initializing collection '{}'...", self.schema.name);

        if self.store.collection_exists(&self.schema.name).await? {
            tracing::info!("Collection '{}' already exists", self.schema.name);
            return Ok(PreloadOutcome::AlreadyExists);
        }

        // Seed is read first so a bad file leaves no empty collection behind
        let records = to_records(read_seed_file(&self.seed_file).await?);

        self.store.create_collection(&self.schema).await?;
        tracing::info!("Collection '{}' created", self.schema.name);

        if !records.is_empty() {
            self.store.upsert(&self.schema.name, &records).await?;
        }
        tracing::info!("Upserted {} vectors", records.len());

        Ok(PreloadOutcome::Created {
            inserted: records.len(),
        })
    }

    /// Upsert one record, generating an id when none is given
    pub async fn add_vector(&self, request: AddVectorRequest) -> Result<u64> {
        if request.vector.is_empty() {
            return Err(Error::InvalidRequest("vector must not be empty".to_string()));
        }

        let id = request.id.unwrap_or_else(generate_point_id);
        let record = VectorRecord::new(id, request.vector, request.text.unwrap_or_default());

        self.store.upsert(&self.schema.name, &[record]).await?;
        tracing::info!("Added vector {} to '{}'", id, self.schema.name);

        Ok(id)
    }
}

/// Random non-zero point id that fits in 53 bits
pub fn generate_point_id() -> u64 {
    loop {
        let (high, low) = Uuid::new_v4().as_u64_pair();
        let id = (high ^ low) & MAX_GENERATED_ID;
        if id != 0 {
            return id;
        }
    }
}
