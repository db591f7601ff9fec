//! MongoDB-backed store
//!
//! Uses a single `mongodb::Client` built once at startup. The driver pools
//! connections internally, so the store is shared by cloning the `Arc` that
//! holds it.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};

/// Default database name.
pub const DEFAULT_DATABASE: &str = "shareeats";

/// Build a client for the deployment at `uri`.
///
/// The Stable API is pinned to v1 with strict mode and deprecation errors.
/// No connection is made here; SRV records are resolved for `mongodb+srv`
/// URIs, which is the only network work this does.
///
/// # Errors
///
/// Returns an error if the URI cannot be parsed or resolved.
pub async fn create_client(uri: &str) -> Result<Client, StoreError> {
    let mut options = ClientOptions::parse(uri).await?;

    let server_api = ServerApi::builder()
        .version(ServerApiVersion::V1)
        .strict(true)
        .deprecation_errors(true)
        .build();
    options.server_api = Some(server_api);

    Ok(Client::with_options(options)?)
}

/// Store over one MongoDB database
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub fn new(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    /// Build the client and select `database_name` in one step.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = create_client(uri).await?;
        Ok(Self::new(client, database_name))
    }

    fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.database.collection::<Document>(name.as_str())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome {
            inserted_id: result.inserted_id,
        })
    }

    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .upsert(upsert)
            .await?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
