use futures_util::StreamExt;
use mongodb::Collection;
use mongodb::bson::doc;

use super::RegistryError;
use crate::db::mongodb::is_duplicate_key;
use crate::models::url::ShortLink;

/// Result of an insert attempt. A duplicate code is not an error from the
/// store's point of view; the registry decides whether to retry.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateCode,
}

/// Durable key-value substrate for short links. The backing store must
/// enforce uniqueness of `code` atomically; concurrent inserts racing on the
/// same code must see exactly one `Inserted` and the rest `DuplicateCode`.
#[allow(async_fn_in_trait)]
pub trait LinkStore {
    async fn insert(&self, link: &ShortLink) -> Result<InsertOutcome, RegistryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RegistryError>;
    /// All links of one owner, newest first.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, RegistryError>;
}

/// MongoDB-backed store. Relies on the unique index on `urls.code` created
/// at boot; an E11000 duplicate-key write maps to `DuplicateCode`.
#[derive(Clone)]
pub struct MongoLinkStore {
    links: Collection<ShortLink>,
}

impl MongoLinkStore {
    pub fn new(links: Collection<ShortLink>) -> Self {
        Self { links }
    }
}

impl LinkStore for MongoLinkStore {
    async fn insert(&self, link: &ShortLink) -> Result<InsertOutcome, RegistryError> {
        match self.links.insert_one(link).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(ref e) if is_duplicate_key(e) => Ok(InsertOutcome::DuplicateCode),
            Err(e) => Err(RegistryError::Store(format!("insert failed: {}", e))),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RegistryError> {
        self.links
            .find_one(doc! { "code": code })
            .await
            .map_err(|e| RegistryError::Store(format!("lookup failed: {}", e)))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, RegistryError> {
        let mut cursor = self
            .links
            .find(doc! { "ownerId": owner_id })
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(|e| RegistryError::Store(format!("query failed: {}", e)))?;

        let mut links = Vec::new();
        while let Some(result) = cursor.next().await {
            let link =
                result.map_err(|e| RegistryError::Store(format!("cursor failed: {}", e)))?;
            links.push(link);
        }
        Ok(links)
    }
}
