use crate::document::DocumentId;
use crate::errors::{ErrorKind, RepositoryError, RepositoryResult};
use crate::filter::{all, text, Filter};
use crate::index::{IndexDescriptor, IndexOptions};
use crate::repository::repository_operations::{id_filter, planned_indexes, set_update};
use crate::repository::{MongoEntity, ObjectCursor, Query, WriteResult};
use crate::repository_builder::RepositoryBuilder;
use crate::repository_config::RepositoryConfig;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::error::ErrorKind as DriverErrorKind;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, IndexModel};
use serde::Serialize;
use std::sync::Arc;

const NAMESPACE_NOT_FOUND_CODE: i32 = 26;

/// A typed repository over a single MongoDB collection.
///
/// # Purpose
///
/// `ObjectRepository<T>` persists, queries and manages entities of type `T`.
/// Every operation maps onto one driver primitive; the repository adds no
/// caching, retries or locking. Errors raised by the driver are returned
/// unmodified inside a [`RepositoryError`] of kind [`ErrorKind::DriverError`].
/// "Not found" is reported as `None`, never as an error.
///
/// # Characteristics
///
/// - **Bound to one collection**: the collection is resolved when the repository
///   is created and never changes.
/// - **Indexes provisioned on open**: unique indexes for the entity's unique fields and
///   the wildcard text index are ensured once, see [`ensure_indexes`](Self::ensure_indexes).
/// - **Cheap to clone**: clones share the same collection handle.
/// - **Thread-safe**: `Send + Sync`; concurrency is handled by the driver's pool.
/// - **Cancellable**: dropping an operation's future abandons it.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::filter::field;
/// use mongo_repository::repository::ObjectRepository;
///
/// let repo = ObjectRepository::<User>::open("mongodb://localhost:27017", "app", "users").await?;
///
/// let user = User::new("alice@example.com");
/// repo.insert(&user).await?;
///
/// let loaded = repo.get_by_id(&user.id).await?;
/// let admins = repo.find(field("role").eq("admin")).to_vec().await?;
/// repo.update_field_by_id(&user.id, "role", "admin").await?;
/// let removed = repo.remove_by_id(&user.id).await?;
/// ```
pub struct ObjectRepository<T>
where
    T: MongoEntity,
{
    inner: Arc<RepositoryInner<T>>,
}

struct RepositoryInner<T>
where
    T: MongoEntity,
{
    collection: Collection<T>,
    config: RepositoryConfig,
}

impl<T> Clone for ObjectRepository<T>
where
    T: MongoEntity,
{
    fn clone(&self) -> Self {
        ObjectRepository {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ObjectRepository<T>
where
    T: MongoEntity,
{
    /// Connects to `connection_string` and opens a repository over
    /// `database_name.collection_name`, provisioning its indexes.
    pub async fn open(
        connection_string: &str,
        database_name: &str,
        collection_name: &str,
    ) -> RepositoryResult<Self> {
        RepositoryBuilder::new()
            .connection_string(connection_string)
            .database_name(database_name)
            .collection_name(collection_name)
            .open::<T>()
            .await
    }

    /// Opens a repository over an already resolved driver collection and
    /// provisions its indexes.
    pub async fn with_collection(
        collection: Collection<T>,
        config: RepositoryConfig,
    ) -> RepositoryResult<Self> {
        let repository = ObjectRepository::new(collection, config);
        repository.ensure_indexes().await?;
        log::info!(
            "Opened repository {} for {}",
            repository.name(),
            T::entity_name()
        );
        Ok(repository)
    }

    pub(crate) fn new(collection: Collection<T>, config: RepositoryConfig) -> Self {
        ObjectRepository {
            inner: Arc::new(RepositoryInner { collection, config }),
        }
    }

    /// Returns the underlying driver collection.
    pub fn collection(&self) -> &Collection<T> {
        &self.inner.collection
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        self.inner.collection.name()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.inner.config
    }

    /// Creates every index the entity and the configuration call for.
    ///
    /// Creating an index that already exists with the same options is a no-op
    /// on the server, so this can be called any number of times. If existing
    /// data violates a unique constraint the driver's error is returned.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let models = planned_indexes::<T>(&self.inner.config)?;
        for model in models {
            log::info!("Ensuring index {:?} on {}", model.keys, self.name());
            self.inner.collection.create_index(model).await?;
        }
        Ok(())
    }

    /// Inserts a single entity.
    ///
    /// No existence check is made; a duplicate `_id` or unique value is
    /// rejected by the server with a duplicate key error.
    pub async fn insert(&self, entity: &T) -> RepositoryResult<()> {
        log::debug!("Inserting {} into {}", entity.entity_id(), self.name());
        self.inner.collection.insert_one(entity).await?;
        Ok(())
    }

    /// Inserts a batch of entities in one call.
    ///
    /// The driver rejects an empty batch. On partial failure the driver's
    /// insert-many error is returned as is.
    pub async fn insert_many(&self, entities: &[T]) -> RepositoryResult<()> {
        log::debug!("Inserting {} entities into {}", entities.len(), self.name());
        self.inner.collection.insert_many(entities).await?;
        Ok(())
    }

    /// Returns the entity with the given id, or `None` if there is none.
    pub async fn get_by_id(&self, id: &DocumentId) -> RepositoryResult<Option<T>> {
        log::debug!("Getting {} from {}", id, self.name());
        Ok(self.inner.collection.find_one(id_filter(id)).await?)
    }

    /// Returns a lazy query over the entities matching `filter`.
    pub fn find(&self, filter: Filter) -> Query<T> {
        Query::new(self.inner.collection.clone(), filter)
    }

    /// Returns a lazy query over every entity in the collection.
    pub fn find_all(&self) -> Query<T> {
        self.find(all())
    }

    /// Returns a cursor over the entities whose `field_name` equals `value`.
    ///
    /// The field name is not checked; an unknown field yields an empty cursor.
    pub async fn find_by_field<V: Serialize>(
        &self,
        field_name: &str,
        value: V,
    ) -> RepositoryResult<ObjectCursor<T>> {
        let value = to_bson(&value)?;
        self.find(Filter::Eq(field_name.to_string(), value))
            .cursor()
            .await
    }

    /// Returns a lazy query over the entities matching a full-text search.
    ///
    /// Requires a text index on the collection.
    pub fn search(&self, search: &str) -> Query<T> {
        self.find(text(search))
    }

    /// Runs `pipeline` followed by a `$match` stage for `filter`.
    pub async fn aggregate(
        &self,
        filter: Filter,
        pipeline: Vec<Document>,
    ) -> RepositoryResult<ObjectCursor<T>> {
        log::debug!(
            "Aggregating {} stages with {} in {}",
            pipeline.len(),
            filter,
            self.name()
        );

        let mut stages = pipeline;
        stages.push(doc! { "$match": filter.to_document() });

        let cursor = self
            .inner
            .collection
            .aggregate(stages)
            .with_type::<T>()
            .await?;
        Ok(ObjectCursor::new(cursor))
    }

    /// Replaces the stored entity with the same id, inserting it if absent,
    /// and returns the entity as stored after the write.
    pub async fn update(&self, entity: &T) -> RepositoryResult<T> {
        let id = entity.entity_id();
        log::debug!("Replacing {} in {}", id, self.name());

        let updated = self
            .inner
            .collection
            .find_one_and_replace(id_filter(&id), entity)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        updated.ok_or_else(|| {
            log::error!("Upsert of {} in {} returned no document", id, self.name());
            RepositoryError::new(
                &format!("Upsert of {} returned no document", id),
                ErrorKind::InternalError,
            )
        })
    }

    /// Sets a single field on the entity with the given id.
    ///
    /// Returns the entity after the update, or `None` if no entity has this id.
    pub async fn update_field_by_id<V: Serialize>(
        &self,
        id: &DocumentId,
        field_name: &str,
        value: V,
    ) -> RepositoryResult<Option<T>> {
        log::debug!("Setting {} on {} in {}", field_name, id, self.name());

        let update = set_update(field_name, &value)?;
        Ok(self
            .inner
            .collection
            .find_one_and_update(id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Sets a single field on every entity matching `filter`.
    pub async fn update_field<V: Serialize>(
        &self,
        filter: Filter,
        field_name: &str,
        value: V,
    ) -> RepositoryResult<WriteResult> {
        log::debug!("Setting {} where {} in {}", field_name, filter, self.name());

        let update = set_update(field_name, &value)?;
        let result = self
            .inner
            .collection
            .update_many(filter.to_document(), update)
            .await?;
        Ok(result.into())
    }

    /// Atomically deletes the entity with the given id and returns it as it was
    /// before deletion, or `None` if no entity has this id.
    pub async fn remove_by_id(&self, id: &DocumentId) -> RepositoryResult<Option<T>> {
        log::debug!("Removing {} from {}", id, self.name());
        Ok(self
            .inner
            .collection
            .find_one_and_delete(id_filter(id))
            .await?)
    }

    /// Deletes every entity matching `filter` and returns how many were deleted.
    pub async fn remove(&self, filter: Filter) -> RepositoryResult<u64> {
        log::debug!("Removing {} from {}", filter, self.name());
        let result = self
            .inner
            .collection
            .delete_many(filter.to_document())
            .await?;
        Ok(result.deleted_count)
    }

    /// Counts the entities matching `filter`.
    pub async fn count(&self, filter: Filter) -> RepositoryResult<u64> {
        self.find(filter).count().await
    }

    /// Creates an index over `field_names`.
    pub async fn create_index(
        &self,
        field_names: Vec<&str>,
        index_options: &IndexOptions,
    ) -> RepositoryResult<()> {
        let model = index_options.index_model(&field_names)?;
        log::info!("Creating index {:?} on {}", model.keys, self.name());
        self.inner.collection.create_index(model).await?;
        Ok(())
    }

    /// Lists the indexes of the collection, including the `_id` index.
    ///
    /// A collection that does not exist yet has no indexes.
    pub async fn list_indexes(&self) -> RepositoryResult<Vec<IndexDescriptor>> {
        let cursor = match self.inner.collection.list_indexes().await {
            Ok(cursor) => cursor,
            Err(e) if is_namespace_not_found(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let models: Vec<IndexModel> = cursor.try_collect().await?;
        Ok(models.iter().map(IndexDescriptor::from_model).collect())
    }

    /// Returns `true` if an index over exactly `field_names` exists.
    pub async fn has_index(&self, field_names: Vec<&str>) -> RepositoryResult<bool> {
        let indexes = self.list_indexes().await?;
        Ok(indexes.iter().any(|index| index.covers(&field_names)))
    }

    /// Drops the index over exactly `field_names`.
    pub async fn drop_index(&self, field_names: Vec<&str>) -> RepositoryResult<()> {
        let indexes = self.list_indexes().await?;
        let Some(index) = indexes.iter().find(|index| index.covers(&field_names)) else {
            log::error!("No index on {:?} in {}", field_names, self.name());
            return Err(RepositoryError::new(
                &format!("No index found on fields {:?}", field_names),
                ErrorKind::InvalidOperation,
            ));
        };

        log::info!("Dropping index {} on {}", index.name(), self.name());
        self.inner.collection.drop_index(index.name()).await?;
        Ok(())
    }

    /// Deletes every entity, keeping the collection and its indexes.
    pub async fn clear(&self) -> RepositoryResult<()> {
        log::debug!("Clearing {}", self.name());
        self.inner.collection.delete_many(doc! {}).await?;
        Ok(())
    }

    /// Drops the collection together with its indexes.
    pub async fn dispose(&self) -> RepositoryResult<()> {
        log::info!("Dropping collection {}", self.name());
        self.inner.collection.drop().await?;
        Ok(())
    }
}

fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        DriverErrorKind::Command(command_error) if command_error.code == NAMESPACE_NOT_FOUND_CODE
    )
}
