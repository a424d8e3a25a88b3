use crate::common::SortOrder;
use crate::errors::RepositoryResult;
use crate::filter::Filter;
use crate::repository::{FindOptions, MongoEntity, ObjectCursor};
use mongodb::Collection;

/// A lazily evaluated query over a repository collection.
///
/// A `Query` is a description: composing it with [`and`](Query::and),
/// [`sort_by`](Query::sort_by), [`skip`](Query::skip) or [`limit`](Query::limit)
/// performs no I/O. The server is contacted only by the terminal methods
/// [`cursor`](Query::cursor), [`to_vec`](Query::to_vec), [`first`](Query::first)
/// and [`count`](Query::count).
///
/// ```rust,ignore
/// let page = repo
///     .find(field("status").eq("active"))
///     .sort_by("created", SortOrder::Descending)
///     .skip(20)
///     .limit(10)
///     .to_vec()
///     .await?;
/// ```
pub struct Query<T>
where
    T: MongoEntity,
{
    collection: Collection<T>,
    filter: Filter,
    options: FindOptions,
}

impl<T> Clone for Query<T>
where
    T: MongoEntity,
{
    fn clone(&self) -> Self {
        Query {
            collection: self.collection.clone(),
            filter: self.filter.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T> Query<T>
where
    T: MongoEntity,
{
    pub(crate) fn new(collection: Collection<T>, filter: Filter) -> Self {
        Query {
            collection,
            filter,
            options: FindOptions::new(),
        }
    }

    /// Narrows the query with an additional filter.
    pub fn and(mut self, filter: Filter) -> Self {
        self.filter = self.filter.and(filter);
        self
    }

    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> Self {
        self.options = self.options.sort_by(field_name, sort_order);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.options = self.options.skip(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.options = self.options.limit(limit);
        self
    }

    /// Replaces the sort and pagination options wholesale.
    pub fn with_options(mut self, options: FindOptions) -> Self {
        self.options = options;
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    /// Executes the query and returns a cursor over the matching entities.
    pub async fn cursor(self) -> RepositoryResult<ObjectCursor<T>> {
        log::debug!(
            "Finding {} in {} with {:?}",
            self.filter,
            self.collection.name(),
            self.options
        );

        let mut find = self.collection.find(self.filter.to_document());
        if let Some(sort) = self.options.sort_document() {
            find = find.sort(sort);
        }
        if let Some(skip) = self.options.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = self.options.driver_limit() {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        Ok(ObjectCursor::new(cursor))
    }

    /// Executes the query and collects every matching entity.
    pub async fn to_vec(self) -> RepositoryResult<Vec<T>> {
        self.cursor().await?.to_vec().await
    }

    /// Executes the query and returns the first matching entity, honoring sort and skip.
    pub async fn first(self) -> RepositoryResult<Option<T>> {
        self.limit(1).cursor().await?.first().await
    }

    /// Counts the matching documents, honoring skip and limit.
    pub async fn count(self) -> RepositoryResult<u64> {
        log::debug!("Counting {} in {}", self.filter, self.collection.name());

        let mut count = self.collection.count_documents(self.filter.to_document());
        if let Some(skip) = self.options.skip {
            count = count.skip(skip);
        }
        if let Some(limit) = self.options.limit {
            count = count.limit(limit);
        }

        Ok(count.await?)
    }
}
