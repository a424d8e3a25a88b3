use crate::errors::{RepositoryError, RepositoryResult};
use futures::stream::{BoxStream, Stream, StreamExt, TryStreamExt};
use mongodb::Cursor;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An async stream of entities read from a collection.
///
/// Wraps the driver cursor and maps every driver or deserialization failure
/// into a [`RepositoryError`] as it is encountered. Documents are fetched in
/// batches by the driver as the stream is polled.
///
/// # Examples
///
/// ```rust,ignore
/// use futures::TryStreamExt;
///
/// let mut cursor = repo.find_by_field("city", "Oslo").await?;
/// while let Some(user) = cursor.try_next().await? {
///     println!("{}", user.name);
/// }
///
/// let everyone = repo.find_all().cursor().await?.to_vec().await?;
/// ```
pub struct ObjectCursor<T> {
    inner: BoxStream<'static, RepositoryResult<T>>,
}

impl<T> ObjectCursor<T>
where
    T: DeserializeOwned + Send + Sync + Unpin + 'static,
{
    pub(crate) fn new(cursor: Cursor<T>) -> Self {
        ObjectCursor {
            inner: cursor.map_err(RepositoryError::from).boxed(),
        }
    }
}

impl<T: Send + 'static> ObjectCursor<T> {
    /// Creates a cursor over an arbitrary stream of results.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = RepositoryResult<T>> + Send + 'static,
    {
        ObjectCursor {
            inner: stream.boxed(),
        }
    }

    /// Drains the cursor into a vector, stopping at the first error.
    pub async fn to_vec(self) -> RepositoryResult<Vec<T>> {
        self.try_collect().await
    }

    /// Returns the next entity, or `None` if the cursor is exhausted.
    pub async fn first(mut self) -> RepositoryResult<Option<T>> {
        self.try_next().await
    }
}

impl<T> Stream for ObjectCursor<T> {
    type Item = RepositoryResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
