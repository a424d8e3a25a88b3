use mongodb::bson::Bson;

/// Specifies the direction for sorting documents.
///
/// Used with [`crate::repository::FindOptions`] and the `sort_by` method of a
/// query handle to control result ordering.
///
/// ```text
/// let users = repo.find_all().sort_by("age", SortOrder::Descending).to_vec().await?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}

impl SortOrder {
    /// The direction value used in MongoDB sort and index key documents.
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl From<SortOrder> for Bson {
    fn from(order: SortOrder) -> Self {
        Bson::Int32(order.direction())
    }
}
