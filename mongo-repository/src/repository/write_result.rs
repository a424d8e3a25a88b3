use mongodb::results::UpdateResult;

/// Outcome of a multi-document field update.
///
/// `matched_count` is the number of documents selected by the filter;
/// `modified_count` is the number whose stored value actually changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteResult {
    matched_count: u64,
    modified_count: u64,
}

impl WriteResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        WriteResult {
            matched_count,
            modified_count,
        }
    }

    pub fn matched_count(&self) -> u64 {
        self.matched_count
    }

    pub fn modified_count(&self) -> u64 {
        self.modified_count
    }
}

impl From<UpdateResult> for WriteResult {
    fn from(result: UpdateResult) -> Self {
        WriteResult::new(result.matched_count, result.modified_count)
    }
}
