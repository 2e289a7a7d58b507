use async_trait::async_trait;

use crate::domain::change::RevisionRange;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Paths touched between the two revisions, in the order git reports them.
    async fn changed_files(&self, range: &RevisionRange) -> AppResult<Vec<String>>;
    async fn file_diff(&self, range: &RevisionRange, file: &str) -> AppResult<String>;
    async fn name_status(&self, range: &RevisionRange) -> AppResult<String>;
    async fn commit_log(&self, range: &RevisionRange) -> AppResult<String>;
}
