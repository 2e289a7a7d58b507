use async_trait::async_trait;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;
}
