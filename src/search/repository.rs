//! Repository trait abstraction

use crate::search::error::SearchResult;
use crate::search::request::SearchRequest;
use crate::search::response::SearchResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A document repository that can execute search requests
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Execute a search request
    async fn execute(&self, request: &SearchRequest) -> SearchResult<SearchResponse>;
}

/// Repositories keyed by the name managers refer to them with
pub type RepositoryMap = HashMap<String, Arc<dyn SearchRepository>>;
