//! Search results as returned by a repository

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw document as stored in the repository
pub type Document = serde_json::Value;

/// Statistics over a numeric field. Bounds are `None` when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsValue {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub sum: f64,
}

/// One terms-aggregation bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

/// Computed aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationResult {
    Stats(StatsValue),
    Terms { buckets: Vec<Bucket> },
}

impl AggregationResult {
    pub fn as_stats(&self) -> Option<&StatsValue> {
        match self {
            AggregationResult::Stats(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        match self {
            AggregationResult::Terms { buckets } => buckets,
            _ => &[],
        }
    }
}

/// Search response with hits and aggregations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Documents of the requested page
    pub hits: Vec<Document>,

    /// Total number of hits (before pagination)
    pub total: usize,

    /// Aggregations keyed by the name they were requested under
    pub aggregations: HashMap<String, AggregationResult>,
}

impl SearchResponse {
    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.hits.iter()
    }
}
