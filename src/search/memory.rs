//! In-memory repository over JSON documents.
//!
//! Mirrors Elasticsearch semantics closely enough for the filter protocol:
//! query clauses narrow hits and aggregations, post filters narrow hits only.

use crate::search::error::{SearchError, SearchResult};
use crate::search::repository::SearchRepository;
use crate::search::request::{AggregationRequest, Clause, SearchRequest};
use crate::search::response::{AggregationResult, Bucket, Document, SearchResponse, StatsValue};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// In-memory document repository (for demos and testing)
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    /// Load a JSON array of documents from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)?;

        match value {
            Value::Array(documents) => {
                tracing::info!(path = ?path, documents = documents.len(), "Loaded documents");
                Ok(Self::with_documents(documents))
            }
            _ => Err(SearchError::LoadFailed(format!(
                "{} must contain a JSON array of documents",
                path.display()
            ))),
        }
    }

    pub fn insert(&self, document: Document) {
        self.documents.write().push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait]
impl SearchRepository for InMemoryRepository {
    async fn execute(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let documents = self.documents.read();

        let matched: Vec<&Document> = documents
            .iter()
            .filter(|doc| request.query.iter().all(|clause| matches(doc, clause)))
            .collect();

        let aggregations = request
            .aggregations
            .iter()
            .map(|(name, aggregation)| (name.clone(), aggregate(&matched, aggregation)))
            .collect();

        let hits: Vec<&Document> = matched
            .into_iter()
            .filter(|doc| request.post_filters.iter().all(|clause| matches(doc, clause)))
            .collect();

        let total = hits.len();
        let size = request.size.unwrap_or(total);
        let hits = hits
            .into_iter()
            .skip(request.from)
            .take(size)
            .cloned()
            .collect();

        tracing::debug!(
            total = total,
            query_clauses = request.query.len(),
            post_filters = request.post_filters.len(),
            aggregations = request.aggregations.len(),
            "In-memory search executed"
        );

        Ok(SearchResponse {
            hits,
            total,
            aggregations,
        })
    }
}

/// Collect every scalar under a dotted path, flattening arrays
fn field_values<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for segment in path.split('.') {
        current = current
            .into_iter()
            .filter_map(|value| value.get(segment))
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .collect();
    }
    current
}

fn as_term(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn matches(doc: &Value, clause: &Clause) -> bool {
    let values = field_values(doc, clause.field());
    match clause {
        Clause::Range(range) => values
            .into_iter()
            .filter_map(as_number)
            .any(|v| range.contains(v)),
        Clause::Term { value, .. } => values
            .into_iter()
            .filter_map(as_term)
            .any(|term| &term == value),
        Clause::Terms { values: wanted, .. } => values
            .into_iter()
            .filter_map(as_term)
            .any(|term| wanted.contains(&term)),
    }
}

fn aggregate(docs: &[&Document], aggregation: &AggregationRequest) -> AggregationResult {
    match aggregation {
        AggregationRequest::Stats { field } => {
            let numbers: Vec<f64> = docs
                .iter()
                .flat_map(|doc| field_values(doc, field))
                .filter_map(as_number)
                .collect();

            let count = numbers.len() as u64;
            let sum: f64 = numbers.iter().sum();
            let min = numbers.iter().copied().reduce(f64::min);
            let max = numbers.iter().copied().reduce(f64::max);
            let avg = (count > 0).then(|| sum / count as f64);

            AggregationResult::Stats(StatsValue {
                count,
                min,
                max,
                avg,
                sum,
            })
        }
        AggregationRequest::Terms { field, size } => {
            let mut counts: HashMap<String, u64> = HashMap::new();
            for doc in docs {
                // a document counts once per distinct term
                let mut terms: Vec<String> = field_values(doc, field)
                    .into_iter()
                    .filter_map(as_term)
                    .collect();
                terms.sort();
                terms.dedup();
                for term in terms {
                    *counts.entry(term).or_insert(0) += 1;
                }
            }

            let mut buckets: Vec<Bucket> = counts
                .into_iter()
                .map(|(key, doc_count)| Bucket { key, doc_count })
                .collect();
            buckets.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.key.cmp(&b.key)));
            if let Some(size) = size {
                buckets.truncate(*size);
            }

            AggregationResult::Terms { buckets }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn products() -> InMemoryRepository {
        InMemoryRepository::with_documents(vec![
            json!({"id": 1, "price": 5.0, "color": "red", "tags": ["a", "b"]}),
            json!({"id": 2, "price": 20.0, "color": "blue", "tags": ["b"]}),
            json!({"id": 3, "price": 45.0, "color": "red"}),
            json!({"id": 4, "price": 80.0, "color": "green", "meta": {"brand": "acme"}}),
        ])
    }

    #[tokio::test]
    async fn test_post_filter_does_not_narrow_aggregations() {
        let repo = products();
        let mut request = SearchRequest::new();
        request
            .add_post_filter(Clause::range("price", 10.0, 50.0))
            .add_aggregation("range_agg", AggregationRequest::Stats { field: "price".into() });

        let response = repo.execute(&request).await.unwrap();

        assert_eq!(response.total, 2);
        let stats = response.aggregation("range_agg").unwrap().as_stats().unwrap();
        assert_eq!(stats.min, Some(5.0));
        assert_eq!(stats.max, Some(80.0));
        assert_eq!(stats.count, 4);
    }

    #[tokio::test]
    async fn test_query_narrows_aggregations() {
        let repo = products();
        let mut request = SearchRequest::new();
        request
            .add_query(Clause::term("color", "red"))
            .add_aggregation("range_agg", AggregationRequest::Stats { field: "price".into() });

        let response = repo.execute(&request).await.unwrap();
        let stats = response.aggregation("range_agg").unwrap().as_stats().unwrap();

        assert_eq!(stats.min, Some(5.0));
        assert_eq!(stats.max, Some(45.0));
        assert_eq!(stats.avg, Some(25.0));
    }

    #[tokio::test]
    async fn test_terms_buckets_sorted_by_count() {
        let repo = products();
        let mut request = SearchRequest::new();
        request.add_aggregation(
            "choice_agg",
            AggregationRequest::Terms {
                field: "color".into(),
                size: None,
            },
        );

        let response = repo.execute(&request).await.unwrap();
        let buckets = response.aggregation("choice_agg").unwrap().buckets();

        assert_eq!(buckets[0], Bucket { key: "red".into(), doc_count: 2 });
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[1].key, "blue");
    }

    #[tokio::test]
    async fn test_nested_and_array_fields() {
        let repo = products();
        let mut request = SearchRequest::new();
        request.add_post_filter(Clause::term("meta.brand", "acme"));
        assert_eq!(repo.execute(&request).await.unwrap().total, 1);

        let mut request = SearchRequest::new();
        request.add_post_filter(Clause::terms("tags", vec!["b".into()]));
        assert_eq!(repo.execute(&request).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = products();
        let mut request = SearchRequest::new();
        request.set_pagination(1, 2);

        let response = repo.execute(&request).await.unwrap();

        assert_eq!(response.total, 4);
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.hits[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_stats_on_empty_match() {
        let repo = products();
        let mut request = SearchRequest::new();
        request
            .add_query(Clause::term("color", "purple"))
            .add_aggregation("range_agg", AggregationRequest::Stats { field: "price".into() });

        let response = repo.execute(&request).await.unwrap();
        let stats = response.aggregation("range_agg").unwrap().as_stats().unwrap();

        assert_eq!(stats.count, 0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.avg, None);
    }

    #[test]
    fn test_from_json_file_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();

        let err = InMemoryRepository::from_json_file(&path).err().unwrap();
        assert!(matches!(err, SearchError::LoadFailed(_)));
    }

    #[tokio::test]
    async fn test_non_finite_strings_are_not_numbers() {
        let repo = InMemoryRepository::with_documents(vec![
            json!({"price": "NaN"}),
            json!({"price": "inf"}),
            json!({"price": " 12.5 "}),
            json!({"price": 30}),
        ]);
        let mut request = SearchRequest::new();
        request
            .add_query(Clause::range("price", 0.0, 100.0))
            .add_aggregation("range_agg", AggregationRequest::Stats { field: "price".into() });

        let response = repo.execute(&request).await.unwrap();
        assert_eq!(response.total, 2);

        let stats = response.aggregation("range_agg").unwrap().as_stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, 42.5);
        assert_eq!(stats.avg, Some(21.25));
    }
}
