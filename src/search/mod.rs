//! Search-engine abstraction the filters talk to.
//!
//! Filters never talk to an engine directly. They mutate a [`SearchRequest`]
//! (narrowing clauses, aggregation requests, pagination) and read a
//! [`SearchResponse`] (hits, totals, aggregation results). A
//! [`SearchRepository`] executes one against the other.
//!
//! ```text
//!   Filter ──modify/pre-process──▶ SearchRequest
//!                                       │
//!                                       ▼
//!                               SearchRepository::execute
//!                                       │
//!   Filter ◀──────view data─────── SearchResponse
//! ```
//!
//! [`InMemoryRepository`] implements the repository over JSON documents with
//! Elasticsearch-like post filter semantics.

mod error;
mod memory;
mod repository;
mod request;
mod response;

pub use error::{SearchError, SearchResult};
pub use memory::InMemoryRepository;
pub use repository::{RepositoryMap, SearchRepository};
pub use request::{AggregationRequest, Clause, RangeClause, SearchRequest};
pub use response::{AggregationResult, Bucket, Document, SearchResponse, StatsValue};
