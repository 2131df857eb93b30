//! Configuration-driven search filters.
//!
//! A [`manager::FilterManager`] owns an ordered set of [`filter::Filter`]s and
//! a [`search::SearchRepository`]. For each request it derives every filter's
//! state from the request parameters, narrows a main search, runs one related
//! search per filter for its aggregations, and returns the matched documents
//! together with view data for rendering every filter.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod manager;
pub mod search;

pub use error::{AppError, Result};
pub use filter::{Filter, FilterConfig, FilterRegistry, FilterState, QueryParams, ViewData};
pub use manager::{build_managers, FilterManager, FilterManagerConfig, FilterManagerResponse};
pub use search::{InMemoryRepository, SearchRepository, SearchRequest, SearchResponse};
