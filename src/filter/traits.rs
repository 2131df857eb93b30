//! Filter capability traits

use crate::filter::config::FilterConfig;
use crate::filter::params::RequestParams;
use crate::filter::state::FilterState;
use crate::filter::view_data::ViewData;
use crate::search::{SearchRequest, SearchResponse};

/// Which search result a filter renders its view data from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// The filter's own related search (aggregations unaffected by its narrowing)
    Related,
    /// The main search (hits, totals)
    Main,
}

/// A configured unit turning one request parameter into search narrowing and
/// view data.
///
/// Implementations are immutable after construction and shared between
/// concurrent requests; all per-request data lives in [`FilterState`].
pub trait Filter: Send + Sync {
    /// Configured name
    fn name(&self) -> &str;

    /// Configuration captured at construction
    fn config(&self) -> &FilterConfig;

    fn request_field(&self) -> &str {
        &self.config().request_field
    }

    fn tags(&self) -> &[String] {
        &self.config().tags
    }

    /// Derive the state from request parameters. Never fails: malformed input
    /// yields an inactive state.
    fn state(&self, params: &dyn RequestParams) -> FilterState;

    /// Register whatever the filter needs computed before rendering (aggregations
    /// on `related`, pagination on `main`). Called once per request, whether or
    /// not the filter is active.
    fn pre_process_search(
        &self,
        _main: &mut SearchRequest,
        _related: &mut SearchRequest,
        _state: &FilterState,
    ) {
    }

    /// Add the narrowing clause for an active state. No-op when inactive.
    fn modify_search(&self, search: &mut SearchRequest, state: &FilterState);

    /// Populate the type-specific part of `data` from search output
    fn view_data(&self, result: &SearchResponse, data: ViewData) -> ViewData {
        let _ = result;
        data
    }

    fn result_source(&self) -> ResultSource {
        ResultSource::Related
    }

    fn as_field_aware(&self) -> Option<&dyn FieldAware> {
        None
    }

    fn as_view_data_factory(&self) -> Option<&dyn ViewDataFactory> {
        None
    }
}

/// Filters whose clause or aggregation targets one document field
pub trait FieldAware {
    fn field(&self) -> &str;

    fn set_field(&mut self, field: String);
}

/// Filters that render into a type-specific view data
pub trait ViewDataFactory {
    /// Fresh, zero-valued view data of the filter's kind
    fn create_view_data(&self) -> ViewData;
}
