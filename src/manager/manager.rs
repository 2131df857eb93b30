//! Runs a named collection of filters against one repository

use crate::error::Result;
use crate::filter::{FilterState, RequestParams, ResultSource, UrlParameters};
use crate::manager::container::{FilterContainer, FilterEntry};
use crate::manager::response::FilterManagerResponse;
use crate::search::{SearchError, SearchRepository, SearchRequest, SearchResponse};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Default number of related searches executed at once
pub const DEFAULT_MAX_CONCURRENT_SEARCHES: usize = 8;

/// Searches to execute for one request
#[derive(Debug, Clone)]
pub struct SearchPlan {
    /// Gated filter states, in configured order
    pub states: IndexMap<String, FilterState>,

    /// Narrowed by every active filter
    pub main: SearchRequest,

    /// Per-filter aggregation searches, narrowed by every other active filter
    pub related: IndexMap<String, SearchRequest>,
}

pub struct FilterManager {
    name: String,
    container: FilterContainer,
    repository: Arc<dyn SearchRepository>,
    max_concurrent_searches: usize,
}

impl FilterManager {
    pub fn new(
        name: impl Into<String>,
        container: FilterContainer,
        repository: Arc<dyn SearchRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            container,
            repository,
            max_concurrent_searches: DEFAULT_MAX_CONCURRENT_SEARCHES,
        }
    }

    pub fn with_max_concurrent_searches(mut self, max: usize) -> Self {
        self.max_concurrent_searches = max.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filters(&self) -> &FilterContainer {
        &self.container
    }

    /// Compute states and build every search request, without executing
    pub fn plan(&self, params: &dyn RequestParams) -> SearchPlan {
        let states = self.container.states(params);
        let mut main = SearchRequest::new();
        let mut related_searches = IndexMap::new();

        for (name, entry) in self.container.iter() {
            let mut related = SearchRequest::new();
            for (other_name, other) in self.container.iter() {
                if other_name != name {
                    other.filter.modify_search(&mut related, &states[other_name]);
                }
            }
            // other filters' narrowing must reach the aggregations
            related.promote_post_filters();
            related.size = Some(0);

            entry
                .filter
                .pre_process_search(&mut main, &mut related, &states[name]);

            if entry.filter.result_source() == ResultSource::Related {
                related_searches.insert(name.clone(), related);
            }
        }

        for (name, entry) in self.container.iter() {
            entry.filter.modify_search(&mut main, &states[name]);
        }

        SearchPlan {
            states,
            main,
            related: related_searches,
        }
    }

    /// Run the full filter protocol for one request
    pub async fn handle_request(&self, params: &dyn RequestParams) -> Result<FilterManagerResponse> {
        use futures::stream::{self, StreamExt, TryStreamExt};

        let plan = self.plan(params);
        debug!(
            manager = %self.name,
            related_searches = plan.related.len(),
            post_filters = plan.main.post_filters.len(),
            "Executing filter manager searches"
        );

        let SearchPlan {
            states,
            main: main_request,
            related,
        } = plan;

        let related = stream::iter(related)
            .map(|(name, request)| {
                let repository = Arc::clone(&self.repository);
                async move {
                    let response = repository.execute(&request).await?;
                    Ok::<_, SearchError>((name, response))
                }
            })
            .buffer_unordered(self.max_concurrent_searches)
            .try_collect::<HashMap<String, SearchResponse>>();

        let (related, main) = futures::join!(related, self.repository.execute(&main_request));

        let related = related.inspect_err(|e| {
            error!(manager = %self.name, error = %e, "Related search failed");
        })?;
        let main = main.inspect_err(|e| {
            error!(manager = %self.name, error = %e, "Main search failed");
        })?;

        let url_parameters = Self::url_parameters(&states);
        let mut filters = IndexMap::with_capacity(self.container.len());

        for (name, entry) in self.container.iter() {
            let mut data = entry
                .filter
                .as_view_data_factory()
                .map(|factory| factory.create_view_data())
                .unwrap_or_default();
            data.name = name.clone();
            data.state = states[name].clone();
            data.tags = entry.filter.tags().to_vec();
            data.url_parameters = url_parameters.clone();
            data.reset_url_parameters = Self::reset_url_parameters(name, entry, &states);

            let result = match entry.filter.result_source() {
                ResultSource::Related => related.get(name).unwrap_or(&main),
                ResultSource::Main => &main,
            };

            filters.insert(name.clone(), entry.filter.view_data(result, data));
        }

        Ok(FilterManagerResponse {
            documents: main.hits,
            total: main.total,
            url_parameters,
            filters,
        })
    }

    /// Union of every active filter's url parameters
    fn url_parameters(states: &IndexMap<String, FilterState>) -> UrlParameters {
        states
            .values()
            .filter(|state| state.active)
            .flat_map(|state| state.url_parameters.clone())
            .collect()
    }

    /// Url parameters with `name` and the filters its reset relation covers
    /// left out
    fn reset_url_parameters(
        name: &str,
        entry: &FilterEntry,
        states: &IndexMap<String, FilterState>,
    ) -> UrlParameters {
        states
            .iter()
            .filter(|(other, state)| {
                state.active && other.as_str() != name && !entry.relations.resets(other)
            })
            .flat_map(|(_, state)| state.url_parameters.clone())
            .collect()
    }
}

impl std::fmt::Debug for FilterManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterManager")
            .field("name", &self.name)
            .field("filters", &self.container)
            .field("max_concurrent_searches", &self.max_concurrent_searches)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Choice, FilterConfig, FilterRelations, QueryParams, Range};
    use crate::search::{AggregationRequest, Clause, InMemoryRepository};
    use serde_json::json;

    fn manager() -> FilterManager {
        let mut container = FilterContainer::new();
        container.set(
            "color",
            Arc::new(Choice::new("color", FilterConfig::new("choice", "color").with_field("color")).unwrap()),
            FilterRelations::default(),
        );
        container.set(
            "price",
            Arc::new(Range::new("price", FilterConfig::new("range", "price").with_field("price")).unwrap()),
            FilterRelations::default(),
        );
        let repository = InMemoryRepository::with_documents(vec![
            json!({"color": "red", "price": 10.0}),
            json!({"color": "blue", "price": 25.0}),
            json!({"color": "red", "price": 40.0}),
        ]);
        FilterManager::new("products", container, Arc::new(repository))
    }

    #[test]
    fn test_plan_main_search_narrowed_by_active_filters() {
        let plan = manager().plan(&QueryParams::parse("color=red&price=10%3B30"));

        assert_eq!(plan.main.post_filters.len(), 2);
        assert!(plan.main.query.is_empty());
        assert!(plan.main.aggregations.is_empty());
    }

    #[test]
    fn test_plan_related_search_excludes_own_narrowing() {
        let plan = manager().plan(&QueryParams::parse("color=red&price=10%3B30"));

        let related = &plan.related["price"];
        assert_eq!(related.query, vec![Clause::term("color", "red")]);
        assert!(related.post_filters.is_empty());
        assert_eq!(related.size, Some(0));
        assert!(matches!(
            related.aggregation(crate::filter::RANGE_AGGREGATION),
            Some(AggregationRequest::Stats { .. })
        ));

        let related = &plan.related["color"];
        assert_eq!(related.query, vec![Clause::range("price", 10.0, 30.0)]);
    }

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_handle_request_future_is_send() {
        let manager = manager();
        let params = QueryParams::parse("color=red");
        assert_send(manager.handle_request(&params));
    }

    #[tokio::test]
    async fn test_handle_request_builds_response() {
        let response = manager()
            .handle_request(&QueryParams::parse("color=red"))
            .await
            .unwrap();

        assert_eq!(response.total, 2);
        assert_eq!(response.documents.len(), 2);
        assert_eq!(response.active_filters(), vec!["color"]);

        let price = response.filter("price").unwrap().range().unwrap();
        assert_eq!(price.min_bound, Some(10.0));
        assert_eq!(price.max_bound, Some(40.0));
    }
}
