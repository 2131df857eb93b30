//! Ordered collection of a manager's filters

use crate::filter::{Filter, FilterRelations, FilterState, RequestParams};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// A filter together with its resolved relations
#[derive(Clone)]
pub struct FilterEntry {
    pub filter: Arc<dyn Filter>,
    pub relations: FilterRelations,
}

/// Filters keyed by configured name, in configured order
#[derive(Clone, Default)]
pub struct FilterContainer {
    filters: IndexMap<String, FilterEntry>,
}

impl FilterContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a filter
    pub fn set(&mut self, name: impl Into<String>, filter: Arc<dyn Filter>, relations: FilterRelations) {
        self.filters
            .insert(name.into(), FilterEntry { filter, relations });
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.get(name).map(|entry| &entry.filter)
    }

    pub fn entry(&self, name: &str) -> Option<&FilterEntry> {
        self.filters.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterEntry)> {
        self.filters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.filters.keys()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Compute every filter's state and apply search-relation gating.
    ///
    /// Gating runs once, in configured order. Each filter is checked against
    /// every filter whose raw state is active, minus those already forced
    /// inactive earlier in the pass. Later filters count with their raw state.
    pub fn states(&self, params: &dyn RequestParams) -> IndexMap<String, FilterState> {
        let mut states: IndexMap<String, FilterState> = self
            .filters
            .iter()
            .map(|(name, entry)| (name.clone(), entry.filter.state(params)))
            .collect();

        let mut active: HashSet<String> = states
            .iter()
            .filter(|(_, state)| state.active)
            .map(|(name, _)| name.clone())
            .collect();

        for (name, entry) in &self.filters {
            let Some(state) = states.get_mut(name) else {
                continue;
            };
            if !state.active {
                continue;
            }
            if !entry.relations.permits_search(&active) {
                warn!(filter = %name, "Filter forced inactive by search relation");
                state.active = false;
                active.remove(name);
            } else {
                debug!(filter = %name, value = ?state.value, "Filter active");
            }
        }

        states
    }
}

impl std::fmt::Debug for FilterContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContainer")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}
