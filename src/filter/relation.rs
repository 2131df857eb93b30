//! Cross-filter relations

use crate::filter::config::{RelationConfig, RelationsConfig};
use std::collections::HashSet;

/// Include or exclude set of filter names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Include(HashSet<String>),
    Exclude(HashSet<String>),
}

impl Relation {
    /// `None` for an unset relation. Assumes the config was validated.
    pub fn from_config(config: Option<&RelationConfig>) -> Option<Self> {
        let config = config?;
        if !config.include.is_empty() {
            Some(Relation::Include(config.include.iter().cloned().collect()))
        } else if !config.exclude.is_empty() {
            Some(Relation::Exclude(config.exclude.iter().cloned().collect()))
        } else {
            None
        }
    }

    /// Whether `name` falls under this relation
    pub fn is_related(&self, name: &str) -> bool {
        match self {
            Relation::Include(names) => names.contains(name),
            Relation::Exclude(names) => !names.contains(name),
        }
    }

    /// Activation gate: `Include` needs every listed filter active, `Exclude`
    /// needs none of them active.
    pub fn permits(&self, active: &HashSet<String>) -> bool {
        match self {
            Relation::Include(required) => required.iter().all(|name| active.contains(name)),
            Relation::Exclude(blocked) => blocked.iter().all(|name| !active.contains(name)),
        }
    }
}

/// Resolved `search` and `reset` relations of one filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRelations {
    pub search: Option<Relation>,
    pub reset: Option<Relation>,
}

impl FilterRelations {
    pub fn from_config(config: &RelationsConfig) -> Self {
        Self {
            search: Relation::from_config(config.search.as_ref()),
            reset: Relation::from_config(config.reset.as_ref()),
        }
    }

    /// Whether the filter may stay active given the currently active filters
    pub fn permits_search(&self, active: &HashSet<String>) -> bool {
        self.search
            .as_ref()
            .map_or(true, |relation| relation.permits(active))
    }

    /// Whether resetting this filter also resets `other`
    pub fn resets(&self, other: &str) -> bool {
        self.reset
            .as_ref()
            .is_some_and(|relation| relation.is_related(other))
    }
}
