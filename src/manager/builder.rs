//! Turns a [`FilterManagerConfig`] into ready-to-use managers.
//!
//! Every configuration problem is reported here, at startup, and never while
//! serving a request.

use crate::error::{AppError, Result};
use crate::filter::{FilterRegistry, FilterRelations};
use crate::manager::config::FilterManagerConfig;
use crate::manager::container::FilterContainer;
use crate::manager::manager::FilterManager;
use crate::search::RepositoryMap;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Validate the configuration and build every configured manager
pub fn build_managers(
    config: &FilterManagerConfig,
    registry: &FilterRegistry,
    repositories: &RepositoryMap,
) -> Result<IndexMap<String, Arc<FilterManager>>> {
    if config.filters.is_empty() {
        return Err(AppError::config("At least one filter must be configured."));
    }
    if config.managers.is_empty() {
        return Err(AppError::config("At least one manager must be configured."));
    }

    validate_filters(config, registry)?;

    let mut managers = IndexMap::with_capacity(config.managers.len());
    for (manager_name, manager_config) in &config.managers {
        manager_config.validate()?;

        let repository = repositories.get(&manager_config.repository).ok_or_else(|| {
            AppError::config(format!(
                "Manager `{}` uses unknown repository `{}`.",
                manager_name, manager_config.repository
            ))
        })?;

        let mut container = FilterContainer::new();
        for filter_name in &manager_config.filters {
            if container.entry(filter_name).is_some() {
                return Err(AppError::config(format!(
                    "Manager `{}` lists filter `{}` more than once.",
                    manager_name, filter_name
                )));
            }
            let filter_config = config.filters.get(filter_name).ok_or_else(|| {
                AppError::config(format!(
                    "Manager `{}` uses undefined filter `{}`.",
                    manager_name, filter_name
                ))
            })?;

            let filter = registry.create(filter_name, filter_config.clone())?;
            let relations = FilterRelations::from_config(&filter_config.relations);
            container.set(filter_name.clone(), filter, relations);
        }

        info!(
            manager = %manager_name,
            repository = %manager_config.repository,
            filters = container.len(),
            "Filter manager built"
        );

        let manager = FilterManager::new(manager_name.clone(), container, Arc::clone(repository))
            .with_max_concurrent_searches(manager_config.max_concurrent_searches);
        managers.insert(manager_name.clone(), Arc::new(manager));
    }

    Ok(managers)
}

fn validate_filters(config: &FilterManagerConfig, registry: &FilterRegistry) -> Result<()> {
    let known: HashSet<&str> = config.filters.keys().map(String::as_str).collect();

    for (name, filter) in &config.filters {
        filter.validate()?;

        if !registry.contains(&filter.filter_type) {
            return Err(AppError::config(format!(
                "Filter `{}` has unknown type `{}`.",
                name, filter.filter_type
            )));
        }

        for relation in [&filter.relations.search, &filter.relations.reset]
            .into_iter()
            .flatten()
        {
            relation.validate()?;
            if let Some(unknown) = relation.names().find(|other| !known.contains(other.as_str())) {
                return Err(AppError::config(format!(
                    "Filter `{}` has a relation to undefined filter `{}`.",
                    name, unknown
                )));
            }
        }
    }

    Ok(())
}
