//! Registry of filter types, keyed by the `type` used in configuration.

use crate::error::{AppError, Result};
use crate::filter::config::FilterConfig;
use crate::filter::traits::Filter;
use crate::filter::widget::{Choice, Pager, Range};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds a filter from its configured name and configuration
pub type FilterFactory = Arc<dyn Fn(&str, FilterConfig) -> Result<Arc<dyn Filter>> + Send + Sync>;

/// Wrap a typed constructor into a [`FilterFactory`]
pub fn filter_factory<F, T>(build: F) -> FilterFactory
where
    F: Fn(&str, FilterConfig) -> Result<T> + Send + Sync + 'static,
    T: Filter + 'static,
{
    Arc::new(move |name: &str, config: FilterConfig| -> Result<Arc<dyn Filter>> {
        let filter: Arc<dyn Filter> = Arc::new(build(name, config)?);
        Ok(filter)
    })
}

/// Filter types known to the application. Built once at startup and handed to
/// whatever builds managers.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    factories: HashMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `range`, `choice` and `pager` types
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin = [
            (Range::TYPE, filter_factory(Range::new)),
            (Choice::TYPE, filter_factory(Choice::new)),
            (Pager::TYPE, filter_factory(Pager::new)),
        ];

        for (filter_type, factory) in builtin {
            registry
                .factories
                .insert(filter_type.to_string(), factory);
        }
        registry
    }

    /// Register a filter type. A type can only be registered once.
    pub fn register(&mut self, filter_type: impl Into<String>, factory: FilterFactory) -> Result<()> {
        let filter_type = filter_type.into();
        if filter_type.is_empty() {
            return Err(AppError::config("Filter type name must not be empty."));
        }
        if self.factories.contains_key(&filter_type) {
            return Err(AppError::config(format!(
                "Filter type `{}` is already defined please select different type name.",
                filter_type
            )));
        }

        info!(filter_type = %filter_type, "Registered filter type");
        self.factories.insert(filter_type, factory);
        Ok(())
    }

    /// Instantiate the filter configured under `name`
    pub fn create(&self, name: &str, config: FilterConfig) -> Result<Arc<dyn Filter>> {
        let factory = self.factories.get(&config.filter_type).ok_or_else(|| {
            AppError::config(format!(
                "Filter `{}` has unknown type `{}`.",
                name, config.filter_type
            ))
        })?;

        debug!(filter = %name, filter_type = %config.filter_type, "Creating filter");
        factory(name, config)
    }

    pub fn contains(&self, filter_type: &str) -> bool {
        self.factories.contains_key(filter_type)
    }

    /// Registered type names, sorted
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("types", &self.list_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_factory() -> FilterFactory {
        filter_factory(Range::new)
    }

    #[test]
    fn test_builtin_types() {
        let registry = FilterRegistry::with_builtin();
        assert_eq!(registry.list_types(), vec!["choice", "pager", "range"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = FilterRegistry::new();
        registry.register("slider", range_factory()).unwrap();

        let err = registry.register("slider", range_factory()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(registry.len(), 1);

        let mut builtin = FilterRegistry::with_builtin();
        assert!(builtin.register("range", range_factory()).is_err());
    }

    #[test]
    fn test_create_unknown_type_fails() {
        let registry = FilterRegistry::with_builtin();
        let err = registry
            .create("size", FilterConfig::new("slider", "size"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown type `slider`"));
    }

    #[test]
    fn test_create_builds_named_filter() {
        let registry = FilterRegistry::with_builtin();
        let filter = registry
            .create("price", FilterConfig::new("range", "p").with_field("price"))
            .unwrap();

        assert_eq!(filter.name(), "price");
        assert_eq!(filter.request_field(), "p");
        assert_eq!(filter.as_field_aware().unwrap().field(), "price");
    }
}
