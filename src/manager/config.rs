//! Filter manager configuration

use crate::error::Result;
use crate::filter::FilterConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `filter_manager` section: managers and the filters they use
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterManagerConfig {
    #[serde(default)]
    pub managers: IndexMap<String, ManagerConfig>,

    #[serde(default)]
    pub filters: IndexMap<String, FilterConfig>,
}

impl FilterManagerConfig {
    /// Parse the section from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn with_filter(mut self, name: impl Into<String>, filter: FilterConfig) -> Self {
        self.filters.insert(name.into(), filter);
        self
    }

    pub fn with_manager(mut self, name: impl Into<String>, manager: ManagerConfig) -> Self {
        self.managers.insert(name.into(), manager);
        self
    }
}

/// One manager: an ordered list of filter names and the repository to search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ManagerConfig {
    /// Filter names to include in manager
    #[serde(default)]
    pub filters: Vec<String>,

    /// Repository used for fetching data
    #[validate(length(min = 1, message = "repository must not be empty"))]
    pub repository: String,

    /// Related searches executed at once per request
    #[serde(default = "default_max_concurrent_searches")]
    #[validate(range(min = 1, message = "max_concurrent_searches must be at least 1"))]
    pub max_concurrent_searches: usize,
}

impl ManagerConfig {
    pub fn new(repository: impl Into<String>, filters: Vec<impl Into<String>>) -> Self {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            repository: repository.into(),
            max_concurrent_searches: default_max_concurrent_searches(),
        }
    }
}

fn default_max_concurrent_searches() -> usize {
    crate::manager::manager::DEFAULT_MAX_CONCURRENT_SEARCHES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_preserves_order() {
        let yaml = r#"
managers:
  products:
    repository: default
    filters: [color, price, pager]
filters:
  price:
    type: range
    request_field: price
    field: price
  color:
    type: choice
    request_field: color
    field: color
    tags: [sidebar]
  pager:
    type: pager
    request_field: page
    options:
      count_per_page: 12
"#;
        let config = FilterManagerConfig::from_yaml_str(yaml).unwrap();

        let manager = &config.managers["products"];
        assert_eq!(manager.filters, vec!["color", "price", "pager"]);
        assert_eq!(manager.repository, "default");
        assert_eq!(manager.max_concurrent_searches, 8);
        assert_eq!(
            config.filters.keys().collect::<Vec<_>>(),
            vec!["price", "color", "pager"]
        );
        assert_eq!(config.filters["color"].tags, vec!["sidebar"]);
        assert_eq!(
            config.filters["pager"].options["count_per_page"],
            serde_json::json!(12)
        );
    }

    #[test]
    fn test_missing_repository_is_error() {
        let yaml = "managers:\n  products:\n    filters: [price]\n";
        assert!(FilterManagerConfig::from_yaml_str(yaml).is_err());
    }
}
