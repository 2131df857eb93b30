//! Shared fixtures: a small product catalogue and the managers built over it

#![allow(dead_code)]

use filter_manager::filter::FilterRegistry;
use filter_manager::manager::{build_managers, FilterManager, FilterManagerConfig};
use filter_manager::search::{InMemoryRepository, RepositoryMap, SearchRepository};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const CATALOGUE_CONFIG: &str = r#"
managers:
  products:
    repository: products
    filters: [category, color, price, pager]
filters:
  category:
    type: choice
    request_field: category
    field: category
    tags: [sidebar]
    relations:
      reset:
        include: [color]
  color:
    type: choice
    request_field: color
    field: color
    options:
      size: 5
  price:
    type: range
    request_field: price
    field: price
    relations:
      search:
        include: category
  pager:
    type: pager
    request_field: page
    options:
      count_per_page: 3
      max_pages: 5
"#;

pub fn products() -> Vec<Value> {
    vec![
        json!({"id": 1, "category": "shoes", "color": "red", "price": 89.0}),
        json!({"id": 2, "category": "shoes", "color": "white", "price": 65.0}),
        json!({"id": 3, "category": "shoes", "color": "brown", "price": 140.0}),
        json!({"id": 4, "category": "jackets", "color": "red", "price": 120.0}),
        json!({"id": 5, "category": "jackets", "color": "black", "price": 230.0}),
        json!({"id": 6, "category": "jackets", "color": "blue", "price": 55.0}),
        json!({"id": 7, "category": "accessories", "color": "red", "price": 19.0}),
        json!({"id": 8, "category": "accessories", "color": "brown", "price": 35.0}),
        json!({"id": 9, "category": "accessories", "color": "black", "price": 75.0}),
        json!({"id": 10, "category": "accessories", "color": "white", "price": 9.5}),
    ]
}

pub fn repositories() -> RepositoryMap {
    let mut repositories: RepositoryMap = HashMap::new();
    let repository: Arc<dyn SearchRepository> =
        Arc::new(InMemoryRepository::with_documents(products()));
    repositories.insert("products".to_string(), repository);
    repositories
}

pub fn managers() -> IndexMap<String, Arc<FilterManager>> {
    let config = FilterManagerConfig::from_yaml_str(CATALOGUE_CONFIG).unwrap();
    build_managers(&config, &FilterRegistry::with_builtin(), &repositories()).unwrap()
}

pub fn products_manager() -> Arc<FilterManager> {
    managers()["products"].clone()
}
