//! Per-filter configuration record

use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Configuration of one named filter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterConfig {
    /// Registered filter type (`range`, `choice`, `pager`, ...)
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "filter type must not be empty"))]
    pub filter_type: String,

    /// URL query parameter name
    #[validate(length(min = 1, message = "request_field must not be empty"))]
    pub request_field: String,

    /// Document field name
    #[serde(default)]
    pub field: Option<String>,

    /// Filter tags that will be passed to view data
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub relations: RelationsConfig,

    /// Additional options passed through to the filter type
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

impl FilterConfig {
    pub fn new(filter_type: impl Into<String>, request_field: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            request_field: request_field.into(),
            field: None,
            tags: Vec::new(),
            relations: RelationsConfig::default(),
            options: HashMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_search_relation(mut self, relation: RelationConfig) -> Self {
        self.relations.search = Some(relation);
        self
    }

    pub fn with_reset_relation(mut self, relation: RelationConfig) -> Self {
        self.relations.reset = Some(relation);
        self
    }

    /// Target field, required by field-aware filter types
    pub fn required_field(&self, name: &str) -> Result<&str> {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => Ok(field),
            _ => Err(AppError::config(format!(
                "Filter `{}` of type `{}` must have `field` set.",
                name, self.filter_type
            ))),
        }
    }

    /// Deserialize the free-form options into a typed options struct
    pub fn options_as<T>(&self, name: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let map: serde_json::Map<String, serde_json::Value> = self
            .options
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| {
            AppError::config(format!("Invalid options for filter `{}`: {}", name, e))
        })
    }
}

/// `search` and `reset` relations of a filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationsConfig {
    #[serde(default)]
    pub search: Option<RelationConfig>,

    #[serde(default)]
    pub reset: Option<RelationConfig>,
}

/// Include or exclude list of filter names. Accepts a single name or a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationConfig {
    #[serde(default, deserialize_with = "one_or_many")]
    pub include: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub exclude: Vec<String>,
}

impl RelationConfig {
    pub fn include(names: Vec<impl Into<String>>) -> Self {
        Self {
            include: names.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude(names: Vec<impl Into<String>>) -> Self {
        Self {
            include: Vec::new(),
            exclude: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exactly one of `include` / `exclude` must be set
    pub fn validate(&self) -> Result<()> {
        match (self.include.is_empty(), self.exclude.is_empty()) {
            (true, true) => Err(AppError::config(
                "Relation must have \"include\" or \"exclude\" fields specified.",
            )),
            (false, false) => Err(AppError::config(
                "Relation must have only \"include\" or \"exclude\" fields specified.",
            )),
            _ => Ok(()),
        }
    }

    /// Every filter name mentioned by this relation
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.include.iter().chain(self.exclude.iter())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}
