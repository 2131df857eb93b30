//! Request parameter access

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw request value: a scalar or a list of scalars (`key[]=a&key[]=b`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }

    /// Empty string, empty list, or a list of empty strings
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::List(values) => values.iter().all(String::is_empty),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

/// Parameters that reproduce a filter state when resubmitted
pub type UrlParameters = IndexMap<String, ParamValue>;

/// Read-only, untrusted source of request parameters
pub trait RequestParams: Send + Sync {
    fn get(&self, name: &str) -> Option<ParamValue>;
}

impl RequestParams for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<ParamValue> {
        HashMap::get(self, name).map(|value| ParamValue::Single(value.clone()))
    }
}

impl RequestParams for HashMap<String, ParamValue> {
    fn get(&self, name: &str) -> Option<ParamValue> {
        HashMap::get(self, name).cloned()
    }
}

/// Parameters parsed from a URL query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: IndexMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b[]=2&b[]=3`. Repeated plain keys keep the last value.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.strip_suffix("[]") {
                Some(list_key) => {
                    let entry = params
                        .values
                        .entry(list_key.to_string())
                        .or_insert_with(|| ParamValue::List(Vec::new()));
                    match entry {
                        ParamValue::List(values) => values.push(value.into_owned()),
                        single => *single = ParamValue::List(vec![value.into_owned()]),
                    }
                }
                None => {
                    params
                        .values
                        .insert(key.into_owned(), ParamValue::Single(value.into_owned()));
                }
            }
        }
        params
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl RequestParams for QueryParams {
    fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).cloned()
    }
}

impl From<UrlParameters> for QueryParams {
    fn from(values: UrlParameters) -> Self {
        Self { values }
    }
}
