//! Composite result of one filter manager request

use crate::filter::{UrlParameters, ViewData};
use crate::search::Document;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterManagerResponse {
    /// Documents of the current page
    pub documents: Vec<Document>,

    /// Total number of matched documents (before pagination)
    pub total: usize,

    /// Parameters reproducing the whole current selection
    pub url_parameters: UrlParameters,

    /// View data keyed by filter name, in configured order
    pub filters: IndexMap<String, ViewData>,
}

impl FilterManagerResponse {
    pub fn filter(&self, name: &str) -> Option<&ViewData> {
        self.filters.get(name)
    }

    /// Names of the filters that narrowed this result
    pub fn active_filters(&self) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|(_, data)| data.is_active())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
