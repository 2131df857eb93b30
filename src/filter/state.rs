//! Per-request filter state

use crate::filter::params::{ParamValue, UrlParameters};
use serde::{Deserialize, Serialize};

/// Normalized range selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Normalized, filter-type-specific value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    None,
    Single(String),
    List(Vec<String>),
    Range(RangeValue),
    Page(u32),
}

impl FilterValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FilterValue::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<RangeValue> {
        match self {
            FilterValue::Range(range) => Some(*range),
            _ => None,
        }
    }

    pub fn as_page(&self) -> Option<u32> {
        match self {
            FilterValue::Page(page) => Some(*page),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FilterValue::None)
    }
}

impl From<ParamValue> for FilterValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Single(value) => FilterValue::Single(value),
            ParamValue::List(values) => FilterValue::List(values),
        }
    }
}

/// Whether a filter narrows the current request, with what value, and which
/// parameters reproduce it.
///
/// An inactive state may still carry a value and url parameters; neither is
/// authoritative until `active` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub active: bool,
    pub value: FilterValue,
    pub url_parameters: UrlParameters,
}

impl FilterState {
    /// Inactive state with no value
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active_with(value: FilterValue, url_parameters: UrlParameters) -> Self {
        Self {
            active: true,
            value,
            url_parameters,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Same value and parameters, forced inactive
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_inactive() {
        let state = FilterState::default();
        assert!(!state.is_active());
        assert!(state.value.is_none());
        assert!(state.url_parameters.is_empty());
        assert_eq!(state, FilterState::inactive());
    }

    #[test]
    fn test_deactivated_keeps_value() {
        let mut params = UrlParameters::new();
        params.insert("color".to_string(), ParamValue::from("red"));

        let state = FilterState::active_with(FilterValue::Single("red".into()), params).deactivated();

        assert!(!state.active);
        assert_eq!(state.value.as_single(), Some("red"));
        assert_eq!(state.url_parameters.len(), 1);
    }

    #[test]
    fn test_serialize_range_value() {
        let value = FilterValue::Range(RangeValue {
            lower_bound: 10.0,
            upper_bound: 50.0,
        });
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"lower_bound": 10.0, "upper_bound": 50.0}));
    }
}
