//! Rendering model returned to the presentation layer

use crate::filter::params::UrlParameters;
use crate::filter::state::FilterState;
use serde::Serialize;

/// Bounds computed by the engine for a range filter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeViewData {
    pub min_bound: Option<f64>,
    pub max_bound: Option<f64>,
}

/// One selectable value of a choice filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewDataChoice {
    pub label: String,
    pub count: u64,
    pub active: bool,
    /// Parameters that select this choice, or deselect it when active
    pub url_parameters: UrlParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChoicesViewData {
    pub choices: Vec<ViewDataChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagerViewData {
    pub current_page: u32,
    pub total_items: usize,
    pub items_per_page: u32,
    pub num_pages: u32,
    pub max_pages: u32,
    pub first_page: u32,
    pub last_page: u32,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub pages: Vec<u32>,
}

/// Filter-type-specific part of the view data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewDataKind {
    #[default]
    Plain,
    Range(RangeViewData),
    Choices(ChoicesViewData),
    Pager(PagerViewData),
}

/// Per-filter, per-request view data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewData {
    pub name: String,
    pub state: FilterState,
    pub tags: Vec<String>,
    /// Parameters reproducing the whole current selection
    pub url_parameters: UrlParameters,
    /// Parameters with this filter (and its reset-related filters) cleared
    pub reset_url_parameters: UrlParameters,
    pub details: ViewDataKind,
}

impl ViewData {
    /// Fresh view data with the given zero-valued details
    pub fn with_details(details: ViewDataKind) -> Self {
        Self {
            details,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn range(&self) -> Option<&RangeViewData> {
        match &self.details {
            ViewDataKind::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn choices(&self) -> Option<&ChoicesViewData> {
        match &self.details {
            ViewDataKind::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    pub fn pager(&self) -> Option<&PagerViewData> {
        match &self.details {
            ViewDataKind::Pager(pager) => Some(pager),
            _ => None,
        }
    }
}
