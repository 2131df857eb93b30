//! Pager filter, paginates the main search and renders page navigation.

use crate::error::{AppError, Result};
use crate::filter::config::FilterConfig;
use crate::filter::params::{ParamValue, RequestParams};
use crate::filter::state::{FilterState, FilterValue};
use crate::filter::traits::{Filter, ResultSource, ViewDataFactory};
use crate::filter::view_data::{PagerViewData, ViewData, ViewDataKind};
use crate::filter::widget::single_value::{lenient_u32, SingleRequestValue};
use crate::search::{SearchRequest, SearchResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PagerOptions {
    #[serde(default = "default_count_per_page")]
    count_per_page: u32,
    #[serde(default = "default_max_pages")]
    max_pages: u32,
}

fn default_count_per_page() -> u32 {
    10
}

fn default_max_pages() -> u32 {
    8
}

#[derive(Debug, Clone)]
pub struct Pager {
    request: SingleRequestValue,
    count_per_page: u32,
    max_pages: u32,
}

impl Pager {
    pub const TYPE: &'static str = "pager";

    pub fn new(name: &str, config: FilterConfig) -> Result<Self> {
        let options: PagerOptions = config.options_as(name)?;
        if options.count_per_page == 0 || options.max_pages == 0 {
            return Err(AppError::config(format!(
                "Filter `{}`: count_per_page and max_pages must be greater than 0",
                name
            )));
        }

        Ok(Self {
            request: SingleRequestValue::new(name, config),
            count_per_page: options.count_per_page,
            max_pages: options.max_pages,
        })
    }

    fn current_page(state: &FilterState) -> u32 {
        if state.active {
            state.value.as_page().unwrap_or(1)
        } else {
            1
        }
    }

    /// Window of at most `max_pages` page numbers around `current`
    fn page_window(&self, current: u32, num_pages: u32) -> Vec<u32> {
        if num_pages == 0 {
            return Vec::new();
        }
        // a requested page past the end still gets the trailing window
        let current = current.clamp(1, num_pages);
        let span = self.max_pages.saturating_sub(1);
        let start = current.saturating_sub(self.max_pages / 2).max(1);
        let end = start.saturating_add(span).min(num_pages);
        let start = end.saturating_sub(span).max(1);
        (start..=end).collect()
    }
}

impl Filter for Pager {
    fn name(&self) -> &str {
        self.request.name()
    }

    fn config(&self) -> &FilterConfig {
        self.request.config()
    }

    /// Any present value activates the pager; unreadable or zero pages fall
    /// back to page 1.
    fn state(&self, params: &dyn RequestParams) -> FilterState {
        let mut state = self.request.state(params);
        if !state.active {
            return state;
        }

        let page = match &state.value {
            FilterValue::Single(raw) => lenient_u32(raw).filter(|page| *page >= 1).unwrap_or(1),
            _ => 1,
        };
        state.value = FilterValue::Page(page);
        state.url_parameters.insert(
            self.request_field().to_string(),
            ParamValue::Single(page.to_string()),
        );
        state
    }

    fn pre_process_search(
        &self,
        main: &mut SearchRequest,
        _related: &mut SearchRequest,
        state: &FilterState,
    ) {
        let page = Self::current_page(state);
        let from = (page as usize - 1).saturating_mul(self.count_per_page as usize);
        main.set_pagination(from, self.count_per_page as usize);
    }

    fn modify_search(&self, _search: &mut SearchRequest, _state: &FilterState) {}

    fn view_data(&self, result: &SearchResponse, mut data: ViewData) -> ViewData {
        let current_page = Self::current_page(&data.state);
        let total_items = result.total;
        let num_pages = total_items.div_ceil(self.count_per_page as usize) as u32;
        let last_page = num_pages.max(1);

        data.details = ViewDataKind::Pager(PagerViewData {
            current_page,
            total_items,
            items_per_page: self.count_per_page,
            num_pages,
            max_pages: self.max_pages,
            first_page: 1,
            last_page,
            previous_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < num_pages).then(|| current_page + 1),
            pages: self.page_window(current_page, num_pages),
        });
        data
    }

    fn result_source(&self) -> ResultSource {
        ResultSource::Main
    }

    fn as_view_data_factory(&self) -> Option<&dyn ViewDataFactory> {
        Some(self)
    }
}

impl ViewDataFactory for Pager {
    fn create_view_data(&self) -> ViewData {
        ViewData::with_details(ViewDataKind::Pager(PagerViewData::default()))
    }
}
