//! Range filter, selects documents from a lower to an upper limit.

use crate::error::Result;
use crate::filter::config::FilterConfig;
use crate::filter::params::{ParamValue, RequestParams};
use crate::filter::state::{FilterState, FilterValue, RangeValue};
use crate::filter::traits::{FieldAware, Filter, ViewDataFactory};
use crate::filter::view_data::{RangeViewData, ViewData, ViewDataKind};
use crate::filter::widget::single_value::{lenient_f64, SingleRequestValue};
use crate::search::{AggregationRequest, Clause, RangeClause, SearchRequest, SearchResponse};
use serde::Deserialize;

/// Aggregation the bounds are read from
pub const RANGE_AGGREGATION: &str = "range_agg";

/// Separator between lower and upper bound in the request value
pub const RANGE_DELIMITER: char = ';';

#[derive(Debug, Deserialize)]
struct RangeOptions {
    #[serde(default = "default_inclusive")]
    inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct Range {
    request: SingleRequestValue,
    field: String,
    inclusive: bool,
}

impl Range {
    pub const TYPE: &'static str = "range";

    pub fn new(name: &str, config: FilterConfig) -> Result<Self> {
        let field = config.required_field(name)?.to_string();
        let options: RangeOptions = config.options_as(name)?;

        Ok(Self {
            request: SingleRequestValue::new(name, config),
            field,
            inclusive: options.inclusive,
        })
    }
}

impl Filter for Range {
    fn name(&self) -> &str {
        self.request.name()
    }

    fn config(&self) -> &FilterConfig {
        self.request.config()
    }

    fn state(&self, params: &dyn RequestParams) -> FilterState {
        let mut state = self.request.state(params);
        if !state.active {
            return state;
        }

        let raw = match &state.value {
            FilterValue::Single(raw) => raw.clone(),
            _ => return state.deactivated(),
        };

        let mut parts = raw.splitn(2, RANGE_DELIMITER);
        let (lower, upper) = match (parts.next(), parts.next()) {
            (Some(lower), Some(upper)) => (lower, upper),
            _ => return state.deactivated(),
        };

        state.value = FilterValue::Range(RangeValue {
            lower_bound: lenient_f64(lower),
            upper_bound: lenient_f64(upper),
        });
        state
            .url_parameters
            .insert(self.request_field().to_string(), ParamValue::Single(raw));

        state
    }

    fn pre_process_search(
        &self,
        _main: &mut SearchRequest,
        related: &mut SearchRequest,
        _state: &FilterState,
    ) {
        related.add_aggregation(
            RANGE_AGGREGATION,
            AggregationRequest::Stats {
                field: self.field.clone(),
            },
        );
    }

    fn modify_search(&self, search: &mut SearchRequest, state: &FilterState) {
        if !state.active {
            return;
        }
        if let Some(range) = state.value.as_range() {
            search.add_post_filter(Clause::Range(RangeClause {
                field: self.field.clone(),
                lower: Some(range.lower_bound),
                upper: Some(range.upper_bound),
                inclusive: self.inclusive,
            }));
        }
    }

    fn view_data(&self, result: &SearchResponse, mut data: ViewData) -> ViewData {
        let stats = result
            .aggregation(RANGE_AGGREGATION)
            .and_then(|aggregation| aggregation.as_stats());

        if let Some(stats) = stats {
            data.details = ViewDataKind::Range(RangeViewData {
                min_bound: stats.min,
                max_bound: stats.max,
            });
        }

        data
    }

    fn as_field_aware(&self) -> Option<&dyn FieldAware> {
        Some(self)
    }

    fn as_view_data_factory(&self) -> Option<&dyn ViewDataFactory> {
        Some(self)
    }
}

impl FieldAware for Range {
    fn field(&self) -> &str {
        &self.field
    }

    fn set_field(&mut self, field: String) {
        self.field = field;
    }
}

impl ViewDataFactory for Range {
    fn create_view_data(&self) -> ViewData {
        ViewData::with_details(ViewDataKind::Range(RangeViewData::default()))
    }
}
