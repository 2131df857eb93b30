//! Choice filter, narrows documents to a single value of a field and lists the
//! available values with their counts.

use crate::error::Result;
use crate::filter::config::FilterConfig;
use crate::filter::params::{ParamValue, RequestParams};
use crate::filter::state::FilterState;
use crate::filter::traits::{FieldAware, Filter, ViewDataFactory};
use crate::filter::view_data::{ChoicesViewData, ViewData, ViewDataChoice, ViewDataKind};
use crate::filter::widget::single_value::SingleRequestValue;
use crate::search::{AggregationRequest, Clause, SearchRequest, SearchResponse};
use serde::Deserialize;

pub const CHOICE_AGGREGATION: &str = "choice_agg";

#[derive(Debug, Default, Deserialize)]
struct ChoiceOptions {
    /// Maximum number of choices, all when unset
    #[serde(default)]
    size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    request: SingleRequestValue,
    field: String,
    size: Option<usize>,
}

impl Choice {
    pub const TYPE: &'static str = "choice";

    pub fn new(name: &str, config: FilterConfig) -> Result<Self> {
        let field = config.required_field(name)?.to_string();
        let options: ChoiceOptions = config.options_as(name)?;

        Ok(Self {
            request: SingleRequestValue::new(name, config),
            field,
            size: options.size,
        })
    }
}

impl Filter for Choice {
    fn name(&self) -> &str {
        self.request.name()
    }

    fn config(&self) -> &FilterConfig {
        self.request.config()
    }

    fn state(&self, params: &dyn RequestParams) -> FilterState {
        let state = self.request.state(params);
        if state.active && state.value.as_single().is_none() {
            return state.deactivated();
        }
        state
    }

    fn pre_process_search(
        &self,
        _main: &mut SearchRequest,
        related: &mut SearchRequest,
        _state: &FilterState,
    ) {
        related.add_aggregation(
            CHOICE_AGGREGATION,
            AggregationRequest::Terms {
                field: self.field.clone(),
                size: self.size,
            },
        );
    }

    fn modify_search(&self, search: &mut SearchRequest, state: &FilterState) {
        if !state.active {
            return;
        }
        if let Some(value) = state.value.as_single() {
            search.add_post_filter(Clause::term(self.field.clone(), value));
        }
    }

    /// Expects `reset_url_parameters` to be filled in already.
    fn view_data(&self, result: &SearchResponse, mut data: ViewData) -> ViewData {
        let selected = if data.state.active {
            data.state.value.as_single().map(str::to_string)
        } else {
            None
        };

        let buckets = result
            .aggregation(CHOICE_AGGREGATION)
            .map(|aggregation| aggregation.buckets())
            .unwrap_or_default();

        let choices = buckets
            .iter()
            .map(|bucket| {
                let active = selected.as_deref() == Some(bucket.key.as_str());
                let mut url_parameters = data.reset_url_parameters.clone();
                if !active {
                    url_parameters.insert(
                        self.request_field().to_string(),
                        ParamValue::Single(bucket.key.clone()),
                    );
                }

                ViewDataChoice {
                    label: bucket.key.clone(),
                    count: bucket.doc_count,
                    active,
                    url_parameters,
                }
            })
            .collect();

        data.details = ViewDataKind::Choices(ChoicesViewData { choices });
        data
    }

    fn as_field_aware(&self) -> Option<&dyn FieldAware> {
        Some(self)
    }

    fn as_view_data_factory(&self) -> Option<&dyn ViewDataFactory> {
        Some(self)
    }
}

impl FieldAware for Choice {
    fn field(&self) -> &str {
        &self.field
    }

    fn set_field(&mut self, field: String) {
        self.field = field;
    }
}

impl ViewDataFactory for Choice {
    fn create_view_data(&self) -> ViewData {
        ViewData::with_details(ViewDataKind::Choices(ChoicesViewData::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::params::{QueryParams, UrlParameters};
    use crate::search::{AggregationResult, Bucket};

    fn color_filter() -> Choice {
        Choice::new(
            "color",
            FilterConfig::new("choice", "color")
                .with_field("attributes.color")
                .with_option("size", serde_json::json!(2)),
        )
        .unwrap()
    }

    fn buckets() -> SearchResponse {
        let mut result = SearchResponse::default();
        result.aggregations.insert(
            CHOICE_AGGREGATION.to_string(),
            AggregationResult::Terms {
                buckets: vec![
                    Bucket { key: "red".into(), doc_count: 4 },
                    Bucket { key: "blue".into(), doc_count: 1 },
                ],
            },
        );
        result
    }

    #[test]
    fn test_state_rejects_lists() {
        let filter = color_filter();
        assert!(filter.state(&QueryParams::parse("color=red")).active);
        assert!(!filter.state(&QueryParams::parse("color[]=red")).active);
    }

    #[test]
    fn test_pre_process_requests_terms() {
        let filter = color_filter();
        let mut main = SearchRequest::new();
        let mut related = SearchRequest::new();

        filter.pre_process_search(&mut main, &mut related, &FilterState::inactive());

        assert_eq!(
            related.aggregation(CHOICE_AGGREGATION),
            Some(&AggregationRequest::Terms {
                field: "attributes.color".into(),
                size: Some(2)
            })
        );
    }

    #[test]
    fn test_modify_search_adds_term() {
        let filter = color_filter();
        let mut search = SearchRequest::new();
        let state = filter.state(&QueryParams::parse("color=red"));

        filter.modify_search(&mut search, &state);

        assert_eq!(search.post_filters, vec![Clause::term("attributes.color", "red")]);
    }

    #[test]
    fn test_view_data_marks_active_choice() {
        let filter = color_filter();
        let mut data = filter.create_view_data();
        data.state = filter.state(&QueryParams::parse("color=red"));
        let mut reset = UrlParameters::new();
        reset.insert("price".into(), ParamValue::from("1;2"));
        data.reset_url_parameters = reset;

        let data = filter.view_data(&buckets(), data);
        let choices = &data.choices().unwrap().choices;

        assert_eq!(choices.len(), 2);
        assert!(choices[0].active);
        assert_eq!(choices[0].count, 4);
        // selecting the active choice again deselects it
        assert_eq!(choices[0].url_parameters.get("color"), None);
        assert_eq!(choices[0].url_parameters.get("price"), Some(&ParamValue::from("1;2")));
        assert!(!choices[1].active);
        assert_eq!(choices[1].url_parameters.get("color"), Some(&ParamValue::from("blue")));
    }

    #[test]
    fn test_invalid_size_option_is_config_error() {
        let config = FilterConfig::new("choice", "color")
            .with_field("color")
            .with_option("size", serde_json::json!("many"));
        assert!(Choice::new("color", config).is_err());
    }
}
