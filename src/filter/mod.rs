//! Filters: request parameters in, search narrowing and view data out.
//!
//! Every filter takes part in the same per-request protocol:
//!
//! 1. [`Filter::state`] derives a [`FilterState`] from the request parameters.
//!    Malformed input never errors, it yields an inactive state.
//! 2. [`Filter::pre_process_search`] registers aggregations on the filter's
//!    related search (and pagination on the main search).
//! 3. [`Filter::modify_search`] adds the narrowing clause of an active state.
//! 4. [`Filter::view_data`] turns search output into a [`ViewData`].
//!
//! Optional capabilities are separate traits: [`FieldAware`] for filters that
//! target one document field and [`ViewDataFactory`] for filters with a
//! type-specific view data.
//!
//! # Example
//!
//! ```
//! use filter_manager::filter::{Filter, FilterConfig, QueryParams, Range};
//!
//! let config = FilterConfig::new("range", "price").with_field("price");
//! let range = Range::new("price", config).unwrap();
//!
//! let state = range.state(&QueryParams::parse("price=10%3B50"));
//! assert!(state.active);
//! ```

mod config;
mod params;
mod registry;
mod relation;
mod state;
mod traits;
mod view_data;
mod widget;

pub use config::{FilterConfig, RelationConfig, RelationsConfig};
pub use params::{ParamValue, QueryParams, RequestParams, UrlParameters};
pub use registry::{filter_factory, FilterFactory, FilterRegistry};
pub use relation::{FilterRelations, Relation};
pub use state::{FilterState, FilterValue, RangeValue};
pub use traits::{FieldAware, Filter, ResultSource, ViewDataFactory};
pub use view_data::{
    ChoicesViewData, PagerViewData, RangeViewData, ViewData, ViewDataChoice, ViewDataKind,
};
pub use widget::{
    Choice, Pager, Range, SingleRequestValue, CHOICE_AGGREGATION, RANGE_AGGREGATION,
    RANGE_DELIMITER,
};
