//! Built-in filter types

mod choice;
mod pager;
mod range;
mod single_value;

pub use choice::{Choice, CHOICE_AGGREGATION};
pub use pager::Pager;
pub use range::{Range, RANGE_AGGREGATION, RANGE_DELIMITER};
pub use single_value::SingleRequestValue;
