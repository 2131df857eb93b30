//! Filter managers: an ordered set of filters bound to one repository.
//!
//! A request flows through a manager like this:
//!
//! ```text
//!  params ──► states (+ search-relation gating)
//!               │
//!               ├──► main search     : every active filter's narrowing
//!               └──► related search  : per filter, every *other* filter's
//!                                      narrowing, plus its aggregations
//!                          │
//!                     (executed concurrently)
//!                          │
//!  response ◄── documents + view data per filter
//! ```

mod builder;
mod config;
mod container;
#[allow(clippy::module_inception)]
mod manager;
mod response;

pub use builder::build_managers;
pub use config::{FilterManagerConfig, ManagerConfig};
pub use container::{FilterContainer, FilterEntry};
pub use manager::{FilterManager, SearchPlan, DEFAULT_MAX_CONCURRENT_SEARCHES};
pub use response::FilterManagerResponse;
