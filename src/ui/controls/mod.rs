//! Headless filter controls.
//!
//! Each variant keeps its own drafts and turns user input into normalized
//! [`FilterDescriptor`](crate::FilterDescriptor)s and
//! [`SortDescriptor`](crate::SortDescriptor)s for the table's query state.
//! They share the menu, search box and sort plumbing in [`ControlChrome`].

pub mod chrome;
pub mod lookup_filter;
pub mod range_filter;
pub mod search_box;
pub mod text_filter;

pub use chrome::{ControlChrome, FilterControl};
pub use lookup_filter::{LoadTicket, LookupFilter};
pub use range_filter::{DateFilter, NumericFilter, RangeFilter};
pub use search_box::{CollapseTicket, SearchBox};
pub use text_filter::TextFilter;
