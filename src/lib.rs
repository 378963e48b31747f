//! Dynamic data table for administrative UIs.
//!
//! Four filter control variants (text, numeric, date, identifier lookup)
//! feed one query descriptor; column visibility and scroll-driven paging
//! live next to it. The state machines are plain Rust and can be driven
//! directly through [`TableController`]; [`ui::components::data_table::DataTable`]
//! renders them with Dioxus.

pub mod config;
pub mod domain;
pub mod infra;
pub mod ui;
pub mod usecase;

pub use config::{default_db_path, Settings, SettingsError};
pub use domain::entities::column::{ColumnConfig, ColumnKind, LookupCandidate};
pub use domain::entities::filter::{
    DateOp, FilterDescriptor, FilterFamily, FilterType, FilterValue, FilterValueError, NumericOp,
    QueryDescriptor, SortDescriptor, SortDirection,
};
pub use domain::entities::page::{PageRequest, ScrollMetrics, TableRow};
pub use usecase::ports::events::{RecordedEvents, TableEvents};
pub use usecase::ports::lookup::{LookupClient, LookupError, LookupSource};
pub use usecase::ports::repo::{ColumnVisibilityRepository, StoreError};
pub use usecase::services::lookup_service::{LookupCache, LookupService};
pub use usecase::services::table_controller::{restore_visibility, TableController};

#[cfg(test)]
mod tests;
