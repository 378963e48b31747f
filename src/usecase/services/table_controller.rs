use indexmap::IndexMap;

use crate::config::Settings;
use crate::domain::entities::column::ColumnConfig;
use crate::domain::entities::filter::{FilterDescriptor, QueryDescriptor, SortDescriptor};
use crate::domain::entities::page::{PageRequest, ScrollMetrics};
use crate::usecase::ports::events::TableEvents;
use crate::usecase::ports::repo::{ColumnVisibilityRepository, StoreError};
use crate::usecase::services::column_state::ColumnState;
use crate::usecase::services::pagination::Pager;
use crate::usecase::services::query_state::QueryState;

/// Headless data table: query state, column state and pager wired to the
/// host's [`TableEvents`].
pub struct TableController<E: TableEvents> {
    query: QueryState,
    columns: ColumnState,
    pager: Pager,
    events: E,
}

impl<E: TableEvents> TableController<E> {
    pub fn new(
        columns: Vec<ColumnConfig>,
        visibility: &IndexMap<String, bool>,
        settings: &Settings,
        events: E,
    ) -> Self {
        let mut column_state = ColumnState::new(columns, visibility);
        if let Some(pinned) = &settings.pinned_column {
            column_state = column_state.with_pinned(pinned.clone());
        }
        Self {
            query: QueryState::new(),
            columns: column_state,
            pager: Pager::new(settings.page_size).with_bottom_threshold(settings.bottom_threshold_px),
            events,
        }
    }

    pub fn query(&self) -> &QueryDescriptor {
        self.query.descriptor()
    }

    pub fn columns(&self) -> &ColumnState {
        &self.columns
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn apply_filter(&mut self, event: FilterDescriptor) {
        let query = self.query.apply_filter(event);
        self.events.on_query_changed(&query);
    }

    pub fn apply_sort(&mut self, event: SortDescriptor) {
        let query = self.query.apply_sort(event);
        self.events.on_query_changed(&query);
    }

    /// Feeds a filter event straight from a control, ignoring rejected input.
    pub fn commit(&mut self, event: Option<FilterDescriptor>) {
        if let Some(event) = event {
            self.apply_filter(event);
        }
    }

    pub fn toggle_visible(&mut self, key: &str, value: bool) {
        self.columns.toggle_visible(key, value);
    }

    pub fn remove_column(&mut self, key: &str) {
        self.columns.remove_column(key);
    }

    pub fn toggle_column_menu(&mut self) {
        self.columns.toggle_menu();
    }

    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        let request = self.pager.request_next_page()?;
        self.events.on_request_page(request);
        Some(request)
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
        let request = self.pager.on_scroll(metrics)?;
        self.events.on_request_page(request);
        Some(request)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.pager.set_loading(loading);
    }

    pub fn page_loaded(&mut self) {
        self.pager.page_loaded();
    }

    pub fn page_failed(&mut self) {
        self.pager.page_failed();
    }

    pub fn reset_pages(&mut self) {
        self.pager.reset();
    }

    pub fn edit_row(&mut self, row_id: &str) {
        self.events.on_edit_requested(row_id);
    }

    pub fn delete_row(&mut self, row_id: &str) {
        self.events.on_delete_requested(row_id);
    }

    pub fn save_columns(
        &self,
        repo: &dyn ColumnVisibilityRepository,
        table_key: &str,
    ) -> Result<(), StoreError> {
        repo.save_column_visibility(table_key, self.columns.visibility())
    }
}

/// Visibility to seed a table with: what was saved for `table_key`, falling
/// back to the host's defaults when nothing is stored or the store fails.
pub fn restore_visibility(
    repo: &dyn ColumnVisibilityRepository,
    table_key: &str,
    defaults: &IndexMap<String, bool>,
) -> IndexMap<String, bool> {
    match repo.load_column_visibility(table_key) {
        Ok(saved) if !saved.is_empty() => saved,
        Ok(_) => defaults.clone(),
        Err(err) => {
            tracing::warn!(table_key, error = %err, "failed to load column visibility");
            defaults.clone()
        }
    }
}
