use dioxus::prelude::*;
use indexmap::IndexMap;

use crate::config::Settings;
use crate::domain::entities::column::ColumnConfig;
use crate::domain::entities::filter::{FilterDescriptor, QueryDescriptor, SortDescriptor};
use crate::domain::entities::page::{PageRequest, ScrollMetrics};
use crate::ui::dismiss::OverlayToken;
use crate::ui::state::dismiss_scope::DismissScope;
use crate::ui::format::LayoutMode;
use crate::usecase::services::column_state::ColumnState;
use crate::usecase::services::pagination::Pager;
use crate::usecase::services::query_state::QueryState;

/// Reactive state of one rendered table.
///
/// Built with hooks, so call [`TableState::new`] from a component body. The
/// host keeps a copy to report page results back through
/// [`TableState::page_loaded`] / [`TableState::page_failed`].
///
/// Under a [`DismissRoot`](crate::ui::components::dismiss_root::DismissRoot)
/// the table joins the page-wide dismiss scope. Without one it keeps a
/// private scope and dismisses on clicks inside the table only.
#[derive(Clone, Copy, PartialEq)]
pub struct TableState {
    pub settings: Signal<Settings>,
    pub query: Signal<QueryState>,
    pub columns: Signal<ColumnState>,
    pub pager: Signal<Pager>,
    pub dismiss: DismissScope,
    /// `false` when a page-wide root dispatches clicks for this table.
    pub dispatches_clicks: bool,
    pub layout: Signal<LayoutMode>,
    pub column_menu: OverlayToken,
}

impl TableState {
    pub fn new(
        options: Vec<ColumnConfig>,
        visibility: IndexMap<String, bool>,
        settings: Settings,
    ) -> Self {
        let page_size = settings.page_size;
        let threshold = settings.bottom_threshold_px;
        let pinned = settings.pinned_column.clone();
        let inherited = try_use_context::<DismissScope>();
        let private = use_hook(DismissScope::new);
        Self {
            query: use_signal(QueryState::new),
            columns: use_signal(move || {
                let state = ColumnState::new(options, &visibility);
                match pinned {
                    Some(key) => state.with_pinned(key),
                    None => state,
                }
            }),
            pager: use_signal(move || Pager::new(page_size).with_bottom_threshold(threshold)),
            dismiss: inherited.unwrap_or(private),
            dispatches_clicks: inherited.is_none(),
            layout: use_signal(|| LayoutMode::Desktop),
            column_menu: use_hook(OverlayToken::next),
            settings: use_signal(move || settings),
        }
    }

    pub fn apply_filter(mut self, event: FilterDescriptor) -> QueryDescriptor {
        self.query.write().apply_filter(event)
    }

    pub fn apply_sort(mut self, event: SortDescriptor) -> QueryDescriptor {
        self.query.write().apply_sort(event)
    }

    pub fn request_next_page(mut self) -> Option<PageRequest> {
        self.pager.write().request_next_page()
    }

    pub fn on_scroll(mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
        self.pager.write().on_scroll(metrics)
    }

    pub fn page_loaded(mut self) {
        self.pager.write().page_loaded();
    }

    pub fn page_failed(mut self) {
        self.pager.write().page_failed();
    }

    pub fn set_loading(mut self, loading: bool) {
        self.pager.write().set_loading(loading);
    }

    pub fn reset_pages(mut self) {
        self.pager.write().reset();
    }

    /// Click that reached the table root. Dispatched here only when no
    /// page-wide root will see it.
    pub fn table_clicked(self) {
        if self.dispatches_clicks {
            self.dismiss.dispatch();
        }
    }

    pub fn update_layout(mut self, width: f64) {
        let breakpoint = self.settings.peek().desktop_breakpoint_px;
        let mode = LayoutMode::from_width(width, breakpoint);
        if *self.layout.peek() != mode {
            self.layout.set(mode);
        }
    }
}
