use crate::domain::entities::page::{PageRequest, ScrollMetrics};

/// Scroll-driven incremental loading.
///
/// The only duplicate guard is `loading`: it is raised when a page is
/// requested and stays up until the collaborator reports back through
/// [`Pager::page_loaded`] or [`Pager::page_failed`]. Whether more pages exist
/// is the collaborator's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    page: u32,
    page_size: u32,
    loading: bool,
    bottom_threshold: f64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            loading: false,
            bottom_threshold: 0.0,
        }
    }

    pub fn with_bottom_threshold(mut self, threshold: f64) -> Self {
        self.bottom_threshold = threshold.max(0.0);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        tracing::debug!(page = self.page, page_size = self.page_size, "requesting page");
        Some(PageRequest {
            page: self.page,
            page_size: self.page_size,
        })
    }

    /// Feeds a scroll event; requests a page once the viewport bottom reaches
    /// the content bottom.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
        if metrics.reached_bottom(self.bottom_threshold) {
            self.request_next_page()
        } else {
            None
        }
    }

    pub fn page_loaded(&mut self) {
        self.page += 1;
        self.loading = false;
    }

    pub fn page_failed(&mut self) {
        self.loading = false;
    }

    /// Starts over from the first page, e.g. after the row set was replaced.
    pub fn reset(&mut self) {
        self.page = 0;
        self.loading = false;
    }
}
