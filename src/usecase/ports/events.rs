use crate::domain::entities::filter::QueryDescriptor;
use crate::domain::entities::page::PageRequest;

/// Notifications the table sends to its data-fetch collaborator.
pub trait TableEvents {
    /// Fired after every filter or sort mutation. The collaborator re-issues
    /// its query and replaces the row set.
    fn on_query_changed(&mut self, query: &QueryDescriptor);

    /// The collaborator appends the page and must then report back through
    /// `page_loaded` or `page_failed` so the busy guard is released.
    fn on_request_page(&mut self, request: PageRequest);

    fn on_edit_requested(&mut self, _row_id: &str) {}

    fn on_delete_requested(&mut self, _row_id: &str) {}
}

/// Records every event, in order. Handy for hosts that poll instead of
/// reacting, and for tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedEvents {
    pub queries: Vec<QueryDescriptor>,
    pub pages: Vec<PageRequest>,
    pub edits: Vec<String>,
    pub deletes: Vec<String>,
}

impl TableEvents for RecordedEvents {
    fn on_query_changed(&mut self, query: &QueryDescriptor) {
        self.queries.push(query.clone());
    }

    fn on_request_page(&mut self, request: PageRequest) {
        self.pages.push(request);
    }

    fn on_edit_requested(&mut self, row_id: &str) {
        self.edits.push(row_id.to_string());
    }

    fn on_delete_requested(&mut self, row_id: &str) {
        self.deletes.push(row_id.to_string());
    }
}
