use crate::domain::entities::column::LookupCandidate;
use crate::domain::entities::filter::{FilterDescriptor, FilterFamily, FilterType, FilterValue};
use crate::ui::controls::chrome::{ControlChrome, FilterControl};
use crate::ui::controls::search_box::SearchBox;
use crate::usecase::ports::lookup::{LookupError, LookupSource};
use crate::usecase::services::lookup_service::LookupService;

/// Handed out by [`LookupFilter::begin_load`]; the response is only applied
/// when the ticket is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub source: LookupSource,
}

/// Identifier/lookup filter: toggles ids in and out of a selection and
/// filters the field by membership.
///
/// Candidates are either supplied up front (nothing is fetched) or loaded
/// once from a remote source through the shared [`LookupService`].
#[derive(Debug, Clone, PartialEq)]
pub struct LookupFilter {
    field: String,
    search_field: Option<String>,
    source: Option<LookupSource>,
    candidates: Vec<LookupCandidate>,
    selected: Vec<String>,
    search_term: String,
    loaded: bool,
    loading: bool,
    generation: u64,
    torn_down: bool,
    last_error: Option<LookupError>,
    chrome: ControlChrome,
}

impl LookupFilter {
    fn build(
        field: String,
        source: Option<LookupSource>,
        candidates: Vec<LookupCandidate>,
        loaded: bool,
    ) -> Self {
        Self {
            field,
            search_field: None,
            source,
            candidates,
            selected: Vec::new(),
            search_term: String::new(),
            loaded,
            loading: false,
            generation: 0,
            torn_down: false,
            last_error: None,
            chrome: ControlChrome::new(SearchBox::default()),
        }
    }

    pub fn with_candidates(field: impl Into<String>, candidates: Vec<LookupCandidate>) -> Self {
        Self::build(field.into(), None, candidates, true)
    }

    pub fn with_source(field: impl Into<String>, source: LookupSource) -> Self {
        Self::build(field.into(), Some(source), Vec::new(), false)
    }

    /// Field the free-text search box filters on; defaults to the filter
    /// field itself.
    pub fn with_search_field(mut self, search_field: impl Into<String>) -> Self {
        self.search_field = Some(search_field.into()).filter(|field| !field.is_empty());
        self
    }

    pub fn with_search_box(mut self, search: SearchBox) -> Self {
        self.chrome = ControlChrome::new(search);
        self
    }

    pub fn candidates(&self) -> &[LookupCandidate] {
        &self.candidates
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&LookupError> {
        self.last_error.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn needs_load(&self) -> bool {
        self.source.is_some() && !self.loaded && !self.loading && !self.torn_down
    }

    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.needs_load() {
            return None;
        }
        let source = self.source.clone()?;
        self.loading = true;
        Some(LoadTicket {
            generation: self.generation,
            source,
        })
    }

    /// Applies a finished fetch. Returns `false` when the response was
    /// discarded because the control was torn down or the ticket is stale.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<LookupCandidate>, LookupError>,
    ) -> bool {
        if self.torn_down || ticket.generation != self.generation {
            tracing::debug!(endpoint = %ticket.source.endpoint, "discarding stale lookup response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(candidates) => {
                self.candidates = candidates;
                self.loaded = true;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(endpoint = %ticket.source.endpoint, error = %err, "failed to load lookup candidates");
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Loads candidates if they are not there yet.
    pub async fn load(&mut self, service: &LookupService) -> bool {
        let Some(ticket) = self.begin_load() else {
            return false;
        };
        let result = service.candidates(&ticket.source).await;
        self.finish_load(ticket, result)
    }

    /// The owning view is going away; any response still in flight is
    /// ignored when it arrives.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.loading = false;
        self.generation += 1;
    }

    pub fn toggle_id(&mut self, id: impl Into<String>) -> FilterDescriptor {
        let id = id.into();
        match self.selected.iter().position(|selected| *selected == id) {
            Some(idx) => {
                self.selected.remove(idx);
            }
            None => self.selected.push(id),
        }
        FilterDescriptor::new(
            self.field.clone(),
            FilterType::Identifier,
            self.selected.iter().cloned().map(FilterValue::Text),
        )
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> FilterDescriptor {
        self.search_term = term.into();
        let field = self.search_field.clone().unwrap_or_else(|| self.field.clone());
        let values = if self.search_term.is_empty() {
            Vec::new()
        } else {
            vec![FilterValue::Text(self.search_term.clone())]
        };
        FilterDescriptor::new(field, FilterType::Text, values)
    }

    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.candidates
            .iter()
            .find(|candidate| candidate.id == id)
            .map(|candidate| candidate.label.as_str())
    }

    /// Labels of the selected ids, comma separated, for the collapsed header.
    pub fn display(&self) -> String {
        self.selected
            .iter()
            .map(|id| self.label_for(id).unwrap_or(id.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FilterControl for LookupFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn family(&self) -> FilterFamily {
        FilterFamily::Identifier
    }

    fn chrome(&self) -> &ControlChrome {
        &self.chrome
    }

    fn chrome_mut(&mut self) -> &mut ControlChrome {
        &mut self.chrome
    }

    fn reset(&mut self) -> FilterDescriptor {
        self.selected.clear();
        FilterDescriptor::cleared(self.field.clone(), FilterType::Identifier)
    }
}
