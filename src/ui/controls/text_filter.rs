use crate::domain::entities::filter::{FilterDescriptor, FilterFamily, FilterType, FilterValue};
use crate::ui::controls::chrome::{ControlChrome, FilterControl};
use crate::ui::controls::search_box::SearchBox;

/// Free-text search on one field. Commits on every keystroke; debouncing is
/// left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    field: String,
    term: String,
    chrome: ControlChrome,
}

impl TextFilter {
    pub fn new(field: impl Into<String>) -> Self {
        Self::with_search_box(field, SearchBox::default())
    }

    pub fn with_search_box(field: impl Into<String>, search: SearchBox) -> Self {
        Self {
            field: field.into(),
            term: String::new(),
            chrome: ControlChrome::new(search),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) -> FilterDescriptor {
        self.term = term.into();
        let values = if self.term.is_empty() {
            Vec::new()
        } else {
            vec![FilterValue::Text(self.term.clone())]
        };
        FilterDescriptor::new(self.field.clone(), FilterType::Text, values)
    }
}

impl FilterControl for TextFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn family(&self) -> FilterFamily {
        FilterFamily::Text
    }

    fn chrome(&self) -> &ControlChrome {
        &self.chrome
    }

    fn chrome_mut(&mut self) -> &mut ControlChrome {
        &mut self.chrome
    }

    fn reset(&mut self) -> FilterDescriptor {
        self.term.clear();
        FilterDescriptor::cleared(self.field.clone(), FilterType::Text)
    }
}
