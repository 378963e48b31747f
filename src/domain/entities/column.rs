use serde::{Deserialize, Serialize};

use crate::domain::entities::filter::FilterFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    String,
    Number,
    Date,
    #[serde(alias = "uuid")]
    Identifier,
    #[serde(alias = "enam")]
    Enumerated,
}

impl ColumnKind {
    pub fn filter_family(&self) -> FilterFamily {
        match self {
            Self::String => FilterFamily::Text,
            Self::Number => FilterFamily::Numeric,
            Self::Date => FilterFamily::Date,
            Self::Identifier | Self::Enumerated => FilterFamily::Identifier,
        }
    }
}

/// One candidate in an identifier/lookup filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupCandidate {
    pub id: String,
    pub label: String,
}

impl LookupCandidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Static description of a table column, supplied by the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(alias = "isFilter", default)]
    pub filterable: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
    pub field: String,
    /// Comma separated item fields composing a lookup candidate label.
    #[serde(default)]
    pub label_fields: Option<String>,
    /// Field the lookup control's free-text search filters on.
    #[serde(default)]
    pub search_field: Option<String>,
    /// Fixed candidates for enumerated columns; no remote fetch happens.
    #[serde(default)]
    pub options: Option<Vec<LookupCandidate>>,
}

impl ColumnConfig {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: ColumnKind,
        field: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            filterable: true,
            endpoint: None,
            field: field.into(),
            label_fields: None,
            search_field: None,
            options: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_options(mut self, options: Vec<LookupCandidate>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn label_field_list(&self) -> Vec<String> {
        self.label_fields
            .as_deref()
            .map(|fields| {
                fields
                    .split(',')
                    .map(|field| field.trim().to_string())
                    .filter(|field| !field.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
