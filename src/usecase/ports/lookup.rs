use async_trait::async_trait;

use crate::domain::entities::column::{ColumnConfig, LookupCandidate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Remote list of `{id, label}` candidates. The endpoint doubles as the
/// cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupSource {
    pub endpoint: String,
    pub label_fields: Vec<String>,
}

impl LookupSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            label_fields: Vec::new(),
        }
    }

    pub fn with_label_fields(mut self, fields: Vec<String>) -> Self {
        self.label_fields = fields;
        self
    }

    pub fn from_column(column: &ColumnConfig) -> Option<Self> {
        column
            .endpoint
            .as_ref()
            .filter(|endpoint| !endpoint.is_empty())
            .map(|endpoint| Self::new(endpoint.clone()).with_label_fields(column.label_field_list()))
    }
}

/// Fetches lookup candidates. Authentication is the implementor's concern.
#[async_trait(?Send)]
pub trait LookupClient {
    async fn fetch(&self, source: &LookupSource) -> Result<Vec<LookupCandidate>, LookupError>;
}
