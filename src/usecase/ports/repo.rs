use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Message(format!("{err:#}"))
    }
}

/// Persists the show/hide flags of a table's columns between sessions.
pub trait ColumnVisibilityRepository {
    fn init(&self) -> Result<(), StoreError>;

    fn load_column_visibility(&self, table_key: &str) -> Result<IndexMap<String, bool>, StoreError>;
    fn save_column_visibility(
        &self,
        table_key: &str,
        visibility: &IndexMap<String, bool>,
    ) -> Result<(), StoreError>;
    fn clear_column_visibility(&self, table_key: &str) -> Result<(), StoreError>;
}
