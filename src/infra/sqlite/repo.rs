use std::path::PathBuf;

use indexmap::IndexMap;

use crate::infra::sqlite::queries::{
    delete_column_visibility, load_column_visibility, upsert_column_visibility,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{ColumnVisibilityRepository, StoreError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl ColumnVisibilityRepository for SqliteRepo {
    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(StoreError::from)
    }

    fn load_column_visibility(&self, table_key: &str) -> Result<IndexMap<String, bool>, StoreError> {
        load_column_visibility(&self.db_path, table_key).map_err(StoreError::from)
    }

    fn save_column_visibility(
        &self,
        table_key: &str,
        visibility: &IndexMap<String, bool>,
    ) -> Result<(), StoreError> {
        upsert_column_visibility(&self.db_path, table_key, visibility).map_err(StoreError::from)
    }

    fn clear_column_visibility(&self, table_key: &str) -> Result<(), StoreError> {
        delete_column_visibility(&self.db_path, table_key).map_err(StoreError::from)
    }
}
