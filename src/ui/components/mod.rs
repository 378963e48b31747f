pub mod column_menu;
pub mod data_table;
pub mod dismiss_root;
pub mod filter_header;
pub mod gauge_ring;

use std::rc::Rc;

use crate::usecase::ports::repo::ColumnVisibilityRepository;
use crate::usecase::services::lookup_service::LookupService;

/// Lookup service shared by every identifier filter under the provider.
///
/// ```ignore
/// use_context_provider(|| LookupHandle(Rc::new(LookupService::new(client))));
/// ```
#[derive(Clone)]
pub struct LookupHandle(pub Rc<LookupService>);

/// Where the column menu saves visibility changes, if anywhere.
#[derive(Clone)]
pub struct VisibilityStore {
    pub repo: Rc<dyn ColumnVisibilityRepository>,
    pub table_key: String,
}

impl VisibilityStore {
    pub fn new(repo: Rc<dyn ColumnVisibilityRepository>, table_key: impl Into<String>) -> Self {
        Self {
            repo,
            table_key: table_key.into(),
        }
    }
}
