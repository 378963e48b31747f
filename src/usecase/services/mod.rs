pub mod column_state;
pub mod lookup_service;
pub mod pagination;
pub mod query_state;
pub mod table_controller;
