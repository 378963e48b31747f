pub mod dismiss_scope;
pub mod table_state;
