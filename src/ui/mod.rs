pub mod components;
pub mod controls;
pub mod dismiss;
pub mod format;
pub mod gauge;
pub mod state;
pub mod timer;
