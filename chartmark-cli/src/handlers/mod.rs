//! Command handlers for the Chartmark CLI

pub mod check;
pub mod entity;
pub mod filters;
pub mod segment;

pub use check::handle_check_command;
pub use entity::handle_entity_command;
pub use filters::handle_filters_command;
pub use segment::handle_segment_command;
