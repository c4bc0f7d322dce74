//! Terminal user interface

pub mod app;
pub mod conversation;
pub mod sidebar;
pub mod upload;

pub use app::run;
