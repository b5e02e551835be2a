//! Process configuration: store location and HTTP listen address.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
