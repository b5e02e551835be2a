//! HTTP handlers for student create, read and list.

pub mod student;
pub use student::*;
