//! ScriptHub domain core.
//!
//! Pure domain logic with no I/O: the error taxonomy, authorization policy,
//! catalog query-builder helpers, and script field validation. Both the
//! repository layer and the API crate depend on this; nothing here depends
//! on them.

pub mod catalog;
pub mod error;
pub mod policy;
pub mod roles;
pub mod script;
pub mod types;
