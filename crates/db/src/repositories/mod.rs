//! Repository structs owning all SQL against the store.

mod script_repo;
mod user_repo;

pub use script_repo::ScriptRepo;
pub use user_repo::UserRepo;
