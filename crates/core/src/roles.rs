//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the migrations.

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ADMIN: &str = "admin";
