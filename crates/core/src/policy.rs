//! Authorization policy for script access.
//!
//! Pure decision functions over a principal and a script's ownership /
//! visibility projection. No I/O, no side effects; the API layer translates
//! a `false` into the appropriate Forbidden or Unauthorized outcome.

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The resolved identity of a requester: user id plus role name.
///
/// Anonymous requests are represented as `Option<&Principal>::None` at the
/// policy boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: DbId,
    pub role: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// The minimal projection of a script the policy needs.
#[derive(Debug, Clone, Copy)]
pub struct ScriptAccess {
    pub author_id: DbId,
    pub is_public: bool,
}

fn is_author(principal: Option<&Principal>, access: ScriptAccess) -> bool {
    principal.is_some_and(|p| p.user_id == access.author_id)
}

fn is_admin(principal: Option<&Principal>) -> bool {
    principal.is_some_and(Principal::is_admin)
}

/// A public script is readable by anyone; a private one only by its author
/// or an admin.
pub fn can_read(principal: Option<&Principal>, access: ScriptAccess) -> bool {
    access.is_public || is_author(principal, access) || is_admin(principal)
}

/// Update and delete are restricted to the author or an admin. Anonymous
/// principals are always denied.
pub fn can_modify(principal: Option<&Principal>, access: ScriptAccess) -> bool {
    is_author(principal, access) || is_admin(principal)
}

/// Forking follows the read rule but additionally requires an identity,
/// since the fork is attributed to the forker.
pub fn can_fork(principal: Option<&Principal>, access: ScriptAccess) -> bool {
    principal.is_some() && can_read(principal, access)
}

/// Only admins may set or clear the curated flag. A non-admin's supplied
/// value is discarded by the caller, not rejected.
pub fn can_set_curated(principal: Option<&Principal>) -> bool {
    is_admin(principal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
