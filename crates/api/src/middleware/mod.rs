//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated principal from a JWT
//!   Bearer token; rejects anonymous requests.
//! - [`auth::MaybeAuthUser`] -- Optional variant for endpoints that are
//!   public but behave differently for an identified requester.

pub mod auth;
