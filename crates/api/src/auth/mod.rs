//! Principal resolution.
//!
//! Credential issuance (registration, login, password handling) is an
//! external concern; this service only validates the access tokens it is
//! handed.

pub mod jwt;
