//! Request extractors.
//!
//! - [`auth::Session`] -- the authenticated caller, resolved from a Bearer token.

pub mod auth;
