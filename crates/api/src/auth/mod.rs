//! Authentication primitives.
//!
//! - [`identity`] -- the [`IdentityProvider`](identity::IdentityProvider) trait and its error type.
//! - [`jwt`] -- local verification of provider-issued access tokens.
//! - [`supabase`] -- the Supabase (GoTrue) implementation of the provider.

pub mod identity;
pub mod jwt;
pub mod supabase;
