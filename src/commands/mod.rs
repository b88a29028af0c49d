//! Hosted Backend Bindings
//!
//! Supabase-compatible REST calls, organized by domain:
//! - client: shared HTTP plumbing and error mapping
//! - auth: email-link sign-in and the persisted session
//! - biens: the owner-scoped property table

mod auth;
mod biens;
mod client;

pub use auth::{parse_auth_fragment, AuthFragment};
pub use client::SupabaseClient;
