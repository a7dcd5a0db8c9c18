//! ERP API client, the remote half of the command palette.
//!
//! This crate is the single source of truth for the ERP wire contract the
//! search engine needs: auth and the account search endpoint. The engine
//! itself never sees HTTP; it talks to [`ApiClient`] through the
//! `AccountLookup` port.
//!
//! No GUI concepts. No retries. No caching.

mod auth;
mod client;

pub use auth::{AuthCredentials, AuthStore};
pub use client::{parse_accounts, ApiClient, ApiError};
