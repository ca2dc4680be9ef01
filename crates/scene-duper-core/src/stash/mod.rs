//! GraphQL client for a Stash catalog server.

pub mod client;
pub mod queries;

pub use client::StashClient;
