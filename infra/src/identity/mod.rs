//! Phone-identity provider client.

pub mod http_provider;

pub use http_provider::{HttpIdentityProvider, IdentityConfig};
