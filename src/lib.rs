//! [Hitobito](https://hitobito.com) identity provider for authentication
//! brokers, on top of a small [OAuth 2.0][rfc6749] authorization code
//! client.
//!
//! A broker talks to [`provider::Hitobito`] through the [`Provider`] trait:
//!
//! 1. [`Provider::setup`] validates the [`HitobitoConfig`] and derives the
//!    `/oauth/authorize` and `/oauth/token` endpoints of the instance.
//! 2. [`Provider::login_url`] gives the URL to send the user-agent to.
//! 3. [`Provider::exchange_code`] trades the code from the callback for an
//!    access token.
//! 4. [`Provider::get_user`] reads the person behind the token from
//!    `/oauth/profile`, roles included.
//!
//! # Modules
//!
//! - [`client`] — OAuth 2.0 client trait, error type and [`BasicClient`].
//! - [`config`] — Provider settings and their environment loader.
//! - [`endpoints`] — Authorization and token endpoint abstractions.
//! - [`grant`] — Authorization code grant and client authentication.
//! - [`provider`] — Broker-facing provider trait, user record, Hitobito.
//! - [`server`] — Error responses returned by the authorization server.
//! - [`transport`] — HTTP transport layer and content type encoding.
//! - [`util`] — URI query string utilities.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod grant;
pub mod provider;
pub mod server;
pub mod transport;
mod types;
pub mod util;

pub use client::{BasicClient, OAuthEndpoint};
pub use config::HitobitoConfig;
pub use provider::{Hitobito, Provider, User};
pub use types::*;
