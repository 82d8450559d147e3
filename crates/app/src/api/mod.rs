//! Storefront backend API.

mod client;
mod errors;
mod messages;
mod service;

pub use client::{CSRF_COOKIE, CSRF_HEADER, StorefrontClient, parse_base_url};
pub use errors::ApiError;
pub use messages::server_message;
pub use service::{MockStorefrontApi, StorefrontApi};
