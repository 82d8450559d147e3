//! Dacha storefront client: backend API, session, services and the `dacha` command line.

pub mod api;
pub mod auth;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod context;
pub mod observability;
pub mod reservations;
pub mod session;
