//! Dacha
//!
//! Dacha is the storefront core of the Dacha restaurant: menu catalog, a persisted cart,
//! delivery pricing and the checkout state machine.

pub mod amount;
pub mod auth;
pub mod banquet;
pub mod cart;
pub mod checkout;
pub mod items;
pub mod lunch;
pub mod menu;
pub mod observe;
pub mod orders;
pub mod phone;
pub mod prelude;
pub mod pricing;
pub mod reservation;
pub mod status;
pub mod storage;
