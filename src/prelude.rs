//! Dacha prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthError, LoginForm, LoginRequest, RegisterRequest, RegistrationForm, User},
    banquet::{BanquetCategory, BanquetMenu, BanquetSection, LayoutType},
    cart::{CART_STORAGE_KEY, Cart, CartLine, CartStore},
    checkout::{
        Checkout, CheckoutError, CheckoutForm, CheckoutOutcome, CheckoutState, OrderPayload,
        OrderReceipt, PaymentMethod, RequiredField, SubmitFailure,
    },
    items::ItemId,
    lunch::BusinessLunch,
    menu::{Category, CategoryFilter, Menu, MenuItem, MenuPage},
    observe::{Observers, SubscriptionId},
    orders::{Address, Order, OrderItem, OrderStatus, ProfileData},
    phone::format_phone,
    pricing::{DeliveryMode, Quote, quote},
    reservation::{ReservationError, ReservationForm, ReservationRequest},
    status::BackendStatus,
    storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError},
};
