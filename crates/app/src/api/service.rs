//! Storefront API service trait.

use async_trait::async_trait;
use mockall::automock;

use dacha::{
    auth::{LoginRequest, RegisterRequest, User},
    banquet::BanquetMenu,
    checkout::{OrderPayload, OrderReceipt},
    lunch::BusinessLunch,
    menu::Menu,
    orders::ProfileData,
    reservation::ReservationRequest,
    status::BackendStatus,
};

use crate::api::ApiError;

/// One method per backend endpoint.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /api/status/`
    async fn status(&self) -> Result<BackendStatus, ApiError>;

    /// `GET /api/menu/`
    async fn menu(&self) -> Result<Menu, ApiError>;

    /// `GET /api/lunch/`; `None` when no lunch has been published.
    async fn lunch(&self) -> Result<Option<BusinessLunch>, ApiError>;

    /// `GET /api/banquet-menus/`
    async fn banquet_menus(&self) -> Result<Vec<BanquetMenu>, ApiError>;

    /// `GET /api/auth/user/`; `None` when signed out.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;

    /// `POST /api/auth/login/`
    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError>;

    /// `POST /api/auth/register/`
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;

    /// `POST /api/auth/logout/`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `POST /api/orders/`
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, ApiError>;

    /// `POST /api/reservations/`, returning the reservation id when reported.
    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Option<u64>, ApiError>;

    /// `GET /api/profile/data/`
    async fn profile(&self) -> Result<ProfileData, ApiError>;
}
