//! `reqwest` implementation of [`StorefrontApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, Response, Url,
    cookie::{CookieStore, Jar},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::debug;

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

use crate::api::{ApiError, StorefrontApi, server_message};

/// Cookie holding the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header echoing the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Parse and validate the API base URL.
///
/// # Errors
///
/// Returns [`ApiError::InvalidBaseUrl`] for unparsable or non-HTTP URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|error| ApiError::InvalidBaseUrl(format!("{raw}: {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// HTTP client sharing a cookie jar with the session.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    origin: Url,
    base: String,
    http: Client,
    jar: Arc<Jar>,
}

impl StorefrontClient {
    /// Create a client for `origin`, sending and storing cookies through `jar`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(origin: Url, jar: Arc<Jar>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            base: origin.as_str().trim_end_matches('/').to_string(),
            origin,
            http,
            jar,
        })
    }

    /// API origin.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{path}", self.base);

        Url::parse(&joined).map_err(|error| ApiError::InvalidBaseUrl(format!("{joined}: {error}")))
    }

    /// Current CSRF token, empty when the backend has not issued one.
    pub fn csrf_token(&self) -> String {
        self.jar
            .cookies(&self.origin)
            .and_then(|header| header.to_str().ok().and_then(|cookies| cookie_value(cookies, CSRF_COOKIE)))
            .unwrap_or_default()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");

        let response = self.http.get(self.url(path)?).send().await?;

        decode(path, response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");

        let response = self
            .http
            .post(self.url(path)?)
            .header(CSRF_HEADER, self.csrf_token())
            .json(body)
            .send()
            .await?;

        decode(path, response).await
    }
}

/// Raw value of cookie `name`. Values are not percent-decoded.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        debug!(path, status = status.as_u16(), "request rejected");

        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: server_message(&body),
        });
    }

    // An empty body is how the backend renders `None`.
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };

    serde_json::from_str(body).map_err(ApiError::Decode)
}

#[derive(Debug, Deserialize)]
struct ReservationCreated {
    #[serde(default)]
    reservation_id: Option<u64>,
}

#[async_trait]
impl StorefrontApi for StorefrontClient {
    async fn status(&self) -> Result<BackendStatus, ApiError> {
        self.get("/api/status/").await
    }

    async fn menu(&self) -> Result<Menu, ApiError> {
        self.get("/api/menu/").await
    }

    async fn lunch(&self) -> Result<Option<BusinessLunch>, ApiError> {
        self.get("/api/lunch/").await
    }

    async fn banquet_menus(&self) -> Result<Vec<BanquetMenu>, ApiError> {
        self.get("/api/banquet-menus/").await
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        match self.get("/api/auth/user/").await {
            Ok(user) => Ok(Some(user)),
            Err(error) if error.is_status(401) || error.is_status(403) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        self.post("/api/auth/login/", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.post("/api/auth/register/", request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post::<_, Value>("/api/auth/logout/", &json!({}))
            .await
            .map(drop)
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, ApiError> {
        self.post("/api/orders/", payload).await
    }

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Option<u64>, ApiError> {
        self.post::<_, ReservationCreated>("/api/reservations/", request)
            .await
            .map(|created| created.reservation_id)
    }

    async fn profile(&self) -> Result<ProfileData, ApiError> {
        self.get("/api/profile/data/").await
    }
}
