//! Table reservations
//!
//! Form input validated into the body of `POST /api/reservations/`.

use jiff::civil::{Date, Time};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::phone::format_phone;

/// Guests preselected on the form.
pub const DEFAULT_GUESTS: u32 = 2;

/// Reservation failures shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// Name or phone left empty.
    #[error("Пожалуйста, заполните все обязательные поля")]
    MissingFields,

    /// Date is not `YYYY-MM-DD`.
    #[error("Некорректная дата: {0}")]
    InvalidDate(String),

    /// Time is not `HH:MM`.
    #[error("Некорректное время: {0}")]
    InvalidTime(String),

    /// Guest count is not a positive number.
    #[error("Некорректное количество гостей: {0}")]
    InvalidGuests(String),

    /// The server rejected the reservation.
    #[error("Ошибка при отправке. Попробуйте позже.")]
    Rejected,

    /// The server could not be reached.
    #[error("Ошибка соединения с сервером")]
    Connection,
}

/// Reservation form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    /// Guest name
    pub name: String,

    /// Phone
    pub phone: String,

    /// Date, `YYYY-MM-DD`
    pub date: String,

    /// Time, `HH:MM`
    pub time: String,

    /// Number of guests
    pub guests: String,

    /// Free-form wishes
    pub comment: String,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            date: String::new(),
            time: String::new(),
            guests: DEFAULT_GUESTS.to_string(),
            comment: String::new(),
        }
    }
}

/// Body of `POST /api/reservations/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationRequest {
    /// Guest name
    pub name: String,

    /// Phone in `+7 (XXX) XXX-XX-XX` form
    pub phone: String,

    /// Day of the visit
    pub date: Date,

    /// Arrival time
    pub time: Time,

    /// Number of guests
    pub guests: u32,

    /// Free-form wishes
    pub comment: String,
}

impl ReservationForm {
    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: missing fields, then date, time and guest count.
    pub fn into_request(self) -> Result<ReservationRequest, ReservationError> {
        let name = self.name.trim();
        let phone = format_phone(&self.phone);

        if name.is_empty() || phone.is_empty() {
            return Err(ReservationError::MissingFields);
        }

        let date: Date = self
            .date
            .trim()
            .parse()
            .map_err(|error| {
                debug!("invalid reservation date: {error}");
                ReservationError::InvalidDate(self.date.clone())
            })?;

        let time: Time = self
            .time
            .trim()
            .parse()
            .map_err(|error| {
                debug!("invalid reservation time: {error}");
                ReservationError::InvalidTime(self.time.clone())
            })?;

        let guests = match self.guests.trim() {
            "" => DEFAULT_GUESTS,
            raw => raw
                .parse::<u32>()
                .ok()
                .filter(|guests| *guests > 0)
                .ok_or_else(|| ReservationError::InvalidGuests(self.guests.clone()))?,
        };

        Ok(ReservationRequest {
            name: name.to_string(),
            phone,
            date,
            time,
            guests,
            comment: self.comment.trim().to_string(),
        })
    }
}
