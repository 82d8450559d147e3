//! Table reservation submission.

use std::sync::Arc;

use tracing::{info, warn};

use dacha::reservation::{ReservationError, ReservationForm};

use crate::api::{ApiError, StorefrontApi};

/// Sends validated reservations to the backend.
#[derive(Clone)]
pub struct ReservationService {
    api: Arc<dyn StorefrontApi>,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService").finish_non_exhaustive()
    }
}

impl ReservationService {
    /// Create a service over the given API.
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Validate and submit a reservation, returning its id when the backend reports one.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, [`ReservationError::Rejected`] when the backend refuses
    /// the request, or [`ReservationError::Connection`] when it cannot be reached.
    pub async fn submit(&self, form: ReservationForm) -> Result<Option<u64>, ReservationError> {
        let request = form.into_request()?;

        match self.api.create_reservation(&request).await {
            Ok(reservation_id) => {
                info!(?reservation_id, guests = request.guests, "reservation created");
                Ok(reservation_id)
            }
            Err(ApiError::Rejected { status, message }) => {
                warn!(status, ?message, "reservation rejected");
                Err(ReservationError::Rejected)
            }
            Err(error) => {
                warn!("reservation failed: {error}");
                Err(ReservationError::Connection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::api::MockStorefrontApi;

    use super::*;

    fn form() -> ReservationForm {
        ReservationForm {
            name: "Олег".to_string(),
            phone: "+7 (912) 345-67-89".to_string(),
            date: "2026-10-20".to_string(),
            time: "19:30".to_string(),
            guests: "4".to_string(),
            comment: "У окна".to_string(),
        }
    }

    #[tokio::test]
    async fn submits_validated_request() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_create_reservation()
            .once()
            .withf(|request| request.guests == 4 && request.date == date(2026, 10, 20))
            .return_once(|_| Ok(Some(15)));

        let service = ReservationService::new(Arc::new(api));

        assert_eq!(service.submit(form()).await?, Some(15));

        Ok(())
    }

    #[tokio::test]
    async fn rejection_uses_generic_message() {
        let mut api = MockStorefrontApi::new();

        api.expect_create_reservation().once().return_once(|_| {
            Err(ApiError::Rejected {
                status: 400,
                message: Some("time: Неправильный формат времени.".to_string()),
            })
        });

        let service = ReservationService::new(Arc::new(api));
        let result = service.submit(form()).await;

        assert_eq!(result, Err(ReservationError::Rejected));
        assert_eq!(
            ReservationError::Rejected.to_string(),
            "Ошибка при отправке. Попробуйте позже."
        );
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_reservation().never();

        let service = ReservationService::new(Arc::new(api));
        let result = service
            .submit(ReservationForm {
                date: String::new(),
                ..form()
            })
            .await;

        assert_eq!(result, Err(ReservationError::InvalidDate(String::new())));
    }
}
