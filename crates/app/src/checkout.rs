//! Order submission.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use dacha::{
    cart::{Cart, CartStore},
    checkout::{Checkout, CheckoutError, CheckoutForm, CheckoutOutcome, CheckoutState, SubmitFailure},
    storage::SnapshotStorage,
};

use crate::api::StorefrontApi;

/// Drives the [`Checkout`] state machine against the backend.
///
/// The lock is held only across state transitions, never across the request, so a second
/// submit while one is in flight fails fast with [`CheckoutError::AlreadySubmitting`].
pub struct CheckoutSubmitter {
    api: Arc<dyn StorefrontApi>,
    checkout: Mutex<Checkout>,
}

impl std::fmt::Debug for CheckoutSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSubmitter")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CheckoutSubmitter {
    /// Create an idle submitter.
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            checkout: Mutex::new(Checkout::new()),
        }
    }

    /// Current checkout state.
    pub fn state(&self) -> CheckoutState {
        self.lock().state().clone()
    }

    /// Validate, send and settle one order.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] the state machine settled on.
    pub async fn submit(
        &self,
        cart: &Cart,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let payload = self.lock().begin(cart, form)?;

        info!(
            total = payload.total_price,
            lines = cart.len(),
            payment = ?payload.payment_method,
            "submitting order"
        );

        let response = self
            .api
            .create_order(&payload)
            .await
            .map_err(|error| {
                warn!("order submission failed: {error}");
                SubmitFailure::from(error)
            });

        self.lock().finish(response)
    }

    fn lock(&self) -> MutexGuard<'_, Checkout> {
        self.checkout.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Submit the cart and clear it once the order is placed.
///
/// A redirect to the payment page keeps the cart.
///
/// # Errors
///
/// Returns the checkout failure; the cart is left untouched.
pub async fn place_order<S: SnapshotStorage>(
    cart: &mut CartStore<S>,
    submitter: &CheckoutSubmitter,
    form: &CheckoutForm,
) -> Result<CheckoutOutcome, CheckoutError> {
    let outcome = submitter.submit(cart.cart(), form).await?;

    match &outcome {
        CheckoutOutcome::Placed { order_id } => {
            info!(?order_id, "order placed");
            cart.clear();
        }
        CheckoutOutcome::RedirectToPayment { payment_url } => {
            info!(%payment_url, "redirecting to payment");
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use dacha::{
        checkout::{OrderReceipt, PaymentMethod},
        items::ItemId,
        menu::MenuItem,
        phone::format_phone,
        pricing::DeliveryMode,
        storage::MemoryStorage,
    };
    use testresult::TestResult;

    use crate::api::{ApiError, MockStorefrontApi};

    use super::*;

    fn dish(id: u64, price: u64) -> MenuItem {
        MenuItem {
            id: ItemId::Number(id),
            category: 1,
            category_name: None,
            title: format!("Dish {id}"),
            description: String::new(),
            price,
            weight: String::new(),
            image: None,
            is_popular: false,
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Иван".to_string(),
            phone: format_phone("9123456789"),
            address: "ул. Ленина, 1".to_string(),
            delivery: DeliveryMode::Delivery,
            payment: PaymentMethod::Cash,
        }
    }

    fn store() -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&dish(1, 300));
        store.add(&dish(1, 300));
        store.add(&dish(2, 250));
        store
    }

    #[tokio::test]
    async fn placed_order_clears_cart() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order()
            .once()
            .withf(|payload| payload.total_price == 1000 && payload.status == "new")
            .return_once(|_| {
                Ok(OrderReceipt {
                    status: Some("success".to_string()),
                    order_id: Some(42),
                    payment_url: None,
                })
            });

        let submitter = CheckoutSubmitter::new(Arc::new(api));
        let mut cart = store();

        let outcome = place_order(&mut cart, &submitter, &form()).await?;

        assert_eq!(outcome, CheckoutOutcome::Placed { order_id: Some(42) });
        assert!(cart.cart().is_empty());
        assert_eq!(
            submitter.state(),
            CheckoutState::Success { order_id: Some(42) }
        );

        Ok(())
    }

    #[tokio::test]
    async fn payment_redirect_keeps_cart() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().return_once(|_| {
            Ok(OrderReceipt {
                status: Some("success".to_string()),
                order_id: Some(43),
                payment_url: Some("https://pay.example/43".to_string()),
            })
        });

        let submitter = CheckoutSubmitter::new(Arc::new(api));
        let mut cart = store();
        let form = CheckoutForm {
            payment: PaymentMethod::Online,
            ..form()
        };

        let outcome = place_order(&mut cart, &submitter, &form).await?;

        assert!(matches!(outcome, CheckoutOutcome::RedirectToPayment { .. }));
        assert_eq!(cart.cart().total_count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_order_keeps_cart_and_reports_message() {
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().return_once(|_| {
            Err(ApiError::Rejected {
                status: 400,
                message: Some("phone: Обязательное поле.".to_string()),
            })
        });

        let submitter = CheckoutSubmitter::new(Arc::new(api));
        let mut cart = store();

        let result = place_order(&mut cart, &submitter, &form()).await;

        assert_eq!(
            result,
            Err(CheckoutError::Rejected("phone: Обязательное поле.".to_string()))
        );
        assert_eq!(cart.cart().total_count(), 3);
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().never();

        let submitter = CheckoutSubmitter::new(Arc::new(api));
        let mut cart = store();
        let form = CheckoutForm {
            address: String::new(),
            ..form()
        };

        let result = place_order(&mut cart, &submitter, &form).await;

        assert!(matches!(result, Err(CheckoutError::MissingFields(_))));
        assert_eq!(cart.cart().total_count(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_submit_is_rejected_without_request() -> TestResult {
        let (release, gate) = std::sync::mpsc::channel::<()>();
        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().return_once(move |_| {
            // Block the first request until the second submit has been attempted.
            gate.recv().ok();
            Ok(OrderReceipt::default())
        });

        let submitter = Arc::new(CheckoutSubmitter::new(Arc::new(api)));
        let cart = store().cart().clone();

        let first = tokio::spawn({
            let submitter = Arc::clone(&submitter);
            let cart = cart.clone();
            async move { submitter.submit(&cart, &form()).await }
        });

        while submitter.state() != CheckoutState::Submitting {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            submitter.submit(&cart, &form()).await,
            Err(CheckoutError::AlreadySubmitting)
        );

        release.send(()).ok();

        assert_eq!(first.await??, CheckoutOutcome::Placed { order_id: None });

        Ok(())
    }
}
