//! Checkout
//!
//! The checkout form, the order payload sent to the backend, and the state machine that
//! guards submission: `Idle → Submitting → Success | Redirected | Error`, with
//! `Error → Submitting` on retry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{
    auth::User,
    cart::Cart,
    phone::format_phone,
    pricing::{DeliveryMode, quote},
};

/// Address sent for pickup orders.
pub const PICKUP_ADDRESS: &str = "Самовывоз";

/// Shown when the server rejects an order without a message.
pub const ORDER_REJECTED: &str = "Ошибка при отправке заказа. Попробуйте позже.";

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Online card payment through the payment page
    Online,

    /// Card or bank transfer on receipt
    Transfer,

    /// Cash on receipt
    #[default]
    Cash,
}

/// Fields the checkout form requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// Customer name
    Name,

    /// Phone number
    Phone,

    /// Delivery address, only under [`DeliveryMode::Delivery`]
    Address,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Name => "имя",
            RequiredField::Phone => "телефон",
            RequiredField::Address => "адрес",
        })
    }
}

/// Transient checkout input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Customer name
    pub name: String,

    /// Phone, kept in `+7 (XXX) XXX-XX-XX` form
    pub phone: String,

    /// Delivery address
    pub address: String,

    /// Delivery or pickup
    pub delivery: DeliveryMode,

    /// Payment method
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    /// Store a typed phone in its normalised form.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    /// Fill name and phone from the signed-in user.
    pub fn prefill(&mut self, user: &User) {
        user.display_name().clone_into(&mut self.name);
        self.phone.clone_from(&user.username);
    }

    /// Required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();

        if self.name.trim().is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.phone.trim().is_empty() {
            missing.push(RequiredField::Phone);
        }
        if self.delivery == DeliveryMode::Delivery && self.address.trim().is_empty() {
            missing.push(RequiredField::Address);
        }

        missing
    }
}

/// Body of `POST /api/orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    /// Customer name
    pub name: String,

    /// Phone
    pub phone: String,

    /// Delivery address or [`PICKUP_ADDRESS`]
    pub address: String,

    /// Items total plus delivery
    pub total_price: u64,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// JSON text of `[{title, quantity, price}]`
    pub items: String,

    /// Always `"new"`
    pub status: &'static str,
}

impl OrderPayload {
    /// Build the payload for a cart and form.
    ///
    /// Only title, quantity and price of each line are sent.
    pub fn new(cart: &Cart, form: &CheckoutForm) -> Self {
        let items = Value::Array(
            cart.lines()
                .iter()
                .map(|line| {
                    json!({
                        "title": line.title,
                        "quantity": line.quantity,
                        "price": line.price,
                    })
                })
                .collect(),
        );

        let address = match form.delivery {
            DeliveryMode::Pickup => PICKUP_ADDRESS.to_string(),
            DeliveryMode::Delivery => form.address.trim().to_string(),
        };

        Self {
            name: form.name.trim().to_string(),
            phone: form.phone.clone(),
            address,
            total_price: quote(cart, form.delivery).total,
            payment_method: form.payment,
            items: items.to_string(),
            status: "new",
        }
    }
}

/// Successful response of `POST /api/orders/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderReceipt {
    /// Backend status marker
    #[serde(default)]
    pub status: Option<String>,

    /// Created order id
    #[serde(default)]
    pub order_id: Option<u64>,

    /// Payment page for online payment
    #[serde(default)]
    pub payment_url: Option<String>,
}

/// Why a submission did not produce a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The server answered with a non-success status.
    Rejected {
        /// Server-provided message
        message: Option<String>,
    },

    /// No response was received.
    Connection,
}

/// Checkout failures shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Корзина пуста")]
    EmptyCart,

    /// Required fields are empty.
    #[error("Пожалуйста, заполните все обязательные поля")]
    MissingFields(Vec<RequiredField>),

    /// A submission is already in flight.
    #[error("Заказ уже отправляется")]
    AlreadySubmitting,

    /// An answer arrived with no submission in flight.
    #[error("Заказ не отправлялся")]
    NotSubmitting,

    /// The server rejected the order.
    #[error("{0}")]
    Rejected(String),

    /// The server could not be reached.
    #[error("Ошибка соединения с сервером")]
    Connection,
}

/// Where a successful submission leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order accepted; the cart should be cleared.
    Placed {
        /// Created order id
        order_id: Option<u64>,
    },

    /// Order accepted and awaiting payment on an external page.
    RedirectToPayment {
        /// Payment page
        payment_url: String,
    },
}

/// Checkout progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// Waiting for the backend
    Submitting,

    /// Order accepted
    Success {
        /// Created order id
        order_id: Option<u64>,
    },

    /// Control handed to the payment page
    Redirected {
        /// Payment page
        payment_url: String,
    },

    /// Last attempt failed; submitting again retries
    Error(CheckoutError),
}

/// Checkout state machine.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    state: CheckoutState,
    payment: PaymentMethod,
}

impl Checkout {
    /// Create an idle checkout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Validate the form and move to `Submitting`, returning the payload to send.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadySubmitting`]: a submission is in flight; state is unchanged.
    /// - [`CheckoutError::EmptyCart`] / [`CheckoutError::MissingFields`]: nothing may be sent;
    ///   the state becomes `Error`.
    pub fn begin(&mut self, cart: &Cart, form: &CheckoutForm) -> Result<OrderPayload, CheckoutError> {
        if self.is_submitting() {
            return Err(CheckoutError::AlreadySubmitting);
        }

        if cart.is_empty() {
            return Err(self.fail(CheckoutError::EmptyCart));
        }

        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(self.fail(CheckoutError::MissingFields(missing)));
        }

        self.state = CheckoutState::Submitting;
        self.payment = form.payment;

        Ok(OrderPayload::new(cart, form))
    }

    /// Apply the backend's answer to the submission started by [`Checkout::begin`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Rejected`]: the server refused the order.
    /// - [`CheckoutError::Connection`]: no response was received.
    /// - [`CheckoutError::NotSubmitting`]: [`Checkout::begin`] was not called first; state is
    ///   unchanged.
    pub fn finish(
        &mut self,
        response: Result<OrderReceipt, SubmitFailure>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if !self.is_submitting() {
            return Err(CheckoutError::NotSubmitting);
        }

        match response {
            Ok(receipt) => {
                let payment_url = receipt.payment_url.filter(|url| !url.trim().is_empty());

                match payment_url {
                    Some(payment_url) if self.payment == PaymentMethod::Online => {
                        self.state = CheckoutState::Redirected {
                            payment_url: payment_url.clone(),
                        };

                        Ok(CheckoutOutcome::RedirectToPayment { payment_url })
                    }
                    _ => {
                        self.state = CheckoutState::Success {
                            order_id: receipt.order_id,
                        };

                        Ok(CheckoutOutcome::Placed {
                            order_id: receipt.order_id,
                        })
                    }
                }
            }
            Err(SubmitFailure::Rejected { message }) => Err(self.fail(CheckoutError::Rejected(
                message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| ORDER_REJECTED.to_string()),
            ))),
            Err(SubmitFailure::Connection) => Err(self.fail(CheckoutError::Connection)),
        }
    }

    /// Return to `Idle`, e.g. after the success message was dismissed.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Idle;
    }

    fn fail(&mut self, error: CheckoutError) -> CheckoutError {
        self.state = CheckoutState::Error(error.clone());
        error
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{cart::CartLine, items::ItemId};

    use super::*;

    fn cart() -> Cart {
        Cart::from_lines([
            CartLine {
                id: ItemId::from("a"),
                title: "Пельмени".to_string(),
                price: 300,
                weight: "250 г".to_string(),
                image: Some("/media/a.jpg".to_string()),
                quantity: 2,
            },
            CartLine {
                id: ItemId::from("b"),
                title: "Морс".to_string(),
                price: 250,
                weight: String::new(),
                image: None,
                quantity: 1,
            },
        ])
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

    #[test]
    fn blank_fields_count_as_missing_and_payload_is_trimmed() {
        let blank = CheckoutForm {
            name: "   ".to_string(),
            address: "\t".to_string(),
            ..form()
        };

        assert_eq!(
            blank.missing_fields(),
            [RequiredField::Name, RequiredField::Address]
        );

        let padded = CheckoutForm {
            name: "  Иван ".to_string(),
            address: " ул. Ленина, 1  ".to_string(),
            ..form()
        };
        let payload = OrderPayload::new(&cart(), &padded);

        assert_eq!(payload.name, "Иван");
        assert_eq!(payload.address, "ул. Ленина, 1");
    }

    #[test]
    fn payload_matches_backend_shape() -> TestResult {
        let payload = OrderPayload::new(&cart(), &form());
        let body = serde_json::to_value(&payload)?;

        assert_eq!(body["total_price"], 1000);
        assert_eq!(body["payment_method"], "cash");
        assert_eq!(body["status"], "new");
        assert_eq!(body["phone"], "+7 (912) 345-67-89");

        let items: Value = serde_json::from_str(&payload.items)?;
        assert_eq!(
            items,
            json!([
                {"title": "Пельмени", "quantity": 2, "price": 300},
                {"title": "Морс", "quantity": 1, "price": 250},
            ])
        );

        Ok(())
    }

    #[test]
    fn pickup_sends_placeholder_address_and_no_fee() {
        let form = CheckoutForm {
            delivery: DeliveryMode::Pickup,
            address: String::new(),
            ..form()
        };

        let payload = OrderPayload::new(&cart(), &form);

        assert_eq!(payload.address, PICKUP_ADDRESS);
        assert_eq!(payload.total_price, 850);
    }

    #[test]
    fn every_missing_field_combination_blocks_submission() {
        for mask in 0_u8..8 {
            for delivery in [DeliveryMode::Delivery, DeliveryMode::Pickup] {
                let mut form = CheckoutForm {
                    delivery,
                    ..form()
                };
                if mask & 1 != 0 {
                    form.name.clear();
                }
                if mask & 2 != 0 {
                    form.phone.clear();
                }
                if mask & 4 != 0 {
                    form.address.clear();
                }

                let address_required = delivery == DeliveryMode::Delivery && mask & 4 != 0;
                let blocked = mask & 3 != 0 || address_required;

                let mut checkout = Checkout::new();
                let result = checkout.begin(&cart(), &form);

                assert_eq!(
                    result.is_err(),
                    blocked,
                    "mask {mask:03b} under {delivery:?}"
                );
                if blocked {
                    assert!(
                        matches!(checkout.state(), CheckoutState::Error(CheckoutError::MissingFields(_))),
                        "expected validation error for mask {mask:03b}"
                    );
                }
            }
        }
    }

    #[test]
    fn missing_fields_are_listed() {
        let form = CheckoutForm {
            name: " ".to_string(),
            address: String::new(),
            ..form()
        };

        assert_eq!(
            form.missing_fields(),
            [RequiredField::Name, RequiredField::Address]
        );
    }

    #[test]
    fn empty_cart_is_rejected() {
        let mut checkout = Checkout::new();

        assert_eq!(
            checkout.begin(&Cart::new(), &form()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn second_begin_while_submitting_is_ignored() -> TestResult {
        let mut checkout = Checkout::new();

        checkout.begin(&cart(), &form())?;

        assert_eq!(
            checkout.begin(&cart(), &form()),
            Err(CheckoutError::AlreadySubmitting)
        );
        assert!(checkout.is_submitting());

        Ok(())
    }

    #[test]
    fn finish_without_begin_is_rejected() -> TestResult {
        let mut checkout = Checkout::new();

        assert_eq!(
            checkout.finish(Ok(OrderReceipt::default())),
            Err(CheckoutError::NotSubmitting)
        );
        assert_eq!(checkout.state(), &CheckoutState::Idle);

        checkout.begin(&cart(), &form())?;
        checkout.finish(Ok(OrderReceipt::default()))?;

        assert_eq!(
            checkout.finish(Ok(OrderReceipt::default())),
            Err(CheckoutError::NotSubmitting)
        );
        assert_eq!(checkout.state(), &CheckoutState::Success { order_id: None });

        Ok(())
    }

    #[test]
    fn success_without_payment_url_places_order() -> TestResult {
        let mut checkout = Checkout::new();
        checkout.begin(&cart(), &form())?;

        let outcome = checkout.finish(Ok(OrderReceipt {
            status: Some("success".to_string()),
            order_id: Some(12),
            payment_url: Some("https://pay.example/12".to_string()),
        }))?;

        assert_eq!(outcome, CheckoutOutcome::Placed { order_id: Some(12) });
        assert_eq!(checkout.state(), &CheckoutState::Success { order_id: Some(12) });

        Ok(())
    }

    #[test]
    fn online_payment_with_url_redirects() -> TestResult {
        let mut checkout = Checkout::new();
        let form = CheckoutForm {
            payment: PaymentMethod::Online,
            ..form()
        };
        checkout.begin(&cart(), &form)?;

        let outcome = checkout.finish(Ok(OrderReceipt {
            payment_url: Some("https://pay.example/12".to_string()),
            ..OrderReceipt::default()
        }))?;

        assert_eq!(
            outcome,
            CheckoutOutcome::RedirectToPayment {
                payment_url: "https://pay.example/12".to_string()
            }
        );

        Ok(())
    }

    #[test]
    fn online_payment_without_url_is_placed() -> TestResult {
        let mut checkout = Checkout::new();
        let form = CheckoutForm {
            payment: PaymentMethod::Online,
            ..form()
        };
        checkout.begin(&cart(), &form)?;

        let outcome = checkout.finish(Ok(OrderReceipt::default()))?;

        assert_eq!(outcome, CheckoutOutcome::Placed { order_id: None });

        Ok(())
    }

    #[test]
    fn rejection_uses_server_message_or_fallback() -> TestResult {
        let mut checkout = Checkout::new();
        checkout.begin(&cart(), &form())?;

        let with_message = checkout.finish(Err(SubmitFailure::Rejected {
            message: Some("Неверный телефон".to_string()),
        }));
        assert_eq!(
            with_message,
            Err(CheckoutError::Rejected("Неверный телефон".to_string()))
        );

        checkout.begin(&cart(), &form())?;
        let without = checkout.finish(Err(SubmitFailure::Rejected { message: None }));
        assert_eq!(without, Err(CheckoutError::Rejected(ORDER_REJECTED.to_string())));

        Ok(())
    }

    #[test]
    fn connection_failure_is_retryable() -> TestResult {
        let mut checkout = Checkout::new();
        checkout.begin(&cart(), &form())?;

        assert_eq!(
            checkout.finish(Err(SubmitFailure::Connection)),
            Err(CheckoutError::Connection)
        );
        assert_eq!(checkout.state(), &CheckoutState::Error(CheckoutError::Connection));

        checkout.begin(&cart(), &form())?;
        assert!(checkout.is_submitting());

        Ok(())
    }

    #[test]
    fn prefill_from_user() {
        let mut form = CheckoutForm::default();
        form.prefill(&User {
            id: 1,
            username: "+79123456789".to_string(),
            first_name: "Анна".to_string(),
            email: String::new(),
        });

        assert_eq!(form.name, "Анна");
        assert_eq!(form.phone, "+79123456789");
    }
}
