//! Checkout command.

use std::io::Write;

use clap::{Args, ValueEnum};
use tracing::debug;

use dacha::{
    checkout::{CheckoutForm, CheckoutOutcome, PaymentMethod},
    pricing::{DeliveryMode, quote},
};

use crate::{
    checkout::place_order,
    cli::{CliError, render::write_quote},
    context::AppContext,
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Payment {
    /// Card payment online
    Online,

    /// Card or transfer on receipt
    Transfer,

    /// Cash on receipt
    #[default]
    Cash,
}

impl From<Payment> for PaymentMethod {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::Online => PaymentMethod::Online,
            Payment::Transfer => PaymentMethod::Transfer,
            Payment::Cash => PaymentMethod::Cash,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer name; defaults to the signed-in user's name
    #[arg(long)]
    name: Option<String>,

    /// Phone number; defaults to the signed-in user's phone
    #[arg(long)]
    phone: Option<String>,

    /// Delivery address
    #[arg(long, default_value = "")]
    address: String,

    /// Collect the order instead of delivery
    #[arg(long)]
    pickup: bool,

    /// Payment method
    #[arg(long, value_enum, default_value_t = Payment::Cash)]
    payment: Payment,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = CheckoutForm {
        address: args.address,
        delivery: if args.pickup {
            DeliveryMode::Pickup
        } else {
            DeliveryMode::Delivery
        },
        payment: args.payment.into(),
        ..CheckoutForm::default()
    };

    if (args.name.is_none() || args.phone.is_none())
        && let Some(user) = context.auth.refresh().await
    {
        debug!(user = user.id, "prefilling checkout form");
        form.prefill(user);
    }

    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(phone) = args.phone {
        form.set_phone(&phone);
    }

    write_quote(out, &quote(context.cart.cart(), form.delivery), form.delivery)?;

    match place_order(&mut context.cart, &context.checkout, &form).await? {
        CheckoutOutcome::Placed { order_id } => {
            match order_id {
                Some(order_id) => writeln!(out, "Заказ №{order_id} успешно оформлен!")?,
                None => writeln!(out, "Заказ успешно оформлен!")?,
            }
            writeln!(out, "Мы свяжемся с вами в ближайшее время для подтверждения.")?;
        }
        CheckoutOutcome::RedirectToPayment { payment_url } => {
            writeln!(out, "Перейдите по ссылке для оплаты: {payment_url}")?;
        }
    }

    Ok(())
}
