//! Table reservation command.

use std::io::Write;

use clap::Args;

use dacha::reservation::{DEFAULT_GUESTS, ReservationForm};

use crate::{cli::CliError, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct ReserveArgs {
    /// Guest name
    #[arg(long)]
    name: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Time, HH:MM
    #[arg(long)]
    time: String,

    /// Number of guests
    #[arg(long, default_value_t = DEFAULT_GUESTS)]
    guests: u32,

    /// Wishes for the restaurant
    #[arg(long, default_value = "")]
    comment: String,
}

pub(crate) async fn run(
    args: ReserveArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    context
        .reservations
        .submit(ReservationForm {
            name: args.name,
            phone: args.phone,
            date: args.date,
            time: args.time,
            guests: args.guests.to_string(),
            comment: args.comment,
        })
        .await?;

    writeln!(out, "Заявка принята! Мы перезвоним для подтверждения брони.")?;

    Ok(())
}
