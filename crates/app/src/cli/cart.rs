//! Cart commands.

use std::{convert::Infallible, io::Write};

use clap::{Args, Subcommand};

use dacha::{items::ItemId, pricing::{DeliveryMode, quote}};

use crate::{
    cli::{CliError, render::write_cart},
    context::AppContext,
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: Option<CartSubcommand>,

    /// Price the cart for pickup instead of delivery
    #[arg(long, global = true)]
    pickup: bool,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,

    /// Add one unit of a dish from the menu
    Add(ItemArgs),

    /// Increase a line's quantity by one
    Inc(ItemArgs),

    /// Decrease a line's quantity by one, removing it at zero
    Dec(ItemArgs),

    /// Remove a line
    Remove(ItemArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Dish id
    #[arg(value_parser = item_id)]
    id: ItemId,
}

fn item_id(raw: &str) -> Result<ItemId, Infallible> {
    raw.parse()
}

pub(crate) async fn run(
    command: CartCommand,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command.unwrap_or(CartSubcommand::Show) {
        CartSubcommand::Show => {}
        CartSubcommand::Add(ItemArgs { id }) => {
            let menu = context.api.menu().await?;
            let item = menu.find(&id).ok_or(CliError::UnknownItem(id))?;

            context.cart.add(item);
            writeln!(out, "Добавлено: {}", item.title)?;
        }
        CartSubcommand::Inc(ItemArgs { id }) => change(context, &id, 1)?,
        CartSubcommand::Dec(ItemArgs { id }) => change(context, &id, -1)?,
        CartSubcommand::Remove(ItemArgs { id }) => {
            if context.cart.cart().line(&id).is_none() {
                return Err(CliError::NotInCart(id));
            }

            context.cart.remove(&id);
        }
        CartSubcommand::Clear => context.cart.clear(),
    }

    let mode = if command.pickup {
        DeliveryMode::Pickup
    } else {
        DeliveryMode::Delivery
    };

    let cart = context.cart.cart();
    write_cart(out, cart, &quote(cart, mode), mode)?;

    Ok(())
}

fn change(context: &mut AppContext, id: &ItemId, delta: i64) -> Result<(), CliError> {
    if context.cart.cart().line(id).is_none() {
        return Err(CliError::NotInCart(id.clone()));
    }

    context.cart.update_quantity(id, delta);

    Ok(())
}
