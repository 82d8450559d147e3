//! Table rendering for command output.

use std::{io, ops::Range};

use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use dacha::{
    cart::Cart,
    pricing::{DeliveryMode, Quote, line_total, money},
};

/// Render a whole-rouble amount.
pub(crate) fn price(amount: u64) -> String {
    money(amount).to_string()
}

/// Finish a table built row by row: rounded borders, bold header, right-aligned amounts.
pub(crate) fn table(builder: Builder, amount_columns: Range<usize>) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(amount_columns), Alignment::right());

    table
}

/// Write the cart lines and its price breakdown.
pub(crate) fn write_cart(
    out: &mut impl io::Write,
    cart: &Cart,
    quote: &Quote,
    mode: DeliveryMode,
) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Корзина пуста");
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Блюдо", "Вес", "Кол-во", "Цена", "Сумма"]);

    for line in cart.lines() {
        builder.push_record([
            line.id.to_string(),
            line.title.clone(),
            line.weight.clone(),
            line.quantity.to_string(),
            price(line.price),
            price(line_total(line)),
        ]);
    }

    writeln!(out, "{}", table(builder, 3..6))?;
    write_quote(out, quote, mode)
}

/// Write the items total, delivery fee and amount to pay.
pub(crate) fn write_quote(
    out: &mut impl io::Write,
    quote: &Quote,
    mode: DeliveryMode,
) -> io::Result<()> {
    writeln!(out, "Товары:   {}", price(quote.items_total))?;

    match mode {
        DeliveryMode::Pickup => writeln!(out, "Доставка: самовывоз")?,
        DeliveryMode::Delivery if quote.free_delivery() => {
            writeln!(out, "Доставка: бесплатно")?;
        }
        DeliveryMode::Delivery => {
            writeln!(out, "Доставка: {}", price(quote.delivery_fee))?;
            writeln!(
                out,
                "До бесплатной доставки осталось {}",
                price(quote.until_free_delivery())
            )?;
        }
    }

    writeln!(out, "Итого:    {}", price(quote.total))
}

#[cfg(test)]
mod tests {
    use dacha::{cart::CartLine, items::ItemId, pricing::quote};
    use testresult::TestResult;

    use super::*;

    fn cart() -> Cart {
        Cart::from_lines([CartLine {
            id: ItemId::Number(5),
            title: "Пельмени".to_string(),
            price: 300,
            weight: "250 г".to_string(),
            image: None,
            quantity: 2,
        }])
    }

    #[test]
    fn empty_cart_message() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &Cart::new(), &quote(&Cart::new(), DeliveryMode::Delivery), DeliveryMode::Delivery)?;

        assert_eq!(String::from_utf8(out)?, "Корзина пуста\n");

        Ok(())
    }

    #[test]
    fn cart_lists_lines_and_remaining_amount() -> TestResult {
        let cart = cart();
        let mut out = Vec::new();

        write_cart(&mut out, &cart, &quote(&cart, DeliveryMode::Delivery), DeliveryMode::Delivery)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Пельмени"), "missing title in {text}");
        assert!(text.contains("До бесплатной доставки"), "missing hint in {text}");

        Ok(())
    }

    #[test]
    fn pickup_has_no_fee_line() -> TestResult {
        let cart = cart();
        let mut out = Vec::new();

        write_quote(&mut out, &quote(&cart, DeliveryMode::Pickup), DeliveryMode::Pickup)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("самовывоз"), "missing pickup line in {text}");
        assert!(!text.contains("До бесплатной"), "unexpected hint in {text}");

        Ok(())
    }
}
