//! Terminal rendering of the cart page.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use storefront::view::{CartPage, EmptyCart, ItemizedCart};

/// Write `page` to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_page(mut out: impl io::Write, page: &CartPage) -> io::Result<()> {
    match page {
        CartPage::Empty(empty) => write_empty(&mut out, empty),
        CartPage::Itemized(cart) => write_itemized(&mut out, cart),
    }
}

fn write_empty(out: &mut impl io::Write, empty: &EmptyCart) -> io::Result<()> {
    writeln!(out, "{}", empty.heading)?;
    writeln!(out, "{}", empty.message)?;
    writeln!(
        out,
        "{} ({})",
        empty.call_to_action.label, empty.call_to_action.href
    )
}

fn write_itemized(out: &mut impl io::Write, cart: &ItemizedCart) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Template", "Version", "Price", "Quantity"]);

    for line in &cart.lines {
        builder.push_record([
            line.key.to_string(),
            line.title.clone(),
            line.tier_label.clone(),
            line.unit_price.to_string(),
            format!(
                "{} of {}-{}",
                line.quantity.selected,
                line.quantity.options.first().map_or(0, |q| q.get()),
                line.quantity.options.last().map_or(0, |q| q.get()),
            ),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{}\n", cart.heading)?;
    writeln!(out, "{table}\n")?;
    writeln!(out, "Subtotal  {}", cart.summary.subtotal)?;
    writeln!(out, "Tax       {}", cart.summary.tax_notice)?;

    let disabled = if cart.checkout.disabled { " (disabled)" } else { "" };

    writeln!(out, "\n[ {} ]{disabled}", cart.checkout.label)?;

    if let Some(banner) = &cart.banner {
        writeln!(out, "\n! {}", banner.headline)?;
        writeln!(out, "  {}", banner.detail)?;
    }

    Ok(())
}
