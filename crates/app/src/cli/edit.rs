use clap::Args;
use storefront::view::intents;
use storefront_app::config::CheckoutConfig;

use super::{CartFile, EntrySelector, context, print_page};

#[derive(Debug, Args)]
pub(crate) struct UpdateQuantityArgs {
    #[command(flatten)]
    cart: CartFile,

    #[command(flatten)]
    entry: EntrySelector,

    /// Quantity to select, 1 to 10
    #[arg(long)]
    quantity: String,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    #[command(flatten)]
    cart: CartFile,

    #[command(flatten)]
    entry: EntrySelector,
}

pub(crate) fn update_quantity(args: &UpdateQuantityArgs) -> Result<(), String> {
    let context = context(args.cart.load()?, &CheckoutConfig::default());
    let key = args.entry.key();

    if context.snapshot().get(&key.template, &key.tier).is_none() {
        return Err(format!("no cart entry {key}"));
    }

    intents::select_quantity(context.store.as_ref(), &key, &args.quantity)
        .map_err(|error| format!("invalid quantity: {error}"))?;

    args.cart.save(&context.snapshot())?;

    print_page(&context)
}

pub(crate) fn remove(args: &RemoveArgs) -> Result<(), String> {
    let context = context(args.cart.load()?, &CheckoutConfig::default());
    let key = args.entry.key();

    if context.snapshot().get(&key.template, &key.tier).is_none() {
        return Err(format!("no cart entry {key}"));
    }

    intents::remove(context.store.as_ref(), &key);

    args.cart.save(&context.snapshot())?;

    print_page(&context)
}
