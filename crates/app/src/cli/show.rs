use clap::Args;
use storefront_app::config::CheckoutConfig;

use super::{CartFile, context, print_page};

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    cart: CartFile,
}

pub(crate) fn run(args: &ShowArgs) -> Result<(), String> {
    let context = context(args.cart.load()?, &CheckoutConfig::default());

    print_page(&context)
}
