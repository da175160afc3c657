use clap::Args;
use storefront_app::{config::CheckoutConfig, controller::CheckoutOutcome};

use super::{CartFile, context, print_page};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    cart: CartFile,

    #[command(flatten)]
    checkout: CheckoutConfig,
}

pub(crate) async fn run(args: CheckoutArgs) -> Result<(), String> {
    let context = context(args.cart.load()?, &args.checkout);

    match context.controller.checkout().await {
        CheckoutOutcome::Redirected(target) => {
            println!("redirect: {target}");
            Ok(())
        }
        CheckoutOutcome::Failed(failure) => {
            print_page(&context)?;

            Err(failure.headline().to_string())
        }
        CheckoutOutcome::AlreadyInFlight => Err("a checkout is already in progress".to_string()),
        CheckoutOutcome::EmptyCart => Err("cart is empty".to_string()),
    }
}
