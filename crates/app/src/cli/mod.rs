use std::{io, path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use storefront::{
    cart::CartSnapshot,
    entries::{EntryKey, TemplateId, Tier},
};
use storefront_app::{
    config::{CheckoutConfig, LoggingConfig},
    context::AppContext,
    fixtures::CartFixture,
    observability,
    payments::GlobalStripe,
    render,
};

mod checkout;
mod edit;
mod show;

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Storefront cart page", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the cart page
    Show(show::ShowArgs),

    /// Pick a quantity for one cart entry
    UpdateQuantity(edit::UpdateQuantityArgs),

    /// Remove one cart entry
    Remove(edit::RemoveArgs),

    /// Start a hosted checkout for the cart
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Show(args) => show::run(&args),
            Commands::UpdateQuantity(args) => edit::update_quantity(&args),
            Commands::Remove(args) => edit::remove(&args),
            Commands::Checkout(args) => checkout::run(args).await,
        }
    }
}

/// Cart file shared by every command.
#[derive(Debug, Args)]
pub(crate) struct CartFile {
    /// Path of the YAML cart file
    #[arg(long = "cart", env = "STOREFRONT_CART")]
    path: PathBuf,
}

impl CartFile {
    fn load(&self) -> Result<CartSnapshot, String> {
        CartFixture::load(&self.path)
            .and_then(|fixture| fixture.to_snapshot())
            .map_err(|error| format!("failed to load {}: {error}", self.path.display()))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), String> {
        CartFixture::from_snapshot(snapshot)
            .save(&self.path)
            .map_err(|error| format!("failed to save {}: {error}", self.path.display()))
    }
}

/// Entry selector shared by the editing commands.
#[derive(Debug, Args)]
pub(crate) struct EntrySelector {
    /// Template identifier
    #[arg(long)]
    template: String,

    /// Pricing tier
    #[arg(long)]
    tier: String,
}

impl EntrySelector {
    fn key(&self) -> EntryKey {
        EntryKey::new(TemplateId::new(self.template.as_str()), Tier::new(self.tier.as_str()))
    }
}

fn context(snapshot: CartSnapshot, config: &CheckoutConfig) -> AppContext {
    AppContext::new(snapshot, config, Arc::new(GlobalStripe))
}

fn print_page(context: &AppContext) -> Result<(), String> {
    let page = context
        .controller
        .render()
        .map_err(|error| format!("failed to render cart: {error}"))?;

    render::write_page(io::stdout().lock(), &page)
        .map_err(|error| format!("failed to write cart: {error}"))
}
