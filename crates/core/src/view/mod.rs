//! Cart Page View Model
//!
//! The cart page as plain data. It is a pure function of the cart snapshot and the checkout
//! state, so any front end (terminal, HTML, native) can draw it without extra logic.

use smallvec::SmallVec;

use crate::{
    cart::{CartError, CartSnapshot},
    checkout::{CheckoutFailure, CheckoutState},
    entries::{CartEntry, EntryKey},
    pricing::FormattedPrice,
    quantity::Quantity,
};

pub mod intents;

pub use intents::CartIntent;

/// Route of the product listing the empty cart links to.
pub const TEMPLATES_ROUTE: &str = "/templates";

/// Navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Link text
    pub label: &'static str,

    /// Target route
    pub href: &'static str,
}

/// Empty-state content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCart {
    /// Heading
    pub heading: &'static str,

    /// Explanatory text
    pub message: &'static str,

    /// Link to the product listing
    pub call_to_action: Link,
}

impl Default for EmptyCart {
    fn default() -> Self {
        Self {
            heading: "Your cart is empty",
            message: "Add some templates to your cart to get started.",
            call_to_action: Link {
                label: "Browse Templates",
                href: TEMPLATES_ROUTE,
            },
        }
    }
}

/// Bounded quantity selector of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantitySelector {
    /// Currently selected quantity
    pub selected: Quantity,

    /// Offered quantities, `1..=10`
    pub options: SmallVec<[Quantity; 10]>,
}

impl QuantitySelector {
    /// Selector with every quantity offered.
    pub fn new(selected: Quantity) -> Self {
        Self {
            selected,
            options: Quantity::options(),
        }
    }

    /// Option values in their textual form, as a select control carries them.
    pub fn option_values(&self) -> Vec<String> {
        self.options.iter().map(ToString::to_string).collect()
    }
}

/// One rendered cart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Entry key, used when dispatching intents for this line
    pub key: EntryKey,

    /// Template title
    pub title: String,

    /// Image reference
    pub image: String,

    /// Image alternative text
    pub image_alt: String,

    /// e.g. `"Standard Version"`
    pub tier_label: String,

    /// Unit price
    pub unit_price: FormattedPrice,

    /// Quantity selector
    pub quantity: QuantitySelector,

    /// Accessible label of the removal control
    pub remove_label: &'static str,
}

impl From<&CartEntry> for CartLine {
    fn from(entry: &CartEntry) -> Self {
        let template = entry.template();

        Self {
            key: entry.key(),
            title: template.title.clone(),
            image: template.image.clone(),
            image_alt: template.title.clone(),
            tier_label: format!("{} Version", capitalize_words(entry.tier().as_str())),
            unit_price: FormattedPrice::from_money(entry.unit_price()),
            quantity: QuantitySelector::new(entry.quantity()),
            remove_label: "Remove item",
        }
    }
}

/// Subtotal block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Live cart total, two decimals
    pub subtotal: FormattedPrice,

    /// Tax is only known on the hosted checkout page.
    pub tax_notice: &'static str,
}

/// Checkout control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutButton {
    /// Label
    pub label: &'static str,

    /// Whether the control rejects activation
    pub disabled: bool,
}

impl From<&CheckoutState> for CheckoutButton {
    fn from(state: &CheckoutState) -> Self {
        Self {
            label: state.button_label(),
            disabled: state.is_processing(),
        }
    }
}

/// Dismissible banner shown after a failed checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    /// Shopper-facing headline
    pub headline: &'static str,

    /// Diagnostic detail
    pub detail: String,

    /// Whether the failure is worth retrying
    pub retryable: bool,
}

impl From<&CheckoutFailure> for ErrorBanner {
    fn from(failure: &CheckoutFailure) -> Self {
        Self {
            headline: failure.headline(),
            detail: failure.message().to_string(),
            retryable: matches!(failure, CheckoutFailure::Retry { .. }),
        }
    }
}

/// Itemized cart content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemizedCart {
    /// Page heading
    pub heading: &'static str,

    /// One line per entry, in cart order
    pub lines: Vec<CartLine>,

    /// Subtotal block
    pub summary: OrderSummary,

    /// Checkout control
    pub checkout: CheckoutButton,

    /// Failure banner of the last attempt
    pub banner: Option<ErrorBanner>,
}

/// The cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPage {
    /// Nothing in the cart
    Empty(EmptyCart),

    /// One or more entries
    Itemized(ItemizedCart),
}

impl CartPage {
    /// Render the page for a snapshot and checkout state.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the total cannot be calculated.
    pub fn render(snapshot: &CartSnapshot, state: &CheckoutState) -> Result<Self, CartError> {
        if snapshot.is_empty() {
            return Ok(Self::Empty(EmptyCart::default()));
        }

        let total = snapshot.total()?;

        Ok(Self::Itemized(ItemizedCart {
            heading: "Shopping Cart",
            lines: snapshot.iter().map(CartLine::from).collect(),
            summary: OrderSummary {
                subtotal: FormattedPrice::from_money(&total),
                tax_notice: "Calculated at checkout",
            },
            checkout: CheckoutButton::from(state),
            banner: state.failure().map(ErrorBanner::from),
        }))
    }

    /// Returns the itemized content, if any.
    pub fn itemized(&self) -> Option<&ItemizedCart> {
        match self {
            Self::Itemized(cart) => Some(cart),
            Self::Empty(_) => None,
        }
    }

    /// Returns true for the empty state.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Uppercase the first letter of every word.
fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();

            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::entries::{Template, TemplateId, Tier};

    use super::*;

    fn entry(id: &str, title: &str, tier: &str, minor: i64, quantity: u8) -> TestResult<CartEntry> {
        Ok(CartEntry::new(
            Template {
                id: TemplateId::new(id),
                title: title.to_string(),
                image: format!("/images/{id}.png"),
            },
            Tier::new(tier),
            Money::from_minor(minor, USD),
            Quantity::new(quantity)?,
        ))
    }

    #[test]
    fn empty_snapshot_renders_only_the_empty_state() -> TestResult {
        let page = CartPage::render(&CartSnapshot::new(USD), &CheckoutState::Processing)?;

        assert!(page.is_empty());
        assert!(page.itemized().is_none());

        let CartPage::Empty(empty) = page else {
            panic!("expected empty state");
        };

        assert_eq!(empty.heading, "Your cart is empty");
        assert_eq!(empty.call_to_action.href, "/templates");
        assert_eq!(empty.call_to_action.label, "Browse Templates");

        Ok(())
    }

    #[test]
    fn itemized_page_shows_lines_and_two_decimal_total() -> TestResult {
        let snapshot = CartSnapshot::with_entries(
            [
                entry("a", "Poster", "standard", 19_99, 2)?,
                entry("b", "Flyer", "extended license", 5_00, 1)?,
            ],
            USD,
        )?;

        let page = CartPage::render(&snapshot, &CheckoutState::Idle)?;
        let cart = page.itemized().ok_or("expected itemized page")?;

        assert_eq!(cart.heading, "Shopping Cart");
        assert_eq!(cart.summary.subtotal.amount(), "44.98");
        assert_eq!(cart.summary.subtotal.to_string(), "$44.98");
        assert_eq!(cart.summary.tax_notice, "Calculated at checkout");
        assert_eq!(cart.lines.len(), 2);

        let first = cart.lines.first().ok_or("missing line")?;

        assert_eq!(first.title, "Poster");
        assert_eq!(first.image_alt, "Poster");
        assert_eq!(first.tier_label, "Standard Version");
        assert_eq!(first.unit_price.to_string(), "$19.99");
        assert_eq!(first.quantity.selected.get(), 2);
        assert_eq!(first.quantity.option_values().len(), 10);
        assert_eq!(first.remove_label, "Remove item");

        let second = cart.lines.get(1).ok_or("missing line")?;

        assert_eq!(second.tier_label, "Extended License Version");

        Ok(())
    }

    #[test]
    fn checkout_button_follows_state() -> TestResult {
        let snapshot = CartSnapshot::with_entries([entry("a", "Poster", "standard", 10_00, 1)?], USD)?;

        let processing = CartPage::render(&snapshot, &CheckoutState::Processing)?;
        let settled = CartPage::render(&snapshot, &CheckoutState::Succeeded)?;

        let processing = processing.itemized().ok_or("expected itemized page")?;
        let settled = settled.itemized().ok_or("expected itemized page")?;

        assert_eq!(
            processing.checkout,
            CheckoutButton {
                label: "Processing...",
                disabled: true
            }
        );
        assert_eq!(
            settled.checkout,
            CheckoutButton {
                label: "Proceed to Checkout",
                disabled: false
            }
        );

        Ok(())
    }

    #[test]
    fn failed_state_adds_a_banner() -> TestResult {
        let snapshot = CartSnapshot::with_entries([entry("a", "Poster", "standard", 10_00, 1)?], USD)?;
        let state = CheckoutState::Failed(CheckoutFailure::Retry {
            message: "session creation timed out".to_string(),
        });

        let page = CartPage::render(&snapshot, &state)?;
        let cart = page.itemized().ok_or("expected itemized page")?;
        let banner = cart.banner.as_ref().ok_or("expected banner")?;

        assert!(banner.retryable);
        assert_eq!(banner.detail, "session creation timed out");
        assert!(!cart.checkout.disabled);

        Ok(())
    }

    #[test]
    fn capitalize_words_handles_edges() {
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("pro"), "Pro");
        assert_eq!(capitalize_words("é dition"), "É Dition");
    }
}
