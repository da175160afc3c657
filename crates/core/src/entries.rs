//! Cart Entries

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::quantity::Quantity;

/// Opaque identifier of a product template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    /// Wrap a raw template identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant label (edition/version) of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tier(String);

impl Tier {
    /// Wrap a raw tier label.
    pub fn new(tier: impl Into<String>) -> Self {
        Self(tier.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique key of an entry within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    /// Product template
    pub template: TemplateId,

    /// Template tier
    pub tier: Tier,
}

impl EntryKey {
    /// Create a key from its parts.
    pub fn new(template: TemplateId, tier: Tier) -> Self {
        Self { template, tier }
    }

    /// Returns true if this key identifies the given template and tier.
    pub fn matches(&self, template: &TemplateId, tier: &Tier) -> bool {
        self.template == *template && self.tier == *tier
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.template, self.tier)
    }
}

/// Display metadata of a product template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template identifier
    pub id: TemplateId,

    /// Template title
    pub title: String,

    /// Image reference used by the image-delivery layer
    pub image: String,
}

/// One purchasable line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    template: Template,
    tier: Tier,
    unit_price: Money<'static, Currency>,
    quantity: Quantity,
}

impl CartEntry {
    /// Creates a new entry.
    pub fn new(
        template: Template,
        tier: Tier,
        unit_price: Money<'static, Currency>,
        quantity: Quantity,
    ) -> Self {
        Self {
            template,
            tier,
            unit_price,
            quantity,
        }
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.template.id.clone(), self.tier.clone())
    }

    /// Returns true if this entry is keyed by the given template and tier.
    pub fn is_keyed_by(&self, template: &TemplateId, tier: &Tier) -> bool {
        self.template.id == *template && self.tier == *tier
    }

    /// Returns the template metadata.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the tier label.
    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Replaces the quantity.
    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Display name used for checkout lines, `"{title} - {tier}"`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.template.title, self.tier)
    }
}
