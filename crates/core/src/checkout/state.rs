//! Checkout State

use std::fmt;

/// Label of the checkout control when it can be used.
pub const PROCEED_LABEL: &str = "Proceed to Checkout";

/// Label of the checkout control while an attempt is running.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Why a checkout attempt failed, as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutFailure {
    /// Payments are misconfigured or the provider cannot be reached.
    ProviderUnavailable {
        /// Diagnostic detail
        message: String,
    },

    /// The attempt failed in a way that may succeed on a second try.
    Retry {
        /// Diagnostic detail
        message: String,
    },
}

impl CheckoutFailure {
    /// Headline shown in the error banner.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => "Checkout is currently unavailable.",
            Self::Retry { .. } => "We couldn't start checkout. Please try again.",
        }
    }

    /// Diagnostic detail of the failure.
    pub fn message(&self) -> &str {
        match self {
            Self::ProviderUnavailable { message } | Self::Retry { message } => message,
        }
    }
}

impl fmt::Display for CheckoutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.headline(), self.message())
    }
}

/// Checkout lifecycle of the cart page.
///
/// `Succeeded` and `Failed` are settled states: the control behaves exactly as in `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No attempt has run yet, or the last failure was dismissed.
    #[default]
    Idle,

    /// An attempt is in flight.
    Processing,

    /// The last attempt handed the shopper to the hosted checkout page.
    Succeeded,

    /// The last attempt failed.
    Failed(CheckoutFailure),
}

impl CheckoutState {
    /// Returns true while an attempt is in flight.
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Returns the failure of the last attempt, if any.
    pub fn failure(&self) -> Option<&CheckoutFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Label of the checkout control in this state.
    pub fn button_label(&self) -> &'static str {
        if self.is_processing() {
            PROCESSING_LABEL
        } else {
            PROCEED_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_processing_changes_the_label() {
        let failed = CheckoutState::Failed(CheckoutFailure::Retry {
            message: "timeout".to_string(),
        });

        assert_eq!(CheckoutState::Idle.button_label(), "Proceed to Checkout");
        assert_eq!(CheckoutState::Processing.button_label(), "Processing...");
        assert_eq!(CheckoutState::Succeeded.button_label(), "Proceed to Checkout");
        assert_eq!(failed.button_label(), "Proceed to Checkout");
    }

    #[test]
    fn failure_is_exposed_only_when_failed() {
        let failure = CheckoutFailure::ProviderUnavailable {
            message: "missing publishable key".to_string(),
        };

        assert_eq!(
            CheckoutState::Failed(failure.clone()).failure(),
            Some(&failure)
        );
        assert_eq!(CheckoutState::Succeeded.failure(), None);
        assert_eq!(failure.headline(), "Checkout is currently unavailable.");
        assert_eq!(failure.message(), "missing publishable key");
    }
}
