//! App Context

use std::sync::Arc;

use storefront::{
    cart::CartSnapshot,
    checkout::CallbackUrls,
    store::{CartStore, InMemoryCartStore},
};

use crate::{
    checkout::CheckoutInitiator,
    config::CheckoutConfig,
    controller::CartPageController,
    navigation::RecordingNavigator,
    payments::PaymentProvider,
};

/// Everything a front end needs to drive one cart page.
#[derive(Debug)]
pub struct AppContext {
    pub store: Arc<InMemoryCartStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub controller: CartPageController,
}

impl AppContext {
    /// Wire a cart page around `snapshot`.
    #[must_use]
    pub fn new(
        snapshot: CartSnapshot,
        config: &CheckoutConfig,
        provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        let store = Arc::new(InMemoryCartStore::from_snapshot(snapshot));
        let navigator = Arc::new(RecordingNavigator::new());

        let initiator = CheckoutInitiator::new(provider, navigator.clone(), config.timeout());

        let controller = CartPageController::new(
            store.clone(),
            initiator,
            CallbackUrls::for_origin(&config.origin),
        );

        Self {
            store,
            navigator,
            controller,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.store.snapshot()
    }
}
