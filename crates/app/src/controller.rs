//! Cart Page Controller
//!
//! Owns the checkout lifecycle of one cart page. Renders the page from the store and the
//! current checkout state, forwards shopper intents, and pushes a fresh render to watchers
//! whenever either of them changes.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{error, info, warn};

use storefront::{
    checkout::{CallbackUrls, CheckoutFailure, CheckoutGate, CheckoutRequest, CheckoutState},
    cart::{CartError, CartSnapshot},
    store::{CartStore, SubscriptionKey},
    view::{
        CartIntent, CartPage,
        intents::{remove, select_quantity},
    },
};

use crate::{checkout::CheckoutInitiator, payments::RedirectTarget};

/// Callback receiving each re-rendered page.
pub type PageObserver = Box<dyn Fn(&CartPage) + Send + Sync>;

/// Result of a checkout trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The shopper was sent to the hosted checkout page.
    Redirected(RedirectTarget),

    /// The attempt failed; the cart is unchanged.
    Failed(CheckoutFailure),

    /// Another attempt was already running; nothing happened.
    AlreadyInFlight,

    /// The cart had no entries; nothing happened.
    EmptyCart,
}

#[derive(Default)]
struct Shared {
    state: Mutex<CheckoutState>,
    watchers: Mutex<Vec<Arc<PageObserver>>>,
}

impl Shared {
    fn state(&self) -> CheckoutState {
        lock(&self.state).clone()
    }

    fn publish(&self, snapshot: &CartSnapshot) {
        let watchers = lock(&self.watchers).clone();

        if watchers.is_empty() {
            return;
        }

        match CartPage::render(snapshot, &self.state()) {
            Ok(page) => {
                for watcher in &watchers {
                    watcher(&page);
                }
            }
            Err(error) => error!(%error, "failed to render cart page"),
        }
    }
}

/// Controller of the cart page.
pub struct CartPageController {
    store: Arc<dyn CartStore>,
    initiator: CheckoutInitiator,
    callbacks: CallbackUrls,
    gate: CheckoutGate,
    shared: Arc<Shared>,
    subscription: SubscriptionKey,
}

impl std::fmt::Debug for CartPageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPageController")
            .field("initiator", &self.initiator)
            .field("callbacks", &self.callbacks)
            .field("gate", &self.gate)
            .field("state", &self.shared.state())
            .finish_non_exhaustive()
    }
}

impl CartPageController {
    /// Create a controller and subscribe it to `store`.
    #[must_use]
    pub fn new(
        store: Arc<dyn CartStore>,
        initiator: CheckoutInitiator,
        callbacks: CallbackUrls,
    ) -> Self {
        let shared = Arc::new(Shared::default());
        let observer = Arc::clone(&shared);

        let subscription = store.subscribe(Box::new(move |snapshot| observer.publish(snapshot)));

        Self {
            store,
            initiator,
            callbacks,
            gate: CheckoutGate::new(),
            shared,
            subscription,
        }
    }

    /// Current checkout state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.shared.state()
    }

    /// Render the page for the current snapshot and checkout state.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart total cannot be calculated.
    pub fn render(&self) -> Result<CartPage, CartError> {
        CartPage::render(&self.store.snapshot(), &self.shared.state())
    }

    /// Receive a fresh render after every cart or checkout state change.
    pub fn watch(&self, observer: PageObserver) {
        lock(&self.shared.watchers).push(Arc::new(observer));
    }

    /// Apply a shopper intent. Returns the outcome for [`CartIntent::Checkout`].
    #[tracing::instrument(name = "cart.handle", skip(self), fields(rejected))]
    pub async fn handle(&self, intent: CartIntent) -> Option<CheckoutOutcome> {
        match intent {
            CartIntent::SelectQuantity { key, value } => {
                if let Err(error) = select_quantity(self.store.as_ref(), &key, &value) {
                    tracing::Span::current().record("rejected", tracing::field::display(&error));
                }

                None
            }
            CartIntent::Remove { key } => {
                remove(self.store.as_ref(), &key);
                None
            }
            CartIntent::Checkout => Some(self.checkout().await),
            CartIntent::DismissError => {
                self.dismiss_error();
                None
            }
        }
    }

    /// Run one checkout attempt.
    ///
    /// At most one attempt runs at a time; the control shows as processing while it does. A
    /// failed attempt leaves the cart untouched and exposes the failure as a banner.
    #[tracing::instrument(name = "cart.checkout", skip(self), fields(lines))]
    pub async fn checkout(&self) -> CheckoutOutcome {
        let Some(_ticket) = self.gate.try_begin() else {
            info!("checkout already in flight");

            return CheckoutOutcome::AlreadyInFlight;
        };

        let snapshot = self.store.snapshot();

        tracing::Span::current().record("lines", snapshot.len());

        let request = match CheckoutRequest::from_snapshot(&snapshot, &self.callbacks) {
            Ok(request) => request,
            Err(error) => {
                warn!(%error, "checkout requested for an empty cart");

                return CheckoutOutcome::EmptyCart;
            }
        };

        self.transition(CheckoutState::Processing);

        let started = Instant::now();
        let result = self.initiator.initiate(&request).await;
        let elapsed = started.elapsed().human(Truncate::Nano);

        match result {
            Ok(target) => {
                info!(%target, %elapsed, "redirecting to hosted checkout");

                self.transition(CheckoutState::Succeeded);

                CheckoutOutcome::Redirected(target)
            }
            Err(error) => {
                error!(%error, %elapsed, "checkout failed");

                let failure = error.failure();

                self.transition(CheckoutState::Failed(failure.clone()));

                CheckoutOutcome::Failed(failure)
            }
        }
    }

    /// Clear the failure banner, if one is shown.
    pub fn dismiss_error(&self) {
        let dismissed = {
            let mut state = lock(&self.shared.state);

            if state.failure().is_some() {
                *state = CheckoutState::Idle;
                true
            } else {
                false
            }
        };

        if dismissed {
            self.shared.publish(&self.store.snapshot());
        }
    }

    fn transition(&self, next: CheckoutState) {
        *lock(&self.shared.state) = next;

        self.shared.publish(&self.store.snapshot());
    }
}

impl Drop for CartPageController {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
