//! Checkout initiation: create a session, resolve its page, navigate.

use std::{sync::Arc, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use storefront::checkout::{CheckoutFailure, CheckoutRequest, CheckoutRequestError};

use crate::{
    navigation::Navigator,
    payments::{ConfigError, PaymentProvider, RedirectError, RedirectTarget, SessionError},
};

/// Default limit for creating a session.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// A checkout attempt failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Request(#[from] CheckoutRequestError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Redirect(#[from] RedirectError),

    #[error("payment provider did not answer within {0:?}")]
    Timeout(Duration),
}

impl CheckoutError {
    /// Shopper-facing classification of the error.
    #[must_use]
    pub fn failure(&self) -> CheckoutFailure {
        let message = self.to_string();

        match self {
            Self::Session(SessionError::Unconfigured(_))
            | Self::Redirect(RedirectError::InvalidTarget(_)) => {
                CheckoutFailure::ProviderUnavailable { message }
            }
            Self::Session(SessionError::Rejected { status, .. })
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                CheckoutFailure::ProviderUnavailable { message }
            }
            _ => CheckoutFailure::Retry { message },
        }
    }
}

impl From<ConfigError> for CheckoutError {
    fn from(error: ConfigError) -> Self {
        Self::Session(SessionError::Unconfigured(error))
    }
}

/// Drives one checkout attempt against a payment provider.
#[derive(Clone)]
pub struct CheckoutInitiator {
    provider: Arc<dyn PaymentProvider>,
    navigator: Arc<dyn Navigator>,
    timeout: Duration,
}

impl std::fmt::Debug for CheckoutInitiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutInitiator")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CheckoutInitiator {
    #[must_use]
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        navigator: Arc<dyn Navigator>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            navigator,
            timeout,
        }
    }

    /// Create a session for `request` and send the shopper to its hosted page.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the session cannot be created in time, has no usable
    /// page, or the navigation is refused.
    pub async fn initiate(&self, request: &CheckoutRequest) -> Result<RedirectTarget, CheckoutError> {
        let session = tokio::time::timeout(self.timeout, self.provider.create_session(request))
            .await
            .map_err(|_elapsed| CheckoutError::Timeout(self.timeout))??;

        debug!(session = %session.id, "resolving checkout page");

        let target = self.provider.redirect_target(&session)?;

        self.navigator
            .navigate(&target)
            .map_err(RedirectError::from)?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use rusty_money::{Money, iso::USD};
    use storefront::prelude::*;
    use testresult::TestResult;

    use crate::{
        navigation::{MockNavigator, NavigationError},
        payments::{CheckoutSession, MockPaymentProvider},
    };

    use super::*;

    fn request() -> TestResult<CheckoutRequest> {
        let snapshot = CartSnapshot::with_entries(
            [CartEntry::new(
                Template {
                    id: TemplateId::new("a"),
                    title: "Poster".to_string(),
                    image: "/poster.png".to_string(),
                },
                Tier::new("standard"),
                Money::from_minor(10_00, USD),
                Quantity::ONE,
            )],
            USD,
        )?;

        Ok(CheckoutRequest::from_snapshot(
            &snapshot,
            &CallbackUrls::for_origin("https://shop.example"),
        )?)
    }

    fn session() -> CheckoutSession {
        CheckoutSession {
            id: "cs_test_1".to_string(),
            url: None,
        }
    }

    #[tokio::test]
    async fn navigates_to_resolved_target() -> TestResult {
        let mut provider = MockPaymentProvider::new();
        let mut navigator = MockNavigator::new();

        provider
            .expect_create_session()
            .once()
            .withf(|request| request.line_items.len() == 1)
            .return_once(|_| Ok(session()));

        provider
            .expect_redirect_target()
            .once()
            .withf(|session| session.id == "cs_test_1")
            .return_once(|_| Ok(RedirectTarget::new("https://checkout.stripe.com/c/pay/cs_test_1")));

        navigator
            .expect_navigate()
            .once()
            .withf(|target| target.as_str() == "https://checkout.stripe.com/c/pay/cs_test_1")
            .return_once(|_| Ok(()));

        let initiator =
            CheckoutInitiator::new(Arc::new(provider), Arc::new(navigator), DEFAULT_TIMEOUT);

        let target = initiator.initiate(&request()?).await?;

        assert_eq!(target.as_str(), "https://checkout.stripe.com/c/pay/cs_test_1");

        Ok(())
    }

    #[tokio::test]
    async fn session_failure_skips_navigation() -> TestResult {
        let mut provider = MockPaymentProvider::new();
        let mut navigator = MockNavigator::new();

        provider
            .expect_create_session()
            .once()
            .return_once(|_| Err(SessionError::MalformedResponse("missing session id".to_string())));

        provider.expect_redirect_target().never();
        navigator.expect_navigate().never();

        let initiator =
            CheckoutInitiator::new(Arc::new(provider), Arc::new(navigator), DEFAULT_TIMEOUT);

        let result = initiator.initiate(&request()?).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Session(SessionError::MalformedResponse(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn slow_provider_times_out() -> TestResult {
        struct Stalled;

        #[async_trait::async_trait]
        impl PaymentProvider for Stalled {
            async fn create_session(
                &self,
                _request: &CheckoutRequest,
            ) -> Result<CheckoutSession, SessionError> {
                tokio::time::sleep(Duration::from_secs(60)).await;

                Ok(session())
            }

            fn redirect_target(
                &self,
                _session: &CheckoutSession,
            ) -> Result<RedirectTarget, RedirectError> {
                Err(RedirectError::MissingSession)
            }
        }

        let mut navigator = MockNavigator::new();

        navigator.expect_navigate().never();

        let timeout = Duration::from_millis(20);
        let initiator = CheckoutInitiator::new(Arc::new(Stalled), Arc::new(navigator), timeout);

        let result = initiator.initiate(&request()?).await;

        assert!(matches!(result, Err(CheckoutError::Timeout(limit)) if limit == timeout));

        Ok(())
    }

    #[tokio::test]
    async fn refused_navigation_is_a_redirect_error() -> TestResult {
        let mut provider = MockPaymentProvider::new();
        let mut navigator = MockNavigator::new();

        provider.expect_create_session().return_once(|_| Ok(session()));
        provider
            .expect_redirect_target()
            .return_once(|_| Ok(RedirectTarget::new("https://checkout.stripe.com/c/pay/cs_test_1")));
        navigator
            .expect_navigate()
            .with(always())
            .return_once(|_| Err(NavigationError::Rejected("popup blocked".to_string())));

        let initiator =
            CheckoutInitiator::new(Arc::new(provider), Arc::new(navigator), DEFAULT_TIMEOUT);

        let result = initiator.initiate(&request()?).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Redirect(RedirectError::Navigation(_)))
        ));

        Ok(())
    }

    #[test]
    fn failures_are_classified_for_the_banner() {
        let missing_key = CheckoutError::from(ConfigError::MissingPublishableKey);
        let unauthorised = CheckoutError::Session(SessionError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            body: "Invalid API Key provided".to_string(),
        });
        let timeout = CheckoutError::Timeout(Duration::from_secs(15));

        assert!(matches!(
            missing_key.failure(),
            CheckoutFailure::ProviderUnavailable { .. }
        ));
        assert!(matches!(
            unauthorised.failure(),
            CheckoutFailure::ProviderUnavailable { .. }
        ));
        assert!(matches!(timeout.failure(), CheckoutFailure::Retry { .. }));
    }
}
