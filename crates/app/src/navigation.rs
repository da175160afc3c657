//! Navigation to the hosted checkout page.

use std::sync::{Mutex, PoisonError};

use mockall::automock;
use thiserror::Error;

use crate::payments::RedirectTarget;

/// The shopper could not be moved to the target.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// Moves the shopper to another page.
#[automock]
pub trait Navigator: Send + Sync {
    /// Navigate to `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the front end refuses the navigation.
    fn navigate(&self, target: &RedirectTarget) -> Result<(), NavigationError>;
}

/// Navigator for front ends that hand the URL to the shopper themselves, such as a terminal.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<RedirectTarget>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent navigation target.
    #[must_use]
    pub fn last(&self) -> Option<RedirectTarget> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &RedirectTarget) -> Result<(), NavigationError> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(target.clone());

        Ok(())
    }
}
