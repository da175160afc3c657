//! Publishable key handling.

use std::fmt;

use zeroize::Zeroize;

/// Payment-provider publishable key. Wiped from memory on drop and redacted in `Debug`.
#[derive(Clone)]
pub struct PublishableKey {
    value: String,
}

impl PublishableKey {
    /// Wrap a key, returning `None` when it is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return None;
        }

        Some(Self { value })
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PublishableKey(**redacted**)")?;
        Ok(())
    }
}

impl Drop for PublishableKey {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
