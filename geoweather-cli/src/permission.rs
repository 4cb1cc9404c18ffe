use async_trait::async_trait;
use geoweather_core::{Coordinate, LocationError, LocationProvider, Permission};
use inquire::Confirm;
use std::sync::Mutex;
use tracing::debug;

/// Foreground location gate in front of another provider.
///
/// Uses the remembered decision when there is one, otherwise asks on the
/// terminal. A fresh answer is kept in [`PromptingLocation::new_decision`] so
/// the caller can store it.
#[derive(Debug)]
pub struct PromptingLocation<L> {
    inner: L,
    remembered: Option<bool>,
    assume_yes: bool,
    answered: Mutex<Option<bool>>,
}

impl<L: LocationProvider> PromptingLocation<L> {
    pub fn new(inner: L, remembered: Option<bool>, assume_yes: bool) -> Self {
        Self { inner, remembered, assume_yes, answered: Mutex::new(None) }
    }

    /// Answer given interactively during this run, if any.
    pub fn new_decision(&self) -> Option<bool> {
        self.answered.lock().ok().and_then(|a| *a)
    }

    async fn ask() -> Result<bool, LocationError> {
        tokio::task::spawn_blocking(|| {
            Confirm::new("Sallitaanko sijainnin käyttö?")
                .with_default(true)
                .with_help_message("Sijaintia käytetään vain sään hakemiseen")
                .prompt()
        })
        .await
        .map_err(|e| LocationError::Unavailable(e.to_string()))?
        .map_err(|e| LocationError::Unavailable(format!("permission prompt failed: {e}")))
    }
}

#[async_trait]
impl<L: LocationProvider> LocationProvider for PromptingLocation<L> {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        let granted = match (self.remembered, self.assume_yes) {
            (_, true) => true,
            (Some(decision), false) => {
                debug!(decision, "Using remembered location permission");
                decision
            }
            (None, false) => {
                let answer = Self::ask().await?;
                if let Ok(mut slot) = self.answered.lock() {
                    *slot = Some(answer);
                }
                answer
            }
        };

        match Permission::from(granted) {
            Permission::Granted => self.inner.request_permission().await,
            Permission::Denied => Ok(Permission::Denied),
        }
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        self.inner.current_position().await
    }
}
