//! Debounced Credential Validation
//!
//! Every credential change produces a new [`OperationToken`]. A scheduled validation
//! waits for the quiescence window, is skipped if a newer token exists by then, and
//! reports its result tagged with its token so the form can drop superseded results.
//! Backend calls that already started are never cancelled; only their effect is.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use zeroize::Zeroizing;

use crate::account::KeyType;
use crate::events::Event;
use crate::messaging::WalletApi;

/// Generation number of a validation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OperationToken(u64);

impl OperationToken {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// The token superseding this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validation to run once the quiescence window has elapsed
pub struct ValidationRequest {
    pub token: OperationToken,
    pub id: String,
    pub password: Zeroizing<String>,
    pub key_type: KeyType,
}

impl fmt::Debug for ValidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRequest")
            .field("token", &self.token)
            .field("id", &self.id)
            .field("key_type", &self.key_type)
            .finish_non_exhaustive()
    }
}

/// Runs credential validations against the wallet backend, rate limited by a
/// quiescence window
pub struct DebouncedValidator {
    api: Arc<dyn WalletApi>,
    event_sender: mpsc::UnboundedSender<Event>,
    window: Duration,
    latest: Arc<AtomicU64>,
    cancellation_token: CancellationToken,
}

impl DebouncedValidator {
    pub fn new(
        api: Arc<dyn WalletApi>,
        event_sender: mpsc::UnboundedSender<Event>,
        window: Duration,
    ) -> Self {
        Self {
            api,
            event_sender,
            window,
            latest: Arc::new(AtomicU64::new(0)),
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Most recent token seen
    pub fn latest(&self) -> OperationToken {
        OperationToken(self.latest.load(Ordering::SeqCst))
    }

    /// Record `token` as the current generation; pending timers of older tokens will not
    /// call the backend
    pub fn supersede(&self, token: OperationToken) {
        self.latest.fetch_max(token.0, Ordering::SeqCst);
    }

    /// Schedule a validation after the quiescence window
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, request: ValidationRequest) {
        self.supersede(request.token);

        let api = Arc::clone(&self.api);
        let sender = self.event_sender.clone();
        let latest = Arc::clone(&self.latest);
        let cancellation_token = self.cancellation_token.clone();
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancellation_token.cancelled() => return,
                _ = tokio::time::sleep(window) => {}
            }

            if latest.load(Ordering::SeqCst) != request.token.0 {
                tracing::trace!(token = %request.token, "Validation superseded while debouncing");
                return;
            }

            if sender
                .send(Event::ValidationStarted {
                    token: request.token,
                })
                .is_err()
            {
                return; // Channel closed, nobody is listening
            }

            tracing::debug!(token = %request.token, "Validating Cesium credentials");
            let result = api
                .validate_cesium_wallet(&request.id, &request.password, request.key_type)
                .await;

            let _ = sender.send(Event::CredentialsValidated {
                token: request.token,
                result,
            });
        });
    }
}

impl Drop for DebouncedValidator {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ordering() {
        let first = OperationToken::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.generation(), 1);
        assert_eq!(second.to_string(), "#1");
    }
}
