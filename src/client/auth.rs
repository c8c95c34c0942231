use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::info;

/// Authorization state of the messaging client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// The client is waiting for its startup parameters
    WaitingParameters,
    WaitingPhoneNumber,
    WaitingCode,
    /// Two-step verification password required
    WaitingPassword,
    Ready,
    Closed,
    #[default]
    Unknown,
}

impl AuthState {
    /// Whether listeners are told about entering this state.
    ///
    /// Parameter negotiation is internal to the client and stays silent.
    pub fn is_notified(self) -> bool {
        !matches!(self, AuthState::WaitingParameters | AuthState::Unknown)
    }
}

/// Callback invoked on authorization state changes.
pub type AuthListener = Arc<dyn Fn(AuthState) + Send + Sync>;

/// Tracks the authorization state and notifies observers of transitions.
pub struct AuthTracker {
    state: watch::Sender<AuthState>,
    listener: Mutex<Option<AuthListener>>,
}

impl AuthTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            state,
            listener: Mutex::new(None),
        }
    }

    pub fn current(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.current() == AuthState::Ready
    }

    pub fn set_listener(&self, listener: AuthListener) {
        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    /// Moves to `next` and notifies the listener and subscribers.
    pub fn transition(&self, next: AuthState) {
        let previous = self.state.send_replace(next);
        if previous == next {
            return;
        }
        info!("Authorization state: {:?} -> {:?}", previous, next);

        if next.is_notified() {
            let listener = self
                .listener
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(listener) = listener {
                listener(next);
            }
        }
    }

    /// Receiver that observes every future transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Waits until the state equals `target`.
    ///
    /// Returns immediately when already there. Returns `false` if the tracker
    /// is dropped first.
    pub async fn wait_for(&self, target: AuthState) -> bool {
        let mut receiver = self.subscribe();
        receiver.wait_for(|state| *state == target).await.is_ok()
    }
}

impl Default for AuthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTracker")
            .field("state", &self.current())
            .finish()
    }
}
