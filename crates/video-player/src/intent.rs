//! Pending-intent tracking for flags with confirmation latency.
//!
//! When the user toggles play or fullscreen we queue a command for the
//! playback runtime and wait for the matching native event.  During that
//! window the flag is "pending": display code shows the intended value for
//! play/pause, while fullscreen keeps showing the confirmed value because
//! the platform may deny the request outright.
//!
//! # States
//! ```text
//!  Confirmed(T)     — runtime confirmed; nothing outstanding
//!  Pending { ... }  — command queued, no confirmation yet
//!  TimedOut { ... } — waited too long (e.g. fullscreen denied)
//! ```

use std::time::{Duration, Instant};

/// Timeout before a pending intent becomes `TimedOut`.
pub const INTENT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Three-state wrapper for a value that may be waiting for confirmation.
#[derive(Debug, Clone)]
pub enum IntentState<T: Clone + PartialEq> {
    /// Runtime has confirmed this value.
    Confirmed(T),
    /// Command queued; waiting for the runtime to echo back `intended`.
    Pending {
        intended: T,
        confirmed: T,
        since: Instant,
    },
    /// Runtime didn't confirm within `INTENT_TIMEOUT`.
    TimedOut { intended: T, confirmed: T },
}

impl<T: Clone + PartialEq> IntentState<T> {
    pub fn new(value: T) -> Self {
        Self::Confirmed(value)
    }

    /// The value the user intended (what an optimistic display shows).
    pub fn intended(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { intended, .. } => intended,
            Self::TimedOut { intended, .. } => intended,
        }
    }

    /// The last value the runtime confirmed.
    pub fn confirmed(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { confirmed, .. } => confirmed,
            Self::TimedOut { confirmed, .. } => confirmed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Register a user intent (command was queued).
    /// Transitions to `Pending` unless `intended == current confirmed`.
    pub fn set_intent(&mut self, intended: T, now: Instant) {
        let confirmed = self.confirmed().clone();
        if intended == confirmed {
            *self = Self::Confirmed(intended);
        } else {
            *self = Self::Pending {
                intended,
                confirmed,
                since: now,
            };
        }
    }

    /// Called periodically.  Returns `true` if a pending intent just timed out.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Self::Pending {
            intended,
            confirmed,
            since,
        } = self
        {
            if now.duration_since(*since) >= INTENT_TIMEOUT {
                *self = Self::TimedOut {
                    intended: intended.clone(),
                    confirmed: confirmed.clone(),
                };
                return true;
            }
        }
        false
    }

    /// Drop a timed-out intent and fall back to the confirmed value.  Used
    /// when the platform silently denies a request (fullscreen): the flag
    /// simply never changes.
    pub fn absorb_timeout(&mut self) {
        if let Self::TimedOut { confirmed, .. } = self {
            *self = Self::Confirmed(confirmed.clone());
        }
    }

    /// Called when the runtime reports a new confirmed value.
    /// Returns `true` if the observable state changed.
    pub fn on_confirmed(&mut self, value: T) -> bool {
        match self {
            Self::Pending { intended, .. } => {
                if value == *intended {
                    *self = Self::Confirmed(value);
                    return true;
                }
                // A different value arrived — record it but keep waiting.
                if let Self::Pending { confirmed, .. } = self {
                    *confirmed = value;
                }
                false
            }
            Self::TimedOut { intended, .. } => {
                // Late confirmation: accept whatever the runtime says.
                let matched = value == *intended;
                *self = Self::Confirmed(value);
                matched
            }
            Self::Confirmed(v) => {
                if *v != value {
                    *self = Self::Confirmed(value);
                    true
                } else {
                    false
                }
            }
        }
    }
}
