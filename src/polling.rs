//! Receipt processing status polling
//!
//! A scanned receipt is processed asynchronously by an external service. The
//! poller asks a [`StatusSource`] for the receipt's status at a fixed interval
//! until it reaches a terminal state, tolerating a bounded run of transport
//! failures and giving up after a bounded number of requests.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::error::{PantryError, PantryResult};
use crate::models::ReceiptId;

/// Processing state of an uploaded receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ReceiptStatus {
    /// No further transition will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Something that can report a receipt's current status
pub trait StatusSource {
    /// Fetch the current status; an `Err` is a transport failure
    fn fetch(&mut self, id: ReceiptId) -> PantryResult<ReceiptStatus>;
}

/// Final state reached by a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub status: ReceiptStatus,
    /// Number of requests made, including failed ones
    pub attempts: u32,
}

/// Fixed-interval status poller
pub struct Poller {
    interval: Duration,
    max_attempts: u32,
    max_transport_errors: u32,
    sleeper: Box<dyn FnMut(Duration)>,
}

impl Poller {
    /// Poller sleeping on the current thread between requests
    pub fn new(interval: Duration, max_attempts: u32, max_transport_errors: u32) -> Self {
        Self {
            interval,
            max_attempts,
            max_transport_errors,
            sleeper: Box::new(std::thread::sleep),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Duration::from_millis(settings.poll_interval_ms),
            settings.poll_max_attempts,
            settings.poll_max_transport_errors,
        )
    }

    /// Replace the sleep function (tests, async adapters)
    pub fn with_sleeper<F>(mut self, sleeper: F) -> Self
    where
        F: FnMut(Duration) + 'static,
    {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Poll until the receipt reaches a terminal status
    ///
    /// A successful fetch resets the transport error run. Once more than
    /// `max_transport_errors` consecutive fetches fail, the last error is
    /// returned. Running out of attempts yields `PantryError::Polling`.
    pub fn poll<S>(&mut self, source: &mut S, id: ReceiptId) -> PantryResult<PollOutcome>
    where
        S: StatusSource + ?Sized,
    {
        let mut consecutive_errors = 0;
        let mut last_status = None;

        for attempt in 1..=self.max_attempts {
            match source.fetch(id) {
                Ok(status) => {
                    consecutive_errors = 0;
                    tracing::debug!(receipt = %id, attempt, %status, "receipt status");
                    if status.is_terminal() {
                        return Ok(PollOutcome {
                            status,
                            attempts: attempt,
                        });
                    }
                    last_status = Some(status);
                }
                Err(err) => {
                    consecutive_errors += 1;
                    tracing::warn!(receipt = %id, attempt, error = %err, "receipt status request failed");
                    if consecutive_errors > self.max_transport_errors {
                        return Err(err);
                    }
                }
            }

            if attempt < self.max_attempts {
                (self.sleeper)(self.interval);
            }
        }

        Err(PantryError::Polling(format!(
            "Receipt {} not processed after {} attempts (last status: {})",
            id,
            self.max_attempts,
            last_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".into())
        )))
    }
}
