//! Admission control for concurrent transfers.
//!
//! [`AdmissionLimiter`] is a counting gate of fixed capacity backed by a
//! Tokio semaphore. A slot is held for as long as the returned
//! [`AdmissionPermit`] lives, so every exit path of a worker releases it.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use super::constants::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use super::engine::EngineError;

/// Bounds how many transfers may run at once.
///
/// Cloning shares the same slots.
#[derive(Debug, Clone)]
pub struct AdmissionLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One admitted slot. Dropping it releases the slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionLimiter {
    /// Creates a limiter admitting at most `capacity` holders.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if `capacity` is outside
    /// the valid range (1-100).
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&capacity) {
            return Err(EngineError::InvalidConcurrency { value: capacity });
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Waits for a free slot and takes it.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] if the underlying semaphore was closed.
    pub async fn acquire(&self) -> Result<AdmissionPermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        trace!(available = self.available(), "admission slot acquired");
        Ok(AdmissionPermit { _permit: permit })
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.capacity.saturating_sub(self.available())
    }
}
