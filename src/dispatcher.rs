//! Boundary between the host's queueing subsystem and the executor.
//!
//! One `Dispatcher` per submission context (hardware queue, worker thread);
//! clones are cheap and share the same device. The contract toward the
//! host: every accepted request produces exactly one [`Completion`], on the
//! error path too. A request arriving after teardown is rejected up front
//! with [`BlockError::AlreadyDestroyed`] and owes no completion, because it
//! was never accepted.
//!
//! No retries, no reordering, no internal threads. Requests from one
//! context complete in submission order; across contexts the only guarantee
//! is the mutual exclusion provided by the device lock.

use std::sync::Arc;

use crate::device::BlockDevice;
use crate::executor;
use crate::request::{Completion, Direction, RequestStatus, MAX_REQUEST_FRAGMENTS};
use crate::{BlockError, Result};

#[derive(Clone, Debug)]
pub struct Dispatcher {
    device: Arc<BlockDevice>,
}

impl Dispatcher {
    pub fn new(device: Arc<BlockDevice>) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Arc<BlockDevice> {
        &self.device
    }

    /// Submit a read request: fill `fragments` in order from the device,
    /// starting at `start_sector`.
    pub fn read(&self, start_sector: u64, fragments: &mut [&mut [u8]]) -> Result<Completion> {
        if let Some(completion) = self.reject_oversized(Direction::Read, fragments.len()) {
            return Ok(completion);
        }

        let slot = self.device.lock_state();
        let buffer = slot.as_ref().ok_or(BlockError::AlreadyDestroyed)?;
        let geometry = self.device.geometry();
        let outcome = executor::execute_read(buffer, &geometry, start_sector, fragments);
        Ok(complete(Direction::Read, start_sector, outcome))
    }

    /// Submit a write request: copy `fragments` in order into the device,
    /// starting at `start_sector`.
    pub fn write(&self, start_sector: u64, fragments: &[&[u8]]) -> Result<Completion> {
        if let Some(completion) = self.reject_oversized(Direction::Write, fragments.len()) {
            return Ok(completion);
        }

        let mut slot = self.device.lock_state();
        let buffer = slot.as_mut().ok_or(BlockError::AlreadyDestroyed)?;
        let geometry = self.device.geometry();
        let outcome = executor::execute_write(buffer, &geometry, start_sector, fragments);
        Ok(complete(Direction::Write, start_sector, outcome))
    }

    /// Scatter-list cap, checked before touching device state. An oversized
    /// request is still acknowledged: it completes with `IoErr` and zero
    /// bytes transferred.
    fn reject_oversized(&self, direction: Direction, fragment_count: usize) -> Option<Completion> {
        if fragment_count > MAX_REQUEST_FRAGMENTS {
            tracing::debug!(?direction, fragment_count, "request exceeds fragment cap");
            return Some(Completion {
                bytes_transferred: 0,
                status: RequestStatus::IoErr,
            });
        }
        None
    }
}

fn complete(direction: Direction, start_sector: u64, outcome: (u64, Result<()>)) -> Completion {
    let (bytes_transferred, result) = outcome;
    match result {
        Ok(()) => {
            tracing::trace!(?direction, start_sector, bytes_transferred, "request completed");
            Completion {
                bytes_transferred,
                status: RequestStatus::Ok,
            }
        }
        Err(err) => {
            tracing::debug!(?direction, start_sector, bytes_transferred, %err, "request failed");
            Completion {
                bytes_transferred,
                status: RequestStatus::IoErr,
            }
        }
    }
}
