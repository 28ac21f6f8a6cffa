//! Fixed-capacity in-memory block storage engine.
//!
//! `ramblock` emulates a sector-addressed block device entirely in memory: a
//! device is `sector_count * sector_size` bytes of owned storage, accessed
//! through scatter-list requests that copy to or from caller-supplied
//! fragments. Transfers that would run past the end of the device are
//! clipped at the boundary rather than rejected, matching conventional
//! block-device semantics of "never touch past device end, report what
//! actually moved". This crate provides:
//!
//! - [`BlockDevice`]: device descriptor owning the backing buffer behind a
//!   coarse whole-device lock
//! - [`Dispatcher`]: request submission boundary reporting exactly one
//!   [`Completion`] per accepted request
//! - [`DeviceGeometry`]: validated `sector_count` x `sector_size` sizing
//! - [`SectorBuffer`]: the bounds-checked backing byte region
//!
//! Queueing policy, request retries, timeouts, and device-node plumbing are
//! host concerns and live outside this crate.

mod buffer;
mod device;
mod dispatcher;
mod error;
mod executor;
mod geometry;
mod request;
mod util;

pub use buffer::SectorBuffer;
pub use device::BlockDevice;
pub use dispatcher::Dispatcher;
pub use error::{BlockError, Result};
pub use geometry::{DeviceGeometry, SECTOR_SIZE};
pub use request::{Completion, Direction, RequestStatus, MAX_REQUEST_FRAGMENTS};

#[cfg(test)]
mod proptests;
