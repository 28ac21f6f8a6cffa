//! The copy loop at the heart of the engine: walk a request's scatter
//! fragments in order, clip each against the end of the device, and copy to
//! or from the backing buffer.
//!
//! Clipping is per fragment, not per request: upstream layers may assemble
//! scatter lists without knowing the exact device boundary, so a transfer
//! that would overrun the device is truncated at the boundary and the
//! request still succeeds, reporting only the bytes actually moved. A
//! fragment starting at or past the end clips to zero and is a no-op.

use crate::buffer::SectorBuffer;
use crate::geometry::DeviceGeometry;
use crate::Result;

/// Largest transfer length for a fragment of `len` bytes at `position` that
/// stays inside `device_size`.
fn clipped_len(position: u64, len: usize, device_size: u64) -> usize {
    let remaining = device_size.saturating_sub(position);
    len.min(usize::try_from(remaining).unwrap_or(usize::MAX))
}

/// Fill `fragments` in order from the buffer, starting at `start_sector`.
///
/// Returns the bytes transferred so far alongside the outcome, so a fault
/// mid-request still reports the fragments that completed before it.
pub(crate) fn execute_read(
    buffer: &SectorBuffer,
    geometry: &DeviceGeometry,
    start_sector: u64,
    fragments: &mut [&mut [u8]],
) -> (u64, Result<()>) {
    let device_size = buffer.len();
    let mut position = match geometry.sector_offset(start_sector) {
        Ok(position) => position,
        Err(err) => return (0, Err(err)),
    };

    let mut bytes = 0u64;
    for fragment in fragments.iter_mut() {
        let len = clipped_len(position, fragment.len(), device_size);
        if len == 0 {
            // Fragment starts at or past the end of the device; skip it.
            continue;
        }
        // Clipping guarantees the access is in bounds; an error here is an
        // accounting bug in this loop, surfaced to the dispatcher rather
        // than panicking mid-request.
        if let Err(err) = buffer.read_at(position, &mut fragment[..len]) {
            debug_assert!(false, "clipped read escaped device bounds: {err}");
            return (bytes, Err(err));
        }
        position += len as u64;
        bytes += len as u64;
    }
    (bytes, Ok(()))
}

/// Copy `fragments` in order into the buffer, starting at `start_sector`.
pub(crate) fn execute_write(
    buffer: &mut SectorBuffer,
    geometry: &DeviceGeometry,
    start_sector: u64,
    fragments: &[&[u8]],
) -> (u64, Result<()>) {
    let device_size = buffer.len();
    let mut position = match geometry.sector_offset(start_sector) {
        Ok(position) => position,
        Err(err) => return (0, Err(err)),
    };

    let mut bytes = 0u64;
    for fragment in fragments {
        let len = clipped_len(position, fragment.len(), device_size);
        if len == 0 {
            continue;
        }
        if let Err(err) = buffer.write_at(position, &fragment[..len]) {
            debug_assert!(false, "clipped write escaped device bounds: {err}");
            return (bytes, Err(err));
        }
        position += len as u64;
        bytes += len as u64;
    }
    (bytes, Ok(()))
}
