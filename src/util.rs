use crate::{BlockError, Result};

/// Validate that `[offset, offset + len)` lies within `capacity` bytes.
pub(crate) fn checked_range(offset: u64, len: usize, capacity: u64) -> Result<()> {
    let end = offset
        .checked_add(len as u64)
        .ok_or(BlockError::OffsetOverflow)?;
    if end > capacity {
        return Err(BlockError::OutOfBounds {
            offset,
            len,
            capacity,
        });
    }
    Ok(())
}
