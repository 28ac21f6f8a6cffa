use crate::util::checked_range;
use crate::{BlockError, Result};

/// Owned backing storage for one device: a fixed-size, zero-indexed byte
/// region. Allocated once at device creation, never resized, released at
/// teardown.
pub struct SectorBuffer {
    data: Vec<u8>,
}

impl SectorBuffer {
    /// Allocate a zero-filled buffer of exactly `len` bytes.
    ///
    /// Allocation is fallible: an unobtainable buffer surfaces as
    /// [`BlockError::AllocationFailed`] rather than an abort, and leaves
    /// nothing allocated.
    pub fn with_len(len: u64) -> Result<Self> {
        let len = usize::try_from(len).map_err(|_| BlockError::AllocationFailed)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BlockError::AllocationFailed)?;
        data.resize(len, 0);
        Ok(Self { data })
    }

    /// Total buffer size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy `buf.len()` bytes out of the buffer starting at `offset`.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        checked_range(offset, buf.len(), self.len())?;
        let offset = offset as usize;
        buf.copy_from_slice(&self.data[offset..offset + buf.len()]);
        Ok(())
    }

    /// Copy `buf` into the buffer starting at `offset`.
    pub fn write_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
        checked_range(offset, buf.len(), self.len())?;
        let offset = offset as usize;
        self.data[offset..offset + buf.len()].copy_from_slice(buf);
        Ok(())
    }
}
