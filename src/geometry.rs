use crate::{BlockError, Result};

/// Default sector size of the emulated device, in bytes.
pub const SECTOR_SIZE: u32 = 512;

/// Immutable sizing of one device: `sector_count` sectors of `sector_size`
/// bytes each.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DeviceGeometry {
    sector_count: u64,
    sector_size: u32,
}

impl DeviceGeometry {
    pub fn new(sector_count: u64, sector_size: u32) -> Result<Self> {
        if sector_count == 0 {
            return Err(BlockError::InvalidGeometry("sector count must be non-zero"));
        }
        if sector_size == 0 {
            return Err(BlockError::InvalidGeometry("sector size must be non-zero"));
        }
        // The total byte size must be representable.
        sector_count
            .checked_mul(u64::from(sector_size))
            .ok_or(BlockError::OffsetOverflow)?;
        Ok(Self {
            sector_count,
            sector_size,
        })
    }

    /// Geometry with the default 512-byte sector.
    pub fn with_sector_count(sector_count: u64) -> Result<Self> {
        Self::new(sector_count, SECTOR_SIZE)
    }

    pub fn sector_count(&self) -> u64 {
        self.sector_count
    }

    pub fn sector_size(&self) -> u32 {
        self.sector_size
    }

    pub fn size_bytes(&self) -> u64 {
        // Checked in `new`.
        self.sector_count * u64::from(self.sector_size)
    }

    /// Byte offset of `sector`. The sector may lie at or past the end of the
    /// device; the executor clips such transfers to zero length rather than
    /// failing them. Only u64 overflow is an error.
    pub fn sector_offset(&self, sector: u64) -> Result<u64> {
        sector
            .checked_mul(u64::from(self.sector_size))
            .ok_or(BlockError::OffsetOverflow)
    }
}
