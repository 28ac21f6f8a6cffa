use std::sync::{Arc, Mutex, MutexGuard};

use crate::buffer::SectorBuffer;
use crate::geometry::DeviceGeometry;
use crate::{BlockError, Result};

/// Descriptor for one emulated device: immutable geometry plus the backing
/// buffer behind the whole-device lock.
///
/// The mutex is coarse by design: every request holds it for the full
/// duration of its copy loop, serializing all buffer access across
/// concurrent submitters. `None` in the slot means the device has been torn
/// down; every path re-checks under the lock, so no operation can reach
/// freed storage.
pub struct BlockDevice {
    geometry: DeviceGeometry,
    state: Mutex<Option<SectorBuffer>>,
}

impl BlockDevice {
    /// Allocate the backing buffer and return a shared handle to the new
    /// device. Devices are independent; create as many as needed.
    ///
    /// Fails with [`BlockError::AllocationFailed`] if the buffer cannot be
    /// obtained, leaving no partial state alive.
    pub fn create(geometry: DeviceGeometry) -> Result<Arc<Self>> {
        let buffer = SectorBuffer::with_len(geometry.size_bytes())?;
        tracing::debug!(
            sector_count = geometry.sector_count(),
            sector_size = geometry.sector_size(),
            "block device created"
        );
        Ok(Arc::new(Self {
            geometry,
            state: Mutex::new(Some(buffer)),
        }))
    }

    pub fn geometry(&self) -> DeviceGeometry {
        self.geometry
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.geometry.size_bytes()
    }

    pub fn capacity_sectors(&self) -> u64 {
        self.geometry.sector_count()
    }

    /// Tear the device down, releasing the backing buffer.
    ///
    /// Teardown takes the device lock, so an in-flight request always runs
    /// to completion first. Submissions arriving afterwards fail with
    /// [`BlockError::AlreadyDestroyed`], as does a second `destroy`.
    pub fn destroy(&self) -> Result<()> {
        let mut slot = self.lock_state();
        if slot.take().is_none() {
            return Err(BlockError::AlreadyDestroyed);
        }
        tracing::debug!("block device destroyed");
        Ok(())
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock_state().is_none()
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, Option<SectorBuffer>> {
        match self.state.lock() {
            Ok(guard) => guard,
            // A poisoning panic cannot leave the buffer structurally
            // invalid; it is plain bytes.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for BlockDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockDevice")
            .field("geometry", &self.geometry)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
