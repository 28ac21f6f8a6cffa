use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlockError>;

/// Unified error type for ramblock device operations.
///
/// API-level failures are reported through this enum; per-request transfer
/// failures are reported through [`crate::RequestStatus`] in the completion
/// instead, so a submitter always gets exactly one completion per accepted
/// request.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The backing buffer could not be obtained at device creation. The
    /// device is not usable and no partial state is left alive.
    #[error("failed to allocate backing storage")]
    AllocationFailed,

    #[error("invalid device geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("integer overflow while computing byte offsets")]
    OffsetOverflow,

    /// A raw buffer access outside `[0, capacity)`. The executor clips every
    /// fragment before copying, so this escaping to a caller indicates an
    /// accounting bug in the clipping loop, not a recoverable condition.
    #[error("out of bounds: offset={offset} len={len} capacity={capacity}")]
    OutOfBounds {
        offset: u64,
        len: usize,
        capacity: u64,
    },

    /// Operation attempted on a device after teardown.
    #[error("device already destroyed")]
    AlreadyDestroyed,
}
