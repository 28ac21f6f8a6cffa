/// Transfer direction of a request. `Read` fills caller fragments from the
/// device; `Write` copies caller fragments into the device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Read,
    Write,
}

/// Per-request completion status reported back to the submitter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RequestStatus {
    Ok,
    IoErr,
}

impl RequestStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, RequestStatus::Ok)
    }
}

/// Completion record for one request. Every accepted request produces
/// exactly one of these, on the error path too.
///
/// `bytes_transferred` counts only bytes actually moved: clipped fragments
/// contribute their in-bounds prefix, and on `IoErr` the count covers the
/// fragments fully processed before the fault.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Completion {
    pub bytes_transferred: u64,
    pub status: RequestStatus,
}

/// Cap on the scatter-list length of a single request.
///
/// Guards against unbounded per-request work from pathological submitters;
/// a request with more fragments is completed immediately with
/// [`RequestStatus::IoErr`] without touching the device.
pub const MAX_REQUEST_FRAGMENTS: usize = 128;
