//! Constants for the download module (timeouts, queue sizing).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Capacity of the queue between the feeder and the workers.
///
/// Tokio channels cannot be zero-sized, so one slot is the closest to a
/// direct hand-off.
pub(crate) const QUEUE_CAPACITY: usize = 1;
