use crate::model::Ms;

/// Single bound for the whole creation-time policy: how far ahead a
/// booking may start, how long it may run, and how far ahead it may end.
/// One constant on purpose — six independent literals would drift.
pub const BOOKING_WINDOW_MS: Ms = 8 * 60 * 60 * 1000;

/// Sane timestamp range. Anything outside is treated as a malformed
/// instant rather than a legitimate far-past/far-future request.
pub const MIN_VALID_TIMESTAMP_MS: Ms = 0;
/// 2100-01-01T00:00:00Z.
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;
