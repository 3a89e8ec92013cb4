use crate::limits::*;
use crate::model::Ms;

use super::BookingError;

/// Creation-time policy for a candidate interval, independent of
/// occupancy: a booking can be time-valid but space-occupied, and vice
/// versa. Fail-fast — the first violated bound wins, in this order.
pub fn validate_window(created_at: Ms, start: Ms, end: Ms) -> Result<(), BookingError> {
    if !valid_instant(start) || !valid_instant(end) {
        return Err(BookingError::InvalidInstant);
    }
    if start < created_at {
        return Err(BookingError::StartBeforeCreation);
    }
    if start > created_at + BOOKING_WINDOW_MS {
        return Err(BookingError::StartTooFarAhead);
    }
    if end < start {
        return Err(BookingError::EndBeforeStart);
    }
    if end > start + BOOKING_WINDOW_MS {
        return Err(BookingError::DurationTooLong);
    }
    // Not implied by the two checks above: a long booking starting near
    // the window edge would otherwise end up to double the window out.
    if end > created_at + BOOKING_WINDOW_MS {
        return Err(BookingError::EndTooFarAhead);
    }
    Ok(())
}

fn valid_instant(t: Ms) -> bool {
    (MIN_VALID_TIMESTAMP_MS..=MAX_VALID_TIMESTAMP_MS).contains(&t)
}
