use ulid::Ulid;

/// Typed rejection reasons. All are recoverable: the caller adjusts the
/// request and retries; engine state is untouched on every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    // Time-window violations
    InvalidInstant,
    StartBeforeCreation,
    StartTooFarAhead,
    EndBeforeStart,
    DurationTooLong,
    EndTooFarAhead,
    // Admission violations
    SpaceNotSelected,
    SpaceOccupied,
    // Cancellation violations
    BookingNotFound(Ulid),
    NotCancellable(Ulid),
    // Persistence collaborator failure
    Store(String),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::InvalidInstant => write!(f, "instant outside valid timestamp range"),
            BookingError::StartBeforeCreation => {
                write!(f, "booking cannot start before it is requested")
            }
            BookingError::StartTooFarAhead => {
                write!(f, "booking starts beyond the scheduling window")
            }
            BookingError::EndBeforeStart => write!(f, "booking ends before it starts"),
            BookingError::DurationTooLong => {
                write!(f, "booking duration exceeds the scheduling window")
            }
            BookingError::EndTooFarAhead => {
                write!(f, "booking ends beyond the scheduling window")
            }
            BookingError::SpaceNotSelected => write!(f, "no known space selected"),
            BookingError::SpaceOccupied => write!(f, "space occupied: capacity reached"),
            BookingError::BookingNotFound(id) => write!(f, "booking not found: {id}"),
            BookingError::NotCancellable(id) => {
                write!(f, "booking not cancellable (not active): {id}")
            }
            BookingError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for BookingError {}
