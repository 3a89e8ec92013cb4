mod error;
mod policy;
mod window;

pub use error::BookingError;
pub use policy::can_book;
pub use window::validate_window;

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use ulid::Ulid;

use crate::model::*;
use crate::notify::Notifier;
use crate::observability;

// ── Collaborator seams ───────────────────────────────────────────

/// Read-only view of the configured workspace. The engine never mutates
/// space data.
pub trait SpaceDirectory: Send + Sync {
    fn lookup(&self, space_id: &str) -> Option<Space>;
}

/// Durable storage for the booking collection. Always the full
/// collection — never a delta. The store has no write authority of its
/// own; it persists exactly what the engine hands it.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn load(&self) -> io::Result<Vec<Booking>>;
    async fn save(&self, bookings: &[Booking]) -> io::Result<()>;
}

/// Supplies the creation instant for every time-window decision, so the
/// validator stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Ms;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Ms {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_millis() as Ms
    }
}

// ── Orchestrator ─────────────────────────────────────────────────

/// Owns booking collection mutation. Every operation is one
/// read-full-collection → compute → write-full-collection cycle; there
/// is no internal serialization across callers, so multi-writer
/// deployments need an external serialization point around this engine.
pub struct BookingEngine {
    spaces: Arc<dyn SpaceDirectory>,
    store: Arc<dyn BookingStore>,
    notify: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl BookingEngine {
    pub fn new(
        spaces: Arc<dyn SpaceDirectory>,
        store: Arc<dyn BookingStore>,
        notify: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            spaces,
            store,
            notify,
            clock,
        }
    }

    /// Admit and persist a candidate booking.
    ///
    /// Rejections are returned before any state is touched: zero writes
    /// and zero events on every failure path. On success there is exactly
    /// one save and one `BookingCreated` event.
    pub async fn create_booking(&self, candidate: BookingCandidate) -> Result<Booking, BookingError> {
        let space_id = candidate
            .space_id
            .ok_or_else(|| rejected(BookingError::SpaceNotSelected))?;
        let space = self
            .spaces
            .lookup(&space_id)
            .ok_or_else(|| rejected(BookingError::SpaceNotSelected))?;

        // Window first: cheaper than the occupancy scan, and its verdict
        // is final regardless of occupancy.
        let created_at = self.clock.now_ms();
        validate_window(created_at, candidate.start, candidate.end).map_err(rejected)?;
        let span = Span::new(candidate.start, candidate.end);

        let bookings = self.store.load().await.map_err(store_err)?;
        if !can_book(&space_id, &span, &bookings, space.capacity) {
            return Err(rejected(BookingError::SpaceOccupied));
        }

        let booking = Booking {
            id: Ulid::new(),
            space_id: space_id.clone(),
            user_id: candidate.user_id,
            span,
            status: BookingStatus::Active,
        };

        // Newest-first ordering is a presentation convenience only.
        let mut updated = Vec::with_capacity(bookings.len() + 1);
        updated.push(booking.clone());
        updated.extend(bookings);
        self.store.save(&updated).await.map_err(store_err)?;

        metrics::counter!(observability::BOOKINGS_CREATED_TOTAL).increment(1);
        tracing::debug!(
            booking = %booking.id,
            space = %space_id,
            duration_ms = span.duration_ms(),
            "booking created"
        );
        self.notify.notify(&Event::BookingCreated {
            id: booking.id,
            space_id,
            duration_ms: span.duration_ms(),
        });
        Ok(booking)
    }

    /// Soft-cancel: the record stays in the collection for audit but is
    /// permanently excluded from conflict counting. Cancellation is
    /// terminal — a second cancel of the same id is rejected, not a
    /// silent no-op, so double-cancel attempts surface to the caller.
    pub async fn cancel_booking(&self, booking_id: Ulid) -> Result<(), BookingError> {
        let mut bookings = self.store.load().await.map_err(store_err)?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        if !booking.is_active() {
            return Err(BookingError::NotCancellable(booking_id));
        }
        booking.status = BookingStatus::Cancelled;
        let space_id = booking.space_id.clone();

        self.store.save(&bookings).await.map_err(store_err)?;

        metrics::counter!(observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
        tracing::debug!(booking = %booking_id, space = %space_id, "booking cancelled");
        self.notify.notify(&Event::BookingCancelled {
            id: booking_id,
            space_id,
        });
        Ok(())
    }

    /// Occupancy as the presentation layer sees it: the negation of the
    /// admission check for the given window. Unknown spaces assume the
    /// default exclusive capacity.
    pub async fn is_space_occupied(
        &self,
        space_id: &str,
        window: &Span,
    ) -> Result<bool, BookingError> {
        let capacity = self
            .spaces
            .lookup(space_id)
            .map(|s| s.capacity)
            .unwrap_or(1);
        let bookings = self.store.load().await.map_err(store_err)?;
        Ok(!can_book(space_id, window, &bookings, capacity))
    }
}

fn store_err(e: io::Error) -> BookingError {
    BookingError::Store(e.to_string())
}

/// Count a creation rejection before handing it back.
fn rejected(reason: BookingError) -> BookingError {
    metrics::counter!(
        observability::BOOKINGS_REJECTED_TOTAL,
        "reason" => observability::reason_label(&reason)
    )
    .increment(1);
    reason
}
