use crate::model::{Booking, Span};

/// Capacity-aware admission check: would a booking of `candidate` on
/// `space_id` fit alongside the already-active bookings?
///
/// Cancelled bookings never count. A capacity below 1 is treated as 1 so
/// a misconfigured space is merely exclusive, not permanently unbookable.
/// Pure predicate — the caller supplies the already-loaded collection.
pub fn can_book(space_id: &str, candidate: &Span, bookings: &[Booking], capacity: u32) -> bool {
    let limit = capacity.max(1);
    let overlapping = bookings
        .iter()
        .filter(|b| b.is_active())
        .filter(|b| b.space_id == space_id)
        .filter(|b| b.span.overlaps(candidate))
        .count();
    // Strict: count == capacity means every slot is taken.
    (overlapping as u32) < limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingStatus, Ms};
    use ulid::Ulid;

    const M: Ms = 60_000;

    fn booking(space_id: &str, start: Ms, end: Ms, status: BookingStatus) -> Booking {
        Booking {
            id: Ulid::new(),
            space_id: space_id.into(),
            user_id: "u1".into(),
            span: Span::new(start, end),
            status,
        }
    }

    #[test]
    fn empty_space_trivially_admits() {
        assert!(can_book("room-1", &Span::new(0, 60 * M), &[], 1));
    }

    #[test]
    fn overlap_at_capacity_one_rejects() {
        let existing = vec![booking("room-1", 0, 60 * M, BookingStatus::Active)];
        assert!(!can_book("room-1", &Span::new(30 * M, 90 * M), &existing, 1));
    }

    #[test]
    fn back_to_back_admits() {
        let existing = vec![booking("room-1", 0, 60 * M, BookingStatus::Active)];
        assert!(can_book("room-1", &Span::new(60 * M, 120 * M), &existing, 1));
    }

    #[test]
    fn capacity_two_admits_one_overlap() {
        let existing = vec![booking("desk-2", 0, 60 * M, BookingStatus::Active)];
        assert!(can_book("desk-2", &Span::new(15 * M, 45 * M), &existing, 2));
    }

    #[test]
    fn count_equal_to_capacity_rejects() {
        let existing = vec![
            booking("desk-2", 0, 60 * M, BookingStatus::Active),
            booking("desk-2", 10 * M, 50 * M, BookingStatus::Active),
        ];
        assert!(!can_book("desk-2", &Span::new(15 * M, 45 * M), &existing, 2));
    }

    #[test]
    fn cancelled_bookings_never_count() {
        let existing = vec![booking("room-1", 0, 60 * M, BookingStatus::Cancelled)];
        assert!(can_book("room-1", &Span::new(0, 60 * M), &existing, 1));
    }

    #[test]
    fn other_spaces_never_count() {
        let existing = vec![booking("room-2", 0, 60 * M, BookingStatus::Active)];
        assert!(can_book("room-1", &Span::new(0, 60 * M), &existing, 1));
    }

    #[test]
    fn zero_capacity_behaves_as_one() {
        assert!(can_book("room-1", &Span::new(0, 60 * M), &[], 0));
        let existing = vec![booking("room-1", 0, 60 * M, BookingStatus::Active)];
        assert!(!can_book("room-1", &Span::new(0, 60 * M), &existing, 0));
    }

    #[test]
    fn capacity_monotonicity() {
        let existing = vec![
            booking("room-1", 0, 60 * M, BookingStatus::Active),
            booking("room-1", 20 * M, 80 * M, BookingStatus::Active),
        ];
        let candidate = Span::new(30 * M, 50 * M);
        for cap in 1..6u32 {
            if can_book("room-1", &candidate, &existing, cap) {
                for higher in cap..6u32 {
                    assert!(can_book("room-1", &candidate, &existing, higher));
                }
            }
        }
    }
}
