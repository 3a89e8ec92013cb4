use std::net::SocketAddr;

use crate::engine::BookingError;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: bookings successfully created.
pub const BOOKINGS_CREATED_TOTAL: &str = "reserva_bookings_created_total";

/// Counter: bookings cancelled.
pub const BOOKINGS_CANCELLED_TOTAL: &str = "reserva_bookings_cancelled_total";

/// Counter: booking attempts rejected. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "reserva_bookings_rejected_total";

/// Counter: loans created.
pub const LOANS_CREATED_TOTAL: &str = "reserva_loans_created_total";

/// Counter: loans returned.
pub const LOANS_RETURNED_TOTAL: &str = "reserva_loans_returned_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection reason to a short label for metrics.
pub fn reason_label(err: &BookingError) -> &'static str {
    match err {
        BookingError::InvalidInstant => "invalid_instant",
        BookingError::StartBeforeCreation => "start_before_creation",
        BookingError::StartTooFarAhead => "start_too_far_ahead",
        BookingError::EndBeforeStart => "end_before_start",
        BookingError::DurationTooLong => "duration_too_long",
        BookingError::EndTooFarAhead => "end_too_far_ahead",
        BookingError::SpaceNotSelected => "space_not_selected",
        BookingError::SpaceOccupied => "space_occupied",
        BookingError::BookingNotFound(_) => "booking_not_found",
        BookingError::NotCancellable(_) => "not_cancellable",
        BookingError::Store(_) => "store",
    }
}
