use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Space and asset ids are authored in workspace configuration, not by us.
pub type SpaceId = String;
pub type AssetId = String;
pub type UserId = String;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    /// Half-open overlap: boundary equality is adjacency, not overlap,
    /// so back-to-back bookings are always permitted.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }
}

/// What kind of location a space is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    Desk,
    Room,
    CommonArea,
}

/// A bookable location. Authored by workspace configuration; the booking
/// core only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    pub kind: SpaceType,
    pub area_id: String,
    /// Max concurrent active bookings (default 1 — exclusive).
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

fn default_capacity() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

/// A reservation of a space for a half-open time interval.
///
/// Status only ever moves `Active → Cancelled`; cancelled bookings are
/// kept for audit and excluded from conflict counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub span: Span,
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }
}

/// A proposed booking, not yet validated and never persisted.
///
/// Start/end are raw instants rather than a [`Span`] because the
/// candidate may be malformed (end before start) — the time-window
/// validator owns that judgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCandidate {
    pub space_id: Option<SpaceId>,
    pub user_id: UserId,
    pub start: Ms,
    pub end: Ms,
}

// ── Inventory (single-slot loans) ────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Available,
    Loaned,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub category: String,
    pub status: AssetStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Returned,
}

/// A loan has no scheduled window — only a start instant, and an end
/// instant once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Ulid,
    pub asset_id: AssetId,
    pub user_id: UserId,
    pub started_at: Ms,
    pub ended_at: Option<Ms>,
    pub status: LoanStatus,
}

/// Outbound events — emitted only after a successful mutation, never for
/// a rejected attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    BookingCreated {
        id: Ulid,
        space_id: SpaceId,
        duration_ms: Ms,
    },
    BookingCancelled {
        id: Ulid,
        space_id: SpaceId,
    },
    LoanCreated {
        id: Ulid,
        asset_id: AssetId,
    },
    LoanReturned {
        id: Ulid,
        asset_id: AssetId,
    },
}

impl Event {
    /// Notification topic: the space or asset the event is about.
    pub fn topic(&self) -> &str {
        match self {
            Event::BookingCreated { space_id, .. } | Event::BookingCancelled { space_id, .. } => {
                space_id
            }
            Event::LoanCreated { asset_id, .. } | Event::LoanReturned { asset_id, .. } => asset_id,
        }
    }
}
