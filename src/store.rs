//! Persistence collaborators. Stores hold exactly what the engines hand
//! them — whole collections, no deltas — and have no write authority of
//! their own.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::engine::BookingStore;
use crate::loans::InventoryStore;
use crate::model::*;

// ── In-memory stores ─────────────────────────────────────────────

/// Booking store backed by a `RwLock<Vec<_>>`. For tests and
/// single-process embedders.
pub struct MemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl Default for MemoryBookingStore {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl MemoryBookingStore {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    pub async fn snapshot(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn load(&self) -> io::Result<Vec<Booking>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn save(&self, bookings: &[Booking]) -> io::Result<()> {
        *self.bookings.write().await = bookings.to_vec();
        Ok(())
    }
}

pub struct MemoryInventoryStore {
    assets: RwLock<Vec<Asset>>,
    loans: RwLock<Vec<Loan>>,
}

impl MemoryInventoryStore {
    pub fn new(assets: Vec<Asset>, loans: Vec<Loan>) -> Self {
        Self {
            assets: RwLock::new(assets),
            loans: RwLock::new(loans),
        }
    }

    pub async fn snapshot_assets(&self) -> Vec<Asset> {
        self.assets.read().await.clone()
    }

    pub async fn snapshot_loans(&self) -> Vec<Loan> {
        self.loans.read().await.clone()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn load_assets(&self) -> io::Result<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }

    async fn save_assets(&self, assets: &[Asset]) -> io::Result<()> {
        *self.assets.write().await = assets.to_vec();
        Ok(())
    }

    async fn load_loans(&self) -> io::Result<Vec<Loan>> {
        Ok(self.loans.read().await.clone())
    }

    async fn save_loans(&self, loans: &[Loan]) -> io::Result<()> {
        *self.loans.write().await = loans.to_vec();
        Ok(())
    }
}

// ── JSON file store ──────────────────────────────────────────────

/// On-disk record. `status` is optional here and nowhere else: legacy
/// collections predate the status field, and normalizing at the
/// persistence boundary keeps it required inside the core.
#[derive(Serialize, Deserialize)]
struct StoredBooking {
    id: Ulid,
    space_id: SpaceId,
    user_id: UserId,
    span: Span,
    #[serde(default)]
    status: Option<BookingStatus>,
}

/// Whole-collection JSON document on disk. Writes go through a temp file
/// and an atomic rename so a crash mid-save leaves the previous
/// collection intact.
pub struct JsonBookingStore {
    path: PathBuf,
}

impl JsonBookingStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl BookingStore for JsonBookingStore {
    async fn load(&self) -> io::Result<Vec<Booking>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };
        let stored: Vec<StoredBooking> = serde_json::from_slice(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(stored
            .into_iter()
            .map(|s| Booking {
                id: s.id,
                space_id: s.space_id,
                user_id: s.user_id,
                span: s.span,
                status: s.status.unwrap_or(BookingStatus::Active),
            })
            .collect())
    }

    async fn save(&self, bookings: &[Booking]) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(bookings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
