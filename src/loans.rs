//! Inventory loans: the single-slot analog of the booking engine.
//!
//! A loan has no scheduled window — an asset is either out or it isn't —
//! so there is no time-window policy here and capacity is always one.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use ulid::Ulid;

use crate::engine::Clock;
use crate::model::*;
use crate::notify::Notifier;
use crate::observability;

/// Durable storage for assets and their loan history. Like the booking
/// store, always whole collections.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn load_assets(&self) -> io::Result<Vec<Asset>>;
    async fn save_assets(&self, assets: &[Asset]) -> io::Result<()>;
    async fn load_loans(&self) -> io::Result<Vec<Loan>>;
    async fn save_loans(&self, loans: &[Loan]) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    AssetNotFound(AssetId),
    AssetUnavailable(AssetId),
    LoanNotFound(Ulid),
    NotReturnable(Ulid),
    Store(String),
}

impl std::fmt::Display for LoanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanError::AssetNotFound(id) => write!(f, "asset not found: {id}"),
            LoanError::AssetUnavailable(id) => write!(f, "asset unavailable: {id}"),
            LoanError::LoanNotFound(id) => write!(f, "loan not found: {id}"),
            LoanError::NotReturnable(id) => write!(f, "loan not returnable (not active): {id}"),
            LoanError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for LoanError {}

/// Find the active loan for an asset, if any. Returned loans never block.
pub fn active_loan<'a>(loans: &'a [Loan], asset_id: &str) -> Option<&'a Loan> {
    loans
        .iter()
        .find(|l| l.asset_id == asset_id && l.status == LoanStatus::Active)
}

pub struct LoanEngine {
    store: Arc<dyn InventoryStore>,
    notify: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl LoanEngine {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        notify: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notify,
            clock,
        }
    }

    /// Borrow an asset. Single-slot admission: the asset must be
    /// `Available` and carry no active loan.
    pub async fn create_loan(&self, asset_id: &str, user_id: &str) -> Result<Loan, LoanError> {
        let mut assets = self.store.load_assets().await.map_err(store_err)?;
        let asset = assets
            .iter_mut()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| LoanError::AssetNotFound(asset_id.to_string()))?;
        if asset.status != AssetStatus::Available {
            return Err(LoanError::AssetUnavailable(asset_id.to_string()));
        }

        let loans = self.store.load_loans().await.map_err(store_err)?;
        if active_loan(&loans, asset_id).is_some() {
            return Err(LoanError::AssetUnavailable(asset_id.to_string()));
        }

        let loan = Loan {
            id: Ulid::new(),
            asset_id: asset_id.to_string(),
            user_id: user_id.to_string(),
            started_at: self.clock.now_ms(),
            ended_at: None,
            status: LoanStatus::Active,
        };
        asset.status = AssetStatus::Loaned;

        let mut updated = Vec::with_capacity(loans.len() + 1);
        updated.push(loan.clone());
        updated.extend(loans);
        self.store.save_loans(&updated).await.map_err(store_err)?;
        self.store.save_assets(&assets).await.map_err(store_err)?;

        metrics::counter!(observability::LOANS_CREATED_TOTAL).increment(1);
        tracing::debug!(loan = %loan.id, asset = %asset_id, "loan created");
        self.notify.notify(&Event::LoanCreated {
            id: loan.id,
            asset_id: asset_id.to_string(),
        });
        Ok(loan)
    }

    /// Return a loaned asset. Returning is terminal; a second return of
    /// the same loan is rejected, mirroring booking cancellation.
    pub async fn return_loan(&self, loan_id: Ulid) -> Result<(), LoanError> {
        let mut loans = self.store.load_loans().await.map_err(store_err)?;
        let loan = loans
            .iter_mut()
            .find(|l| l.id == loan_id)
            .ok_or(LoanError::LoanNotFound(loan_id))?;
        if loan.status != LoanStatus::Active {
            return Err(LoanError::NotReturnable(loan_id));
        }
        loan.status = LoanStatus::Returned;
        loan.ended_at = Some(self.clock.now_ms());
        let asset_id = loan.asset_id.clone();

        let mut assets = self.store.load_assets().await.map_err(store_err)?;
        if let Some(asset) = assets.iter_mut().find(|a| a.id == asset_id) {
            asset.status = AssetStatus::Available;
        }

        self.store.save_loans(&loans).await.map_err(store_err)?;
        self.store.save_assets(&assets).await.map_err(store_err)?;

        metrics::counter!(observability::LOANS_RETURNED_TOTAL).increment(1);
        tracing::debug!(loan = %loan_id, asset = %asset_id, "loan returned");
        self.notify.notify(&Event::LoanReturned {
            id: loan_id,
            asset_id,
        });
        Ok(())
    }
}

fn store_err(e: io::Error) -> LoanError {
    LoanError::Store(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotifyHub;
    use crate::store::MemoryInventoryStore;

    struct FixedClock(Ms);

    impl Clock for FixedClock {
        fn now_ms(&self) -> Ms {
            self.0
        }
    }

    fn asset(id: &str, status: AssetStatus) -> Asset {
        Asset {
            id: id.into(),
            name: format!("Asset {id}"),
            category: "Monitor".into(),
            status,
            tags: vec![],
        }
    }

    fn engine_with(assets: Vec<Asset>) -> (LoanEngine, Arc<MemoryInventoryStore>) {
        let store = Arc::new(MemoryInventoryStore::new(assets, vec![]));
        let engine = LoanEngine::new(
            store.clone(),
            Arc::new(NotifyHub::new()),
            Arc::new(FixedClock(1_000)),
        );
        (engine, store)
    }

    #[tokio::test]
    async fn borrow_and_return_roundtrip() {
        let (engine, store) = engine_with(vec![asset("as-1", AssetStatus::Available)]);

        let loan = engine.create_loan("as-1", "u1").await.unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.started_at, 1_000);
        assert_eq!(
            store.snapshot_assets().await[0].status,
            AssetStatus::Loaned
        );

        engine.return_loan(loan.id).await.unwrap();
        let loans = store.snapshot_loans().await;
        assert_eq!(loans[0].status, LoanStatus::Returned);
        assert_eq!(loans[0].ended_at, Some(1_000));
        assert_eq!(
            store.snapshot_assets().await[0].status,
            AssetStatus::Available
        );
    }

    #[tokio::test]
    async fn loaned_asset_rejects_second_borrow() {
        let (engine, _) = engine_with(vec![asset("as-1", AssetStatus::Available)]);
        engine.create_loan("as-1", "u1").await.unwrap();
        assert_eq!(
            engine.create_loan("as-1", "u2").await,
            Err(LoanError::AssetUnavailable("as-1".into()))
        );
    }

    #[tokio::test]
    async fn maintenance_asset_not_borrowable() {
        let (engine, _) = engine_with(vec![asset("as-1", AssetStatus::Maintenance)]);
        assert_eq!(
            engine.create_loan("as-1", "u1").await,
            Err(LoanError::AssetUnavailable("as-1".into()))
        );
    }

    #[tokio::test]
    async fn unknown_asset_rejected() {
        let (engine, _) = engine_with(vec![]);
        assert_eq!(
            engine.create_loan("as-9", "u1").await,
            Err(LoanError::AssetNotFound("as-9".into()))
        );
    }

    #[tokio::test]
    async fn double_return_rejected() {
        let (engine, _) = engine_with(vec![asset("as-1", AssetStatus::Available)]);
        let loan = engine.create_loan("as-1", "u1").await.unwrap();
        engine.return_loan(loan.id).await.unwrap();
        assert_eq!(
            engine.return_loan(loan.id).await,
            Err(LoanError::NotReturnable(loan.id))
        );
    }

    #[tokio::test]
    async fn returned_asset_borrowable_again() {
        let (engine, _) = engine_with(vec![asset("as-1", AssetStatus::Available)]);
        let loan = engine.create_loan("as-1", "u1").await.unwrap();
        engine.return_loan(loan.id).await.unwrap();
        assert!(engine.create_loan("as-1", "u2").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_loan_rejected() {
        let (engine, _) = engine_with(vec![]);
        let id = Ulid::new();
        assert_eq!(engine.return_loan(id).await, Err(LoanError::LoanNotFound(id)));
    }
}
