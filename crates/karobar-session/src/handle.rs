//! # Shared Session Handle
//!
//! Wraps a [`SaleSession`] for concurrent callers. Cart edits and reads
//! serialize on a mutex; each lifecycle operation (process, hold, resume,
//! delete) additionally carries its own busy latch so a double-fired
//! invocation is rejected with [`SessionError::Busy`] instead of queuing
//! up a second stock deduction behind the first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use karobar_core::{DraftTotals, HeldBill, SaleDraft};

use crate::error::{SessionError, SessionResult};
use crate::session::{ProcessedSale, SaleSession};

/// Per-operation re-entrancy latch. Released on drop, including on the
/// error paths out of the guarded operation.
struct BusyFlag {
    flag: AtomicBool,
    op: &'static str,
}

impl BusyFlag {
    const fn new(op: &'static str) -> Self {
        Self {
            flag: AtomicBool::new(false),
            op,
        }
    }

    fn acquire(&self) -> SessionResult<BusyGuard<'_>> {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::Busy { op: self.op })?;
        Ok(BusyGuard { flag: &self.flag })
    }
}

struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Cloneable handle to one shared [`SaleSession`].
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<SaleSession>>,
    processing: Arc<BusyFlag>,
    holding: Arc<BusyFlag>,
    resuming: Arc<BusyFlag>,
    deleting: Arc<BusyFlag>,
}

impl SessionHandle {
    pub fn new(session: SaleSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            processing: Arc::new(BusyFlag::new("process")),
            holding: Arc::new(BusyFlag::new("hold")),
            resuming: Arc::new(BusyFlag::new("resume")),
            deleting: Arc::new(BusyFlag::new("delete")),
        }
    }

    /// Runs a closure against the session under the mutex. The entry point
    /// for cart edits.
    pub async fn with_session<T>(&self, f: impl FnOnce(&mut SaleSession) -> T) -> T {
        let mut session = self.inner.lock().await;
        f(&mut session)
    }

    /// Snapshot of the active draft.
    pub async fn draft(&self) -> SaleDraft {
        self.inner.lock().await.draft().clone()
    }

    /// Derived totals for the active draft.
    pub async fn totals(&self) -> DraftTotals {
        DraftTotals::from(self.inner.lock().await.draft())
    }

    /// Held bills, newest first.
    pub async fn held_bills(&self) -> Vec<HeldBill> {
        self.inner
            .lock()
            .await
            .held_recent_first()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn process(&self) -> SessionResult<ProcessedSale> {
        let _guard = self.processing.acquire()?;
        self.inner.lock().await.process().await
    }

    pub async fn hold(&self) -> SessionResult<HeldBill> {
        let _guard = self.holding.acquire()?;
        self.inner.lock().await.hold().await
    }

    pub async fn resume(&self, id: &str) -> SessionResult<()> {
        let _guard = self.resuming.acquire()?;
        self.inner.lock().await.resume(id).await
    }

    pub async fn delete_held(&self, id: &str) -> SessionResult<()> {
        let _guard = self.deleting.acquire()?;
        self.inner.lock().await.delete_held(id).await
    }

    pub async fn refresh_held(&self) -> SessionResult<()> {
        self.inner.lock().await.refresh_held().await
    }

    /// True while a checkout is in flight. Drives the UI busy indicator.
    pub fn is_processing(&self) -> bool {
        self.processing.flag.load(Ordering::Acquire)
    }

    pub fn is_holding(&self) -> bool {
        self.holding.flag.load(Ordering::Acquire)
    }

    pub fn is_resuming(&self) -> bool {
        self.resuming.flag.load(Ordering::Acquire)
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use karobar_core::InventoryItemRef;
    use crate::ports::{GatewayError, HeldBillStore, StockGateway, StoreError};

    struct NoopGateway;

    #[async_trait]
    impl StockGateway for NoopGateway {
        async fn sell(
            &self,
            item_id: i64,
            _quantity: i64,
        ) -> Result<InventoryItemRef, GatewayError> {
            Err(GatewayError::NotFound(item_id))
        }
    }

    struct NoopStore;

    #[async_trait]
    impl HeldBillStore for NoopStore {
        async fn save(&self, _bill: &HeldBill) -> Result<(), StoreError> {
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<HeldBill>, StoreError> {
            Ok(Vec::new())
        }

        async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn test_handle() -> SessionHandle {
        SessionHandle::new(SaleSession::new(
            Arc::new(NoopGateway),
            Arc::new(NoopStore),
            "Test Store",
        ))
    }

    #[test]
    fn busy_flag_rejects_second_acquire() {
        let flag = BusyFlag::new("process");
        let guard = flag.acquire().unwrap();
        assert!(matches!(
            flag.acquire(),
            Err(SessionError::Busy { op: "process" })
        ));
        drop(guard);
        assert!(flag.acquire().is_ok());
    }

    #[tokio::test]
    async fn delete_latch_is_independent_of_resume() {
        let handle = test_handle();

        // Pin the resume latch as if a resume were mid-flight; a delete of
        // a different bill must still get through to the session (here it
        // reaches the not-found check rather than bouncing off as Busy).
        let _resume_guard = handle.resuming.acquire().unwrap();
        assert!(matches!(
            handle.delete_held("held-1").await,
            Err(SessionError::HeldBillNotFound(_))
        ));
        assert!(handle.is_resuming());
        assert!(!handle.is_deleting());

        // And the resume path itself is still latched.
        assert!(matches!(
            handle.resume("held-2").await,
            Err(SessionError::Busy { op: "resume" })
        ));
    }

    #[test]
    fn busy_flag_released_on_error_path() {
        let flag = BusyFlag::new("hold");
        {
            let _guard = flag.acquire().unwrap();
            // guard dropped at end of scope, as it would be when the
            // guarded operation returns an error
        }
        assert!(flag.acquire().is_ok());
    }
}
