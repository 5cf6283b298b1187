//! Cart session state.
//!
//! The cart and its applied coupon are the only state in the system not
//! owned by durable storage. There is one shared session per process, not
//! one per caller; every cart and checkout operation takes the session lock
//! for its full duration so mutations never interleave and summaries never
//! observe a half-applied change.

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{cart::records::AppliedCoupon, catalog::records::ProductId};

/// Shared handle to the process-wide cart.
///
/// Cloning the handle shares the underlying state; the cart and checkout
/// services are constructed over the same session.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    state: Arc<Mutex<CartState>>,
}

impl CartSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().await
    }
}

/// The mutable cart contents: one line per product plus at most one coupon.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    pub(crate) lines: BTreeMap<ProductId, i64>,
    pub(crate) coupon: Option<AppliedCoupon>,
}

impl CartState {
    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Empties the lines and drops the coupon. Only checkout completion
    /// resets the session; there is no standalone destructive operation.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
    }
}
