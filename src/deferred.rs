//! Deferred results returned by `enqueue` and the dialog helpers.

use crate::error::NoticeError;
use crate::registry::Settlement;
use crate::types::{NotificationId, Resolution};
use futures::ready;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

type SettlementMap<T> = fn(Settlement) -> Result<T, NoticeError>;

/// Pending outcome of one notification.
///
/// Resolves once the record has been removed from the registry. Dropping it is fine:
/// the record still settles, the value is simply discarded.
#[must_use = "a deferred result does nothing unless awaited or checked"]
pub struct Deferred<T = Resolution> {
    id: NotificationId,
    receiver: oneshot::Receiver<Settlement>,
    map: SettlementMap<T>,
    taken: bool,
}

fn identity(settlement: Settlement) -> Settlement {
    settlement
}

impl Deferred<Resolution> {
    pub(crate) fn new(id: NotificationId, receiver: oneshot::Receiver<Settlement>) -> Self {
        Self {
            id,
            receiver,
            map: identity,
            taken: false,
        }
    }

    /// Reinterpret the raw settlement, e.g. as a boolean for confirm dialogs
    pub(crate) fn map_settlement<U>(self, map: SettlementMap<U>) -> Deferred<U> {
        Deferred {
            id: self.id,
            receiver: self.receiver,
            map,
            taken: self.taken,
        }
    }
}

impl<T> Deferred<T> {
    pub fn id(&self) -> NotificationId {
        self.id
    }

    fn finish(&self, received: Result<Settlement, ()>) -> Result<T, NoticeError> {
        let settlement = received.unwrap_or(Err(NoticeError::Abandoned { id: self.id }));
        (self.map)(settlement)
    }

    /// Non-blocking check. Returns `None` while the record is still pending.
    ///
    /// Once this has returned `Some`, the value has been consumed and later calls
    /// return `None`.
    pub fn try_take(&mut self) -> Option<Result<T, NoticeError>> {
        if self.taken {
            return None;
        }
        let received = match self.receiver.try_recv() {
            Ok(settlement) => Ok(settlement),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(()),
        };
        self.taken = true;
        Some(self.finish(received))
    }

    /// True once the settlement has been handed out by [`Deferred::try_take`] or `.await`
    pub fn is_taken(&self) -> bool {
        self.taken
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, NoticeError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let received = ready!(Pin::new(&mut this.receiver).poll(cx));
        this.taken = true;
        Poll::Ready(this.finish(received.map_err(|_| ())))
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred").field("id", &self.id).finish()
    }
}
