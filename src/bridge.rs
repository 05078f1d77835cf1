//! Callback-to-Future Bridge
//!
//! Adapts the host's one-shot callback operations into awaitable futures so
//! every OS call presents a single uniform suspension point, whatever the
//! binding's native style.

use crate::error::{Error, Result};
use crate::host::{Done, HostError};
use tokio::sync::oneshot;

/// Await a one-shot callback-style host operation.
///
/// `issue` receives the completion callback and starts the operation. The
/// callback is `FnOnce`, so double settlement is unrepresentable; if the
/// backend drops it without settling, the future resolves to a
/// [`HostError`] instead of pending forever.
///
/// There is no cancellation: dropping the returned future abandons the
/// result, but the underlying OS operation still runs to completion.
pub async fn bridge<T, F>(issue: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Done<T>),
{
    let (tx, rx) = oneshot::channel::<std::result::Result<T, HostError>>();
    issue(Box::new(move |outcome| {
        // Receiver may already be dropped; the result is simply discarded.
        let _ = tx.send(outcome);
    }));
    match rx.await {
        Ok(outcome) => outcome.map_err(Error::Host),
        Err(_) => Err(Error::Host(HostError::dropped())),
    }
}
