//! Interface to the scroll container that owns the list.
//!
//! The header never scrolls anything itself.  It reads positions the
//! container reports and sends it fire-and-forget requests over a channel.

use tokio::sync::{mpsc, oneshot};

use super::position::ScrollPosition;

/// Something that can report where the list is.
pub trait ScrollSource {
    fn position(&self) -> ScrollPosition;
}

/// Something that accepts scroll requests.
pub trait ScrollCommander {
    /// Ask the container to bring item `index` to the top.  Returns
    /// immediately; the returned handle may be dropped.
    fn request_scroll_to_index(&self, index: usize) -> ScrollCompletion;
}

/// A pending request as seen by the container.
#[derive(Debug)]
pub struct ScrollRequest {
    pub index: usize,
    done: oneshot::Sender<()>,
}

impl ScrollRequest {
    /// Signal arrival.  A dropped completion handle is fine.
    pub fn complete(self) {
        let _ = self.done.send(());
    }
}

/// Resolves once the requested scroll has arrived.  The menu drops it.
#[derive(Debug)]
#[cfg_attr(not(test), allow(dead_code))]
pub struct ScrollCompletion {
    rx: oneshot::Receiver<()>,
}

impl ScrollCompletion {
    /// `true` when the scroll arrived, `false` if it was superseded or the
    /// container went away.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn wait(self) -> bool {
        self.rx.await.is_ok()
    }
}

/// Cloneable sending side handed to the header.
#[derive(Debug, Clone)]
pub struct ScrollHandle {
    tx: mpsc::UnboundedSender<ScrollRequest>,
}

/// Create a connected handle / request receiver pair.
pub fn scroll_channel() -> (ScrollHandle, mpsc::UnboundedReceiver<ScrollRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScrollHandle { tx }, rx)
}

impl ScrollCommander for ScrollHandle {
    fn request_scroll_to_index(&self, index: usize) -> ScrollCompletion {
        let (done, rx) = oneshot::channel();
        if self.tx.send(ScrollRequest { index, done }).is_err() {
            tracing::debug!(index, "scroll container gone; request dropped");
        }
        ScrollCompletion { rx }
    }
}
