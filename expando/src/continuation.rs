//! Resume-once bridge between completion handlers and `async` peers

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Creates a linked continuation pair
pub fn continuation<T>() -> (Continuation<T>, Resumption<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        Continuation { receiver },
        Resumption {
            sender: Mutex::new(Some(sender)),
        },
    )
}

/// The awaiting half
#[derive(Debug)]
pub struct Continuation<T> {
    receiver: oneshot::Receiver<T>,
}

/// The resuming half, callable through a shared reference so it fits in `Fn` closures
#[derive(Debug)]
pub struct Resumption<T> {
    sender: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> Continuation<T> {
    /// Wait for the value passed to [`Resumption::resume`]
    ///
    /// # Panics
    ///
    /// Panics if the resumption is dropped without being resumed: `origin`
    /// never called its completion handler.
    pub async fn wait(self, origin: &'static str) -> T {
        match self.receiver.await {
            Ok(value) => value,
            Err(_) => panic!("`{origin}` dropped its completion handler without calling it"),
        }
    }
}

impl<T> Resumption<T> {
    /// Deliver the result; only the first call has an effect
    pub fn resume(&self, value: T) {
        match self.sender.lock().take() {
            Some(sender) => {
                if sender.send(value).is_err() {
                    debug!("continuation resumed after its waiter went away");
                }
            }
            None => warn!("completion handler called more than once; value ignored"),
        }
    }

    pub fn is_resumed(&self) -> bool {
        self.sender.lock().is_none()
    }
}

#[cfg(test)]
#[path = "continuation_tests.rs"]
mod continuation_tests;
