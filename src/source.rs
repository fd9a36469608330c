use crate::error::Error;
use futures::future::{self, BoxFuture};
use tokio::sync::watch;

/// A value resources can depend on.
///
/// Setting a different value notifies every resource tracking it. Setting an
/// equal value is not a change and triggers nothing.
pub struct Source<T> {
    sender: watch::Sender<T>,
}

impl<T: PartialEq> Source<T> {
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);

        Self { sender }
    }

    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                return false;
            }

            *current = value;
            true
        })
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Builds a target source that resolves this value through `expr`.
    pub fn track<F>(&self, expr: F) -> Tracked<T, F>
    where
        F: FnMut(&T) -> Result<String, Error>,
    {
        Tracked::new(self.subscribe(), expr)
    }
}

/// Something a resource resolves into a request target and watches for changes.
pub trait TargetSource: Send + 'static {
    /// Resolves the current target and marks the dependencies as seen.
    fn resolve(&mut self) -> Result<String, Error>;

    /// Completes once a dependency changed since the last `resolve`.
    /// Yields `None` when no further change can happen.
    fn changed(&mut self) -> BoxFuture<'_, Option<()>>;
}

/// A plain target never changes.
impl TargetSource for String {
    fn resolve(&mut self) -> Result<String, Error> {
        Ok(self.clone())
    }

    fn changed(&mut self) -> BoxFuture<'_, Option<()>> {
        Box::pin(future::ready(None))
    }
}

/// A dependency on one watched value mapped to a target.
pub struct Tracked<D, F> {
    receiver: watch::Receiver<D>,
    expr: F,
}

impl<D, F> Tracked<D, F> {
    pub fn new(receiver: watch::Receiver<D>, expr: F) -> Self {
        Self { receiver, expr }
    }
}

impl<D, F> TargetSource for Tracked<D, F>
where
    D: Clone + Send + Sync + 'static,
    F: FnMut(&D) -> Result<String, Error> + Send + 'static,
{
    fn resolve(&mut self) -> Result<String, Error> {
        // Released before `expr` runs, which may set the same source.
        let value = self.receiver.borrow_and_update().clone();
        (self.expr)(&value)
    }

    fn changed(&mut self) -> BoxFuture<'_, Option<()>> {
        Box::pin(async move { self.receiver.changed().await.ok() })
    }
}
