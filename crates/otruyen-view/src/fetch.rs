use std::{
    cell::{Cell, RefCell},
    fmt::Debug,
    future::Future,
    rc::Rc,
};

use futures::{
    StreamExt,
    future::{FutureExt, LocalBoxFuture},
};
use futures_signals::signal::{Mutable, Signal, SignalExt};
use otruyen_lib::error::Result;

pub type FetchFn<Q, T> = Rc<dyn Fn(Q) -> LocalBoxFuture<'static, Result<T>>>;

/// Where a keyed retrieval currently stands.
#[derive(Debug, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading,
    Success(Rc<T>),
    Error(String),
}

impl<T> Clone for Phase<T> {
    fn clone(&self) -> Self {
        match self {
            Phase::Idle => Phase::Idle,
            Phase::Loading => Phase::Loading,
            Phase::Success(value) => Phase::Success(value.clone()),
            Phase::Error(message) => Phase::Error(message.clone()),
        }
    }
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn success(&self) -> Option<&Rc<T>> {
        match self {
            Phase::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// How an issued request ended from the controller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Success,
    Failure,
    /// A newer request was issued before this one completed, its outcome was dropped
    Superseded,
}

/// Lifecycle of one remote resource identified by a query key.
///
/// A new key always enters `Loading` and issues a fetch right away. Each
/// issued fetch is tagged with a generation number and its outcome is only
/// applied while that generation is still the latest one, so a slow response
/// for an abandoned key can never overwrite the current one.
///
/// Requests started through [`DataFetchController::observe`] are spawned with
/// `tokio::task::spawn_local`, the caller must be running inside a `LocalSet`.
pub struct DataFetchController<Q, T> {
    fetch: FetchFn<Q, T>,
    key: RefCell<Option<Q>>,
    generation: Rc<Cell<u64>>,
    phase: Mutable<Phase<T>>,
}

impl<Q, T> DataFetchController<Q, T>
where
    Q: Clone + PartialEq + Debug + 'static,
    T: 'static,
{
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(Q) -> Fut + 'static,
        Fut: Future<Output = Result<T>> + 'static,
    {
        Self {
            fetch: Rc::new(move |key| fetch(key).boxed_local()),
            key: RefCell::new(None),
            generation: Rc::new(Cell::new(0)),
            phase: Mutable::new(Phase::Idle),
        }
    }

    /// Report the phase for `key`, issuing a fetch first if the key differs
    /// from the one currently observed.
    pub fn observe(&self, key: Q) -> Phase<T> {
        let changed = self.key.borrow().as_ref() != Some(&key);
        if changed {
            tokio::task::spawn_local(self.request(key));
        }

        self.phase()
    }

    /// Issue a fetch for `key` whether or not it changed.
    pub fn refetch(&self, key: Q) -> Phase<T> {
        tokio::task::spawn_local(self.request(key));
        self.phase()
    }

    /// Enter `Loading` for `key` and return the future that completes the
    /// request. The fetch itself is issued before this returns, the future
    /// only applies its outcome.
    pub fn request(&self, key: Q) -> impl Future<Output = Settled> + 'static {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        debug!("fetch {:?} issued as generation {}", key, generation);

        *self.key.borrow_mut() = Some(key.clone());
        self.phase.set(Phase::Loading);

        let fut = (self.fetch)(key);
        let current = self.generation.clone();
        let phase = self.phase.clone();

        async move {
            let result = fut.await;

            if current.get() != generation {
                debug!(
                    "discarding response of generation {}, current is {}",
                    generation,
                    current.get()
                );
                return Settled::Superseded;
            }

            match result {
                Ok(value) => {
                    phase.set(Phase::Success(Rc::new(value)));
                    Settled::Success
                }
                Err(e) => {
                    error!("fetch failed: {}", e);
                    phase.set(Phase::Error(e.to_string()));
                    Settled::Failure
                }
            }
        }
    }

    pub fn phase(&self) -> Phase<T> {
        self.phase.get_cloned()
    }

    pub fn phase_signal(&self) -> impl Signal<Item = Phase<T>> + use<Q, T> {
        self.phase.signal_cloned()
    }

    /// Wait until the controller is no longer `Loading`
    pub async fn settled(&self) -> Phase<T> {
        let mut phases = self.phase.signal_cloned().to_stream();
        while let Some(phase) = phases.next().await {
            if !phase.is_loading() {
                return phase;
            }
        }

        self.phase()
    }

    pub fn key(&self) -> Option<Q> {
        self.key.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{Pending, listing};
    use otruyen_lib::prelude::{Error, ListingQuery, ListingResult};
    use tokio::task::LocalSet;

    #[tokio::test]
    async fn test_fetch_success() {
        let pending = Pending::<ListingQuery, ListingResult>::new();
        let controller = DataFetchController::new(pending.fetch());
        assert_eq!(controller.phase(), Phase::Idle);

        let request = controller.request(ListingQuery::new(1));
        assert!(controller.phase().is_loading());
        assert_eq!(pending.issued(), vec![ListingQuery::new(1)]);

        let result = listing(3, 3);
        pending.respond(0, Ok(result.clone()));

        assert_eq!(request.await, Settled::Success);
        assert_eq!(controller.phase(), Phase::Success(Rc::new(result)));
    }

    #[tokio::test]
    async fn test_fetch_error_drops_previous_success() {
        let pending = Pending::<ListingQuery, ListingResult>::new();
        let controller = DataFetchController::new(pending.fetch());

        let first = controller.request(ListingQuery::new(1));
        pending.respond(0, Ok(listing(25, 60)));
        assert_eq!(first.await, Settled::Success);

        let second = controller.request(ListingQuery::new(2));
        assert!(controller.phase().success().is_none());

        pending.respond(1, Err(Error::Transport("connection reset".to_string())));
        assert_eq!(second.await, Settled::Failure);
        assert_eq!(
            controller.phase(),
            Phase::Error("request failed: connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let pending = Pending::<ListingQuery, ListingResult>::new();
        let controller = DataFetchController::new(pending.fetch());

        let first = controller.request(ListingQuery::new(1));
        let second = controller.request(ListingQuery::new(2));
        assert_eq!(controller.generation(), 2);

        let newest = listing(5, 30);
        pending.respond(1, Ok(newest.clone()));
        assert_eq!(second.await, Settled::Success);

        // the first page arrives last and must not win
        pending.respond(0, Ok(listing(25, 60)));
        assert_eq!(first.await, Settled::Superseded);
        assert_eq!(controller.phase(), Phase::Success(Rc::new(newest)));
        assert_eq!(controller.key(), Some(ListingQuery::new(2)));
    }

    #[tokio::test]
    async fn test_stale_failure_is_discarded() {
        let pending = Pending::<ListingQuery, ListingResult>::new();
        let controller = DataFetchController::new(pending.fetch());

        let first = controller.request(ListingQuery::new(1));
        let second = controller.request(ListingQuery::new(2));

        pending.respond(0, Err(Error::Decode("expected value".to_string())));
        assert_eq!(first.await, Settled::Superseded);
        assert!(controller.phase().is_loading());

        pending.respond(1, Ok(listing(1, 1)));
        assert_eq!(second.await, Settled::Success);
    }

    #[tokio::test]
    async fn test_observe_only_fetches_on_key_change() {
        LocalSet::new()
            .run_until(async {
                let pending = Pending::<ListingQuery, ListingResult>::new();
                let controller = DataFetchController::new(pending.fetch());

                assert!(controller.observe(ListingQuery::new(1)).is_loading());
                assert!(controller.observe(ListingQuery::new(1)).is_loading());
                assert_eq!(pending.issued().len(), 1);

                pending.respond(0, Ok(listing(2, 2)));
                assert!(controller.settled().await.success().is_some());

                assert!(controller.observe(ListingQuery::new(1)).success().is_some());
                assert_eq!(pending.issued().len(), 1);

                assert!(controller.observe(ListingQuery::new(2)).is_loading());
                assert_eq!(pending.issued().len(), 2);

                controller.refetch(ListingQuery::new(2));
                assert_eq!(pending.issued().len(), 3);
            })
            .await;
    }
}
