use crate::error::{Error, ErrorKind};
use crate::resource_config::{ResourceConfig, StaleResponsePolicy};
use crate::resource_state::ResourceState;
use crate::source::TargetSource;
use crate::transport::Transport;

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Read-only view of a resource's state. `changed`/`wait_for` observe updates.
pub type StateReader<T> = watch::Receiver<ResourceState<T>>;

/// Sequence number of a fetch cycle, increasing with every cycle issued.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cycle(u64);

struct SharedState<T> {
    state: watch::Sender<ResourceState<T>>,
    latest_cycle: AtomicU64,
    stale_responses: StaleResponsePolicy,
}

impl<T> SharedState<T> {
    fn new(stale_responses: StaleResponsePolicy) -> Self {
        let (state, _) = watch::channel(ResourceState::idle());

        Self {
            state,
            latest_cycle: AtomicU64::new(0),
            stale_responses,
        }
    }

    // The cycle counter is only touched inside the watch's write lock, so a
    // settle can never interleave with the reset of a newer cycle.
    fn begin(&self) -> Cycle {
        let mut cycle = Cycle(0);
        self.state.send_modify(|state| {
            cycle = Cycle(self.latest_cycle.fetch_add(1, Ordering::SeqCst) + 1);
            state.begin();
        });

        cycle
    }

    /// Applies the outcome of `cycle`. Returns false when it was discarded as stale.
    fn settle(&self, cycle: Cycle, outcome: Result<T, Error>) -> bool {
        self.state.send_if_modified(|state| {
            let latest_cycle = self.latest_cycle.load(Ordering::SeqCst);
            if cycle.0 != latest_cycle {
                match self.stale_responses {
                    StaleResponsePolicy::Discard => {
                        log::debug!(
                            "discarded response of cycle {} superseded by cycle {}",
                            cycle.0,
                            latest_cycle
                        );
                        return false;
                    }
                    StaleResponsePolicy::Overwrite => {
                        log::debug!(
                            "applying response of cycle {} over cycle {}",
                            cycle.0,
                            latest_cycle
                        );
                    }
                }
            }

            match outcome {
                Ok(data) => state.succeed(data),
                Err(error) => state.fail(error),
            }
            state.finish();

            true
        })
    }
}

/// Keeps a [`ResourceState`] in sync with the latest fetch of its source's target.
///
/// Nothing is fetched until [`ReactiveResource::activate`]. From then on the
/// first cycle starts right away and every change of the source starts another.
pub struct ReactiveResource<T> {
    shared: Arc<SharedState<T>>,
    transport: Arc<dyn Transport>,
    source: Box<dyn TargetSource>,
}

impl<T> ReactiveResource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn create(
        source: impl TargetSource,
        transport: Arc<dyn Transport>,
        config: &ResourceConfig,
    ) -> Self {
        Self {
            shared: Arc::new(SharedState::new(config.stale_responses)),
            transport,
            source: Box::new(source),
        }
    }

    pub fn state(&self) -> StateReader<T> {
        self.shared.state.subscribe()
    }

    /// Starts the first fetch cycle and keeps tracking the source on the
    /// current tokio runtime. The state is loading once this returns.
    pub fn activate(self) -> ActiveResource<T> {
        let ReactiveResource {
            shared,
            transport,
            mut source,
        } = self;

        run_cycle(&shared, &transport, source.as_mut());
        let driver = tokio::spawn(track(shared.clone(), transport, source));

        ActiveResource { shared, driver }
    }
}

/// A resource that is tracking its source. Dropping it stops the tracking;
/// requests already in flight still resolve.
pub struct ActiveResource<T> {
    shared: Arc<SharedState<T>>,
    driver: JoinHandle<()>,
}

impl<T> ActiveResource<T> {
    pub fn state(&self) -> StateReader<T> {
        self.shared.state.subscribe()
    }
}

impl<T> Drop for ActiveResource<T> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

fn run_cycle<T>(shared: &Arc<SharedState<T>>, transport: &Arc<dyn Transport>, source: &mut dyn TargetSource)
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let cycle = shared.begin();

    match source.resolve() {
        Ok(target) => fetch(shared.clone(), transport.as_ref(), cycle, target),
        Err(error) => {
            log::error!("failed to resolve resource target: {}", error);
            shared.settle(cycle, Err(error));
        }
    }
}

async fn track<T>(
    shared: Arc<SharedState<T>>,
    transport: Arc<dyn Transport>,
    mut source: Box<dyn TargetSource>,
) where
    T: DeserializeOwned + Send + Sync + 'static,
{
    while source.changed().await.is_some() {
        run_cycle(&shared, &transport, source.as_mut());
    }

    log::debug!("resource source closed, no further fetches");
}

fn fetch<T>(shared: Arc<SharedState<T>>, transport: &dyn Transport, cycle: Cycle, target: String)
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    log::info!("fetching {} (cycle {})", target, cycle.0);

    let request = transport.get(&target);

    tokio::spawn(async move {
        let outcome = match request.await {
            Ok(body) => parse::<T>(&body),
            Err(error) => Err(error),
        };

        if let Err(error) = &outcome {
            log::error!("failed to fetch {}: {}", target, error);
        }

        shared.settle(cycle, outcome);
    });
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    match serde_json::from_slice(body) {
        Ok(data) => Ok(data),
        Err(error) => Err(Error::new(
            ErrorKind::ParseFailure,
            format!("failed to parse response body: {}", error),
        )),
    }
}
