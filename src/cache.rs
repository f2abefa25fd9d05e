//! Single-flight aggregate cache
//!
//! Holds the process-wide [`Aggregate`] and builds it lazily on first use.
//! Concurrent callers that arrive while a build is running attach to that
//! build instead of starting their own, and all of them see the same result
//! or the same failure. A failed build leaves the cache empty so the next
//! caller starts over.

use crate::error::{ArgoError, Result};
use crate::models::{Aggregate, FloatRecord};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Anything that can produce a fresh aggregate
#[async_trait]
pub trait AggregateSource: Send + Sync + 'static {
    async fn build(&self) -> Result<Aggregate>;
}

type BuildOutcome = std::result::Result<Arc<Aggregate>, Arc<ArgoError>>;
type SharedBuild = Shared<BoxFuture<'static, BuildOutcome>>;

/// Observable cache state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Building,
    Ready,
}

enum Slot {
    Empty,
    Building { attempt: u64, build: SharedBuild },
    Ready(Arc<Aggregate>),
}

struct Inner {
    slot: Slot,
    attempts: u64,
}

/// Lazily built, single-flight cache of the aggregate
pub struct AggregationCache<S> {
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<S: AggregateSource> AggregationCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            inner: Arc::new(Mutex::new(Inner {
                slot: Slot::Empty,
                attempts: 0,
            })),
        }
    }

    /// Return the aggregate, building it if nobody has yet.
    ///
    /// Checking the state and starting a build happen under one lock, so two
    /// simultaneous first requests can never start two builds.
    pub async fn get_all(&self) -> Result<Arc<Aggregate>> {
        let (attempt, build) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;

            match &inner.slot {
                Slot::Ready(aggregate) => return Ok(Arc::clone(aggregate)),
                Slot::Building { attempt, build } => {
                    debug!(attempt, "Joining in-flight aggregate build");
                    (*attempt, build.clone())
                }
                Slot::Empty => {
                    inner.attempts += 1;
                    let attempt = inner.attempts;
                    let build = self.start_build(attempt);
                    inner.slot = Slot::Building {
                        attempt,
                        build: build.clone(),
                    };
                    (attempt, build)
                }
            }
        };

        let outcome = build.await;
        settle(&self.inner, attempt, &outcome).await;
        outcome.map_err(ArgoError::BuildFailed)
    }

    /// Look up one float; `Ok(None)` means the aggregate has no such id
    pub async fn get_one(&self, id: &str) -> Result<Option<FloatRecord>> {
        let aggregate = self.get_all().await?;
        Ok(aggregate.get(id).cloned())
    }

    pub async fn state(&self) -> CacheState {
        match self.inner.lock().await.slot {
            Slot::Empty => CacheState::Empty,
            Slot::Building { .. } => CacheState::Building,
            Slot::Ready(_) => CacheState::Ready,
        }
    }

    /// Create the shared build future and drive it on its own task, so the
    /// pass completes even if every caller stops waiting.
    ///
    /// The source runs on a separate task; a panic there surfaces as
    /// [`ArgoError::TaskJoin`] like any other failed attempt.
    fn start_build(&self, attempt: u64) -> SharedBuild {
        info!(attempt, "Building aggregate");

        let source = Arc::clone(&self.source);
        let pass = tokio::spawn(async move { source.build().await });

        let build: SharedBuild = async move {
            match pass.await {
                Ok(result) => result.map(Arc::new).map_err(Arc::new),
                Err(e) => {
                    error!(attempt, "Aggregate build task aborted: {}", e);
                    Err(Arc::new(ArgoError::TaskJoin(e)))
                }
            }
        }
        .boxed()
        .shared();

        let driver = build.clone();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = driver.await;
            settle(&inner, attempt, &outcome).await;
        });

        build
    }
}

/// Move the cache out of `Building` once `attempt` has finished.
///
/// Every waiter and the driver task call this; only the first call for the
/// attempt that is still current changes anything.
async fn settle(inner: &Mutex<Inner>, attempt: u64, outcome: &BuildOutcome) {
    let mut inner = inner.lock().await;

    let is_current = matches!(
        &inner.slot,
        Slot::Building { attempt: current, .. } if *current == attempt
    );
    if !is_current {
        return;
    }

    inner.slot = match outcome {
        Ok(aggregate) => {
            info!(attempt, floats = aggregate.len(), "Aggregate ready");
            Slot::Ready(Arc::clone(aggregate))
        }
        Err(e) => {
            warn!(attempt, "Aggregate build failed, cache reset: {}", e);
            Slot::Empty
        }
    };
}
