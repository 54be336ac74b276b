/*!
 * Rate-limited job dispatch.
 *
 * Jobs are started in the order they are supplied, with at most
 * `max_concurrent` of them running and at least `min_interval` between two
 * consecutive starts. All jobs are driven from the calling task, so they may
 * borrow data owned by the caller.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Limits applied to a dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Maximum number of jobs running at the same time (0 behaves as 1)
    pub max_concurrent: usize,
    /// Minimum time between two job starts (zero disables spacing)
    pub min_interval: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            min_interval: Duration::from_millis(500),
        }
    }
}

impl DispatchSettings {
    pub fn new(max_concurrent: usize, min_interval: Duration) -> Self {
        Self {
            max_concurrent,
            min_interval,
        }
    }

    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrent.max(1)
    }
}

/// Keeps consecutive job starts at least `interval` apart
#[derive(Debug)]
struct StartPacer {
    interval: Duration,
    last_start: Option<Instant>,
}

impl StartPacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: None,
        }
    }

    /// Wait until the next start is allowed, then record it
    async fn admit(&mut self) {
        if let Some(last_start) = self.last_start {
            if !self.interval.is_zero() {
                sleep_until(last_start + self.interval).await;
            }
        }
        self.last_start = Some(Instant::now());
    }
}

/// Bounded, paced scheduler for independent jobs
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> DispatchSettings {
        self.settings
    }

    /// Run every job through `invoke` and collect the outcomes
    ///
    /// Outcomes are returned in completion order. One job's outcome never
    /// affects the others; `progress` is called with `(completed, total)`
    /// after each completion.
    pub async fn run_all<J, O, F, Fut, P>(&self, jobs: Vec<J>, invoke: F, mut progress: P) -> Vec<O>
    where
        F: Fn(J) -> Fut,
        Fut: Future<Output = O>,
        P: FnMut(usize, usize),
    {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let concurrency = self.settings.effective_concurrency();
        debug!(
            "Dispatching {} jobs ({} concurrent, {:?} between starts)",
            total, concurrency, self.settings.min_interval
        );

        let admitted = stream::unfold(
            (jobs.into_iter(), StartPacer::new(self.settings.min_interval)),
            |(mut jobs, mut pacer)| async move {
                let job = jobs.next()?;
                pacer.admit().await;
                Some((job, (jobs, pacer)))
            },
        );

        let mut completed = 0;
        admitted
            .map(invoke)
            .buffer_unordered(concurrency)
            .map(|outcome| {
                completed += 1;
                progress(completed, total);
                outcome
            })
            .collect()
            .await
    }
}
