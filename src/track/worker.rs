//! Background threads applying tracked counter increments.
//!
//! `TrackWorker` owns a job channel and a small pool of threads draining it.
//! Each job is one `CounterRepository::increment`. Callers never see the
//! outcome: a job that fails is counted as dropped and logged at `debug`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::lock::LockManager;
use crate::repository::CounterRepository;
use crate::store::KvStore;
use crate::tenant::Tenant;

/// Statistics from the track worker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackStats {
    /// Increments written to the store.
    pub applied: usize,
    /// Jobs abandoned because of a store, decode or validation failure, or
    /// because the worker had already stopped.
    pub dropped: usize,
}

impl TrackStats {
    fn merge(&mut self, other: TrackStats) {
        self.applied += other.applied;
        self.dropped += other.dropped;
    }
}

enum Job {
    Track { tenant: Tenant, name: String },
    Stop,
}

/// A pool of background threads that apply counter increments.
///
/// ## Example
///
/// ```ignore
/// use analytics_store::{CounterRepository, TrackWorker, Tenant};
///
/// let worker = TrackWorker::spawn(counters.clone(), 2);
/// worker.submit(Tenant::default(), "signups");
///
/// // Drains queued jobs before returning.
/// let stats = worker.stop();
/// assert_eq!(stats.applied, 1);
/// ```
pub struct TrackWorker {
    jobs: Sender<Job>,
    handles: Vec<JoinHandle<TrackStats>>,
    stopped: AtomicBool,
    rejected: AtomicUsize,
}

impl TrackWorker {
    /// Spawn `workers` threads (at least one) sharing one job queue.
    pub fn spawn<S, M>(counters: CounterRepository<S, M>, workers: usize) -> Self
    where
        S: KvStore + Clone + 'static,
        M: LockManager + 'static,
    {
        let (jobs, rx) = channel();
        let rx = Arc::new(Mutex::new(rx));

        let handles = (0..workers.max(1))
            .map(|_| {
                let rx = rx.clone();
                let counters = counters.clone();
                thread::spawn(move || run(counters, rx))
            })
            .collect();

        Self {
            jobs,
            handles,
            stopped: AtomicBool::new(false),
            rejected: AtomicUsize::new(0),
        }
    }

    /// Queue one increment of `name` in `tenant`. Never blocks on the store.
    ///
    /// Once stopping has begun the job is rejected and counted as dropped.
    pub fn submit(&self, tenant: Tenant, name: impl Into<String>) {
        let name = name.into();
        if self.stopped.load(Ordering::Acquire)
            || self.jobs.send(Job::Track { tenant, name }).is_err()
        {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            debug!("track worker stopped, increment dropped");
        }
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Let the workers finish every job queued so far, then join them.
    /// Returns the summed statistics.
    pub fn stop(mut self) -> TrackStats {
        self.signal_stop();
        let mut stats = TrackStats {
            applied: 0,
            dropped: self.rejected.load(Ordering::Relaxed),
        };
        for handle in self.handles.drain(..) {
            stats.merge(handle.join().unwrap_or_default());
        }
        stats
    }

    /// Ask every worker to stop once the queue ahead of it is drained, without waiting.
    fn signal_stop(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        for _ in 0..self.handles.len() {
            let _ = self.jobs.send(Job::Stop);
        }
    }
}

impl Drop for TrackWorker {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

fn run<S, M>(counters: CounterRepository<S, M>, queue: Arc<Mutex<Receiver<Job>>>) -> TrackStats
where
    S: KvStore,
    M: LockManager,
{
    let mut stats = TrackStats::default();

    loop {
        let job = match queue.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };

        match job {
            Ok(Job::Track { tenant, name }) => match counters.increment(&tenant, &name) {
                Ok(_) => stats.applied += 1,
                Err(e) => {
                    stats.dropped += 1;
                    debug!(%tenant, name = %name, error = %e, "tracked increment dropped");
                }
            },
            Ok(Job::Stop) | Err(_) => break,
        }
    }

    stats
}
