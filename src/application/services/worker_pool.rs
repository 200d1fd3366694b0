use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use tokio::sync::{Mutex as AsyncMutex, mpsc, watch};
use tokio::task::JoinSet;

/// Unit of work executed by the pool.
pub type PoolTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// What `reserve` does when the queue is full and the pool is at `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationPolicy {
    Reject,
    Block { timeout: Duration },
}

#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    pub core_size: usize,
    pub max_size: usize,
    pub queue_capacity: usize,
    pub saturation: SaturationPolicy,
    pub drain_on_shutdown: bool,
}

impl WorkerPoolConfig {
    /// At least one core worker, a non-empty queue and `max_size >= core_size`.
    fn normalized(mut self) -> Self {
        self.core_size = self.core_size.max(1);
        self.max_size = self.max_size.max(self.core_size);
        self.queue_capacity = self.queue_capacity.max(1);
        self
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            core_size: 4,
            max_size: 8,
            queue_capacity: 64,
            saturation: SaturationPolicy::Reject,
            drain_on_shutdown: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("worker pool saturated")]
    Saturated,
    #[error("worker pool is shut down")]
    ShutDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub live_workers: usize,
    pub queued_tasks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerRole {
    /// Lives until shutdown, waiting on the queue.
    Core,
    /// Spawned on saturation; exits as soon as the queue is empty.
    Overflow,
}

struct PoolShared {
    receiver: AsyncMutex<mpsc::Receiver<PoolTask>>,
    live_workers: AtomicUsize,
    drain_on_shutdown: bool,
}

/// Bounded set of tokio workers fed through a bounded queue.
///
/// `core_size` workers start immediately. When the queue is full, up to
/// `max_size - core_size` overflow workers are spawned, each taking the
/// submitted task directly.
pub struct WorkerPool {
    sender: RwLock<Option<mpsc::Sender<PoolTask>>>,
    shared: Arc<PoolShared>,
    shutdown_tx: watch::Sender<bool>,
    workers: Mutex<JoinSet<()>>,
    config: WorkerPoolConfig,
}

impl WorkerPool {
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    pub fn new(config: WorkerPoolConfig) -> Self {
        let config = config.normalized();
        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, _) = watch::channel(false);

        let pool = Self {
            sender: RwLock::new(Some(sender)),
            shared: Arc::new(PoolShared {
                receiver: AsyncMutex::new(receiver),
                live_workers: AtomicUsize::new(config.core_size),
                drain_on_shutdown: config.drain_on_shutdown,
            }),
            shutdown_tx,
            workers: Mutex::new(JoinSet::new()),
            config,
        };

        for _ in 0..pool.config.core_size {
            pool.spawn_worker(WorkerRole::Core, None);
        }

        tracing::info!(
            core_size = pool.config.core_size,
            max_size = pool.config.max_size,
            queue_capacity = pool.config.queue_capacity,
            drain_on_shutdown = pool.config.drain_on_shutdown,
            "Worker pool started"
        );

        pool
    }

    pub fn config(&self) -> &WorkerPoolConfig {
        &self.config
    }

    /// Claims room for one task without handing it over yet.
    ///
    /// A dropped slot gives its room back.
    pub async fn reserve(&self) -> Result<TaskSlot<'_>, PoolError> {
        let sender = self
            .sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PoolError::ShutDown)?;

        let sender = match sender.try_reserve_owned() {
            Ok(permit) => return Ok(self.slot(SlotKind::Queued(permit))),
            Err(TrySendError::Closed(_)) => return Err(PoolError::ShutDown),
            Err(TrySendError::Full(sender)) => sender,
        };

        if self.try_grow() {
            tracing::debug!("Queue full, spawning overflow worker");
            return Ok(self.slot(SlotKind::Overflow));
        }

        match self.config.saturation {
            SaturationPolicy::Reject => {
                tracing::warn!("Worker pool saturated, rejecting task");
                Err(PoolError::Saturated)
            }
            SaturationPolicy::Block { timeout } => {
                match tokio::time::timeout(timeout, sender.reserve_owned()).await {
                    Ok(Ok(permit)) => Ok(self.slot(SlotKind::Queued(permit))),
                    Ok(Err(_)) => Err(PoolError::ShutDown),
                    Err(_) => {
                        tracing::warn!(
                            timeout_ms = timeout.as_millis() as u64,
                            "Worker pool still saturated after waiting, rejecting task"
                        );
                        Err(PoolError::Saturated)
                    }
                }
            }
        }
    }

    pub async fn submit_task(&self, task: PoolTask) -> Result<(), PoolError> {
        self.reserve().await?.dispatch(task);
        Ok(())
    }

    pub fn stats(&self) -> PoolStats {
        let queued_tasks = self
            .sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |s| s.max_capacity() - s.capacity());
        PoolStats {
            live_workers: self.shared.live_workers.load(Ordering::SeqCst),
            queued_tasks,
        }
    }

    /// Stops accepting tasks and waits for every worker to exit.
    ///
    /// Running tasks always finish. Queued tasks run first when
    /// `drain_on_shutdown` is set and are dropped otherwise.
    pub async fn shutdown(&self) {
        let sender = self
            .sender
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        if !self.config.drain_on_shutdown {
            self.shutdown_tx.send_replace(true);
        }

        loop {
            let mut workers =
                std::mem::take(&mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner));
            if workers.is_empty() {
                break;
            }
            while let Some(result) = workers.join_next().await {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Worker terminated abnormally");
                }
            }
        }

        let mut receiver = self.shared.receiver.lock().await;
        receiver.close();
        let mut discarded = 0usize;
        while receiver.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::warn!(discarded, "Discarded queued tasks on shutdown");
        }

        tracing::info!("Worker pool stopped");
    }

    fn slot(&self, kind: SlotKind) -> TaskSlot<'_> {
        TaskSlot {
            pool: self,
            kind: Some(kind),
        }
    }

    fn try_grow(&self) -> bool {
        self.shared
            .live_workers
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |live| {
                (live < self.config.max_size).then_some(live + 1)
            })
            .is_ok()
    }

    /// Finished overflow workers are reaped here so the set stays bounded by
    /// `max_size` plus whatever exited since the last spawn.
    fn spawn_worker(&self, role: WorkerRole, first_task: Option<PoolTask>) {
        let shared = Arc::clone(&self.shared);
        let shutdown = self.shutdown_tx.subscribe();
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        while let Some(result) = workers.try_join_next() {
            if let Err(e) = result {
                tracing::error!(error = %e, "Worker terminated abnormally");
            }
        }
        workers.spawn(run_worker(shared, shutdown, role, first_task));
    }

    #[cfg(test)]
    fn tracked_workers(&self) -> usize {
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

enum SlotKind {
    Queued(mpsc::OwnedPermit<PoolTask>),
    /// Counted in `live_workers` already; the worker starts on dispatch.
    Overflow,
}

/// Reserved room for exactly one task.
pub struct TaskSlot<'a> {
    pool: &'a WorkerPool,
    kind: Option<SlotKind>,
}

impl TaskSlot<'_> {
    pub fn dispatch(mut self, task: PoolTask) {
        match self.kind.take() {
            Some(SlotKind::Queued(permit)) => {
                permit.send(task);
            }
            Some(SlotKind::Overflow) => self.pool.spawn_worker(WorkerRole::Overflow, Some(task)),
            None => {}
        }
    }
}

impl Drop for TaskSlot<'_> {
    fn drop(&mut self) {
        if let Some(SlotKind::Overflow) = self.kind {
            self.pool.shared.live_workers.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

async fn run_worker(
    shared: Arc<PoolShared>,
    mut shutdown: watch::Receiver<bool>,
    role: WorkerRole,
    first_task: Option<PoolTask>,
) {
    if let Some(task) = first_task {
        run_task(task).await;
    }

    loop {
        let next = match role {
            WorkerRole::Core => shared.next_task(&mut shutdown).await,
            WorkerRole::Overflow => shared.try_next_task(&shutdown),
        };
        let Some(task) = next else { break };
        run_task(task).await;
    }

    shared.live_workers.fetch_sub(1, Ordering::SeqCst);
    tracing::debug!(role = ?role, "Worker exited");
}

impl PoolShared {
    fn discarding(&self, shutdown: &watch::Receiver<bool>) -> bool {
        !self.drain_on_shutdown && *shutdown.borrow()
    }

    async fn next_task(&self, shutdown: &mut watch::Receiver<bool>) -> Option<PoolTask> {
        if self.discarding(shutdown) {
            return None;
        }
        let mut receiver = self.receiver.lock().await;
        if self.drain_on_shutdown {
            return receiver.recv().await;
        }
        tokio::select! {
            biased;
            _ = shutdown.changed() => None,
            task = receiver.recv() => task,
        }
    }

    fn try_next_task(&self, shutdown: &watch::Receiver<bool>) -> Option<PoolTask> {
        if self.discarding(shutdown) {
            return None;
        }
        let mut receiver = self.receiver.try_lock().ok()?;
        match receiver.try_recv() {
            Ok(task) => Some(task),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

async fn run_task(task: PoolTask) {
    if let Err(panic) = AssertUnwindSafe(task).catch_unwind().await {
        tracing::error!(panic = %panic_message(panic.as_ref()), "Pool task panicked");
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
