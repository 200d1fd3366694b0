mod search_job_manager;
mod worker_pool;

pub use search_job_manager::{PollError, SearchJobManager, SubmitError, UnavailableReason};
pub use worker_pool::{
    PoolError, PoolStats, PoolTask, SaturationPolicy, TaskSlot, WorkerPool, WorkerPoolConfig,
};
