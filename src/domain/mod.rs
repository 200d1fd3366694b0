mod computation_state;
mod entry;
mod job_timings;
mod job_view;
mod search_job;
mod search_reference;
mod timestamp;

pub use computation_state::{ComputationOutcome, ComputationState};
pub use entry::Entry;
pub use job_timings::JobTimings;
pub use job_view::{JobView, VisibleState};
pub use search_job::SearchJob;
pub use search_reference::SearchReference;
pub use timestamp::Timestamp;
