use crate::domain::Timestamp;

/// Source of "now" for every timing decision in the service.
///
/// Implementations must never go backwards.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
