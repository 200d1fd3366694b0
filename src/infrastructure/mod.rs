pub mod observability;
pub mod persistence;
pub mod search;
pub mod time;
