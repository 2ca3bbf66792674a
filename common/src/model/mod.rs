pub mod context;
pub mod snapshot;
pub mod submission;
