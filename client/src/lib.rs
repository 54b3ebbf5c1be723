mod grpc;
mod job;
mod local;
mod single;

pub use job::*;
pub use local::*;
pub use single::*;

// Re-export engine stuff.
pub use fetiche_engine::{Filter, Freq, JobState};
