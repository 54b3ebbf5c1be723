//! Regroup all available task/commands
//!

pub use common::*;
pub use convert::*;
pub use fetch::*;
pub use read::*;
pub use s3store::*;
pub use store::*;
pub use stream::*;
pub use tee::*;

pub mod common;
pub mod convert;
pub mod fetch;
pub mod read;
pub mod s3store;
pub mod store;
pub mod stream;
pub mod tee;
