pub use convert::*;
pub use fetch::*;
pub use import::*;
pub use stream::*;

mod convert;
mod fetch;
mod import;
mod stream;
