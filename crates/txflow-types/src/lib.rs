pub mod call;
pub mod common;
pub mod notify;
pub mod transaction;

pub use call::*;
pub use common::*;
pub use notify::*;
pub use transaction::*;
